//! Urlaubsgruppe
//!
//! Run with: cargo run -- serve --config config.yml
//!
//! # Configuration
//!
//! Environment variables:
//! - `URLAUBSGRUPPE_CONFIG`: Config file path (default: ./config.yml)
//! - `URLAUBSGRUPPE_HOST`, `URLAUBSGRUPPE_PORT`: Listen address
//! - `URLAUBSGRUPPE_DATA_DIR`: Directory holding the data files
//! - `URLAUBSGRUPPE_LOG_LEVEL`, `URLAUBSGRUPPE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Log filter, overrides the configured level

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use urlaubsgruppe::auth::hash_password;
use urlaubsgruppe::config::{generate_default_config, Config};
use urlaubsgruppe::web::{serve, AppState};

/// Password of the `admin` user in a freshly written config
const DEFAULT_ADMIN_PASSWORD: &str = "changeme";

#[derive(Parser)]
#[command(name = "urlaubsgruppe", version, about = "Vacation group dashboard")]
struct Cli {
    /// Path to the YAML config file
    #[arg(short, long, global = true, env = "URLAUBSGRUPPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web dashboard (default)
    Serve,

    /// Print the bcrypt hash of a password for the config file
    HashPassword {
        password: String,
    },

    /// Write a default config file
    InitConfig {
        /// Target path
        #[arg(short, long, default_value = "config.yml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(cli.config.as_deref()).await,
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
        Command::InitConfig { output, force } => init_config(&output, force),
    }
}

async fn run_server(config_path: Option<&Path>) -> Result<()> {
    let path = Config::locate(config_path)
        .context("No config file found; create one with `urlaubsgruppe init-config`")?;
    let config = Config::load_with_env(&path)?;

    urlaubsgruppe::logging::init(&config.logging);

    tracing::info!("Starting Urlaubsgruppe v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Loaded config from {:?}", path);
    tracing::info!("Destinations: {:?}", config.data.destinations);
    tracing::info!("Questions: {:?}", config.data.questions);
    tracing::info!("Costs: {:?}", config.data.costs);

    if config.credentials.usernames.is_empty() {
        tracing::warn!("No users configured; nobody will be able to log in");
    }

    let addr = config.server.addr();
    let state = AppState::new(config)?;
    serve(state, &addr).await?;

    tracing::info!("Urlaubsgruppe stopped");
    Ok(())
}

fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let admin_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    std::fs::write(output, generate_default_config(&admin_hash))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Wrote default config to {}", output.display());
    println!("Set a new cookie key and add users with `urlaubsgruppe hash-password`.");
    Ok(())
}
