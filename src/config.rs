//! Configuration System
//!
//! Handles loading configuration from a YAML file and environment variables.
//! The file carries the login credentials and cookie settings; server, data
//! and logging sections are optional and fall back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::auth::is_bcrypt_hash;

/// Upper bound for `cookie.expiry_days` (ten years)
pub const MAX_EXPIRY_DAYS: f64 = 3650.0;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub credentials: Credentials,

    pub cookie: CookieConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Known users, keyed by login name
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Credentials {
    #[serde(default)]
    pub usernames: BTreeMap<String, UserEntry>,
}

/// A single user entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserEntry {
    /// Display name shown after login
    pub name: String,

    /// bcrypt hash of the password
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Session cookie settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// Secret used to sign the session cookie
    pub key: String,

    #[serde(default = "default_expiry_days")]
    pub expiry_days: f64,
}

fn default_cookie_name() -> String {
    "urlaubsgruppe_auth".to_string()
}

fn default_expiry_days() -> f64 {
    30.0
}

impl CookieConfig {
    /// Cookie lifetime in whole seconds
    pub fn max_age_secs(&self) -> i64 {
        (self.expiry_days * 86_400.0).round() as i64
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locations of the flat-file stores
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default = "default_destinations_path")]
    pub destinations: PathBuf,

    #[serde(default = "default_questions_path")]
    pub questions: PathBuf,

    #[serde(default = "default_costs_path")]
    pub costs: PathBuf,
}

fn default_destinations_path() -> PathBuf {
    PathBuf::from("./data/destinations.csv")
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("./data/questions.txt")
}

fn default_costs_path() -> PathBuf {
    PathBuf::from("./data/costs.csv")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            destinations: default_destinations_path(),
            questions: default_questions_path(),
            costs: default_costs_path(),
        }
    }
}

impl DataConfig {
    /// Place all store files inside `dir`, keeping their file names
    pub fn rebase(&mut self, dir: impl AsRef<Path>) {
        let dir = dir.as_ref();
        for path in [&mut self.destinations, &mut self.questions, &mut self.costs] {
            if let Some(file_name) = path.file_name() {
                *path = dir.join(file_name);
            }
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Resolve the config file location.
    ///
    /// An explicit path wins; otherwise the first existing file among
    /// `./config.yml` and the user config directory is used.
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        let candidates = [
            Some(PathBuf::from("./config.yml")),
            dirs::config_dir().map(|p| p.join("urlaubsgruppe").join("config.yml")),
        ];

        candidates.into_iter().flatten().find(|p| p.exists())
    }

    /// Reject settings the authenticator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cookie.key.trim().is_empty() {
            return Err(ConfigError::Invalid("cookie.key must not be empty".to_string()));
        }
        if self.cookie.name.trim().is_empty() {
            return Err(ConfigError::Invalid("cookie.name must not be empty".to_string()));
        }
        if !(self.cookie.expiry_days > 0.0 && self.cookie.expiry_days <= MAX_EXPIRY_DAYS) {
            return Err(ConfigError::Invalid(format!(
                "cookie.expiry_days must be in (0, {}]",
                MAX_EXPIRY_DAYS
            )));
        }
        for (username, user) in &self.credentials.usernames {
            if !is_bcrypt_hash(&user.password) {
                return Err(ConfigError::Invalid(format!(
                    "password of user '{}' is not a bcrypt hash",
                    username
                )));
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = lookup("URLAUBSGRUPPE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("URLAUBSGRUPPE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Data overrides
        if let Some(dir) = lookup("URLAUBSGRUPPE_DATA_DIR") {
            self.data.rebase(dir);
        }

        // Logging overrides
        if let Some(level) = lookup("URLAUBSGRUPPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("URLAUBSGRUPPE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content.
///
/// `admin_password_hash` is the bcrypt hash stored for the `admin` user.
pub fn generate_default_config(admin_password_hash: &str) -> String {
    format!(
        r#"# Urlaubsgruppe Configuration
#
# Environment variables override these settings:
# - URLAUBSGRUPPE_HOST
# - URLAUBSGRUPPE_PORT
# - URLAUBSGRUPPE_DATA_DIR
# - URLAUBSGRUPPE_LOG_LEVEL
# - URLAUBSGRUPPE_LOG_FORMAT

credentials:
  usernames:
    # Generate hashes with: urlaubsgruppe hash-password <PASSWORD>
    # (this one is the hash of "changeme")
    admin:
      name: Admin
      password: "{admin_password_hash}"

cookie:
  # Name of the session cookie
  name: urlaubsgruppe_auth
  # Secret used to sign the session cookie; replace with a long random string
  key: change-this-secret
  # Days until a login expires
  expiry_days: 30

server:
  host: 0.0.0.0
  port: 8501

data:
  destinations: ./data/destinations.csv
  questions: ./data/questions.txt
  costs: ./data/costs.csv

logging:
  # Log level: trace, debug, info, warn, error
  level: info
  # Log format: pretty (for development) or json (for production)
  format: pretty
"#
    )
}
