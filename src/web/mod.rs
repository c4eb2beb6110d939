//! Urlaubsgruppe Web Layer
//!
//! Server-rendered dashboard built with Axum.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /` - Login form, or map, questions and costs once logged in
//! - `POST /login` - Log in and receive the session cookie
//! - `POST /destinations` - Add a destination
//! - `POST /questions` - Add a question
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health/ready` - Readiness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use urlaubsgruppe::config::Config;
//! use urlaubsgruppe::web::{serve, AppState};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_with_env(Path::new("config.yml"))?;
//!     let addr = config.server.addr();
//!     serve(AppState::new(config)?, &addr).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;

pub use error::{WebError, WebResult};
pub use session::CurrentSession;
pub use state::AppState;
pub use templates::Templates;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let dashboard_routes = Router::new()
        .route("/", get(routes::dashboard::index))
        .route("/login", post(routes::login::login))
        .route("/destinations", post(routes::destinations::add_destination))
        .route("/questions", post(routes::questions::add_question));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(dashboard_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, addr: &str) -> Result<(), WebError> {
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Urlaubsgruppe listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| WebError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Urlaubsgruppe shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
