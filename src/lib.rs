//! # Urlaubsgruppe
//!
//! A small web dashboard for a vacation group. Logged-in members see a map
//! of travel destinations, a list of open questions and statistics over the
//! cost of past trips, and can add destinations and questions.
//!
//! ## Modules
//!
//! - [`config`]: YAML configuration with environment overrides
//! - [`auth`]: Login sessions and signed session cookies
//! - [`store`]: Flat-file CSV/text stores
//! - [`views`]: Map region, question list and cost statistics
//! - [`web`]: Server-rendered dashboard with Axum
//!
//! ## Quick Start
//!
//! ```rust
//! use urlaubsgruppe::views::{compute_zoom, CostSummary};
//! use urlaubsgruppe::store::TripCost;
//!
//! assert_eq!(compute_zoom(0.6, 0.2), 8);
//!
//! let trips = vec![TripCost::new("Rom", 100.0), TripCost::new("Oslo", 120.0)];
//! let summary = CostSummary::compute(&trips).unwrap();
//! assert_eq!(summary.total, 220.0);
//! ```

pub mod auth;
pub mod config;
pub mod logging;
pub mod store;
pub mod views;
pub mod web;

// Re-export top-level types for convenience
pub use auth::{AuthError, AuthSession, AuthStatus, Authenticator};

pub use config::{Config, ConfigError, CookieConfig, DataConfig, LoggingConfig, ServerConfig};

pub use store::{
    CostStore, Destination, DestinationStore, Question, QuestionStore, StoreError, StoreResult,
    TripCost,
};

pub use views::{compute_zoom, CostSummary, CostsView, MapRegion, MapView, QuestionsView, ViewError};

pub use web::{build_router, serve, AppState, WebError};
