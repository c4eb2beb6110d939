//! Data Transfer Objects
//!
//! Form bodies and JSON responses of the web layer. The add forms of the
//! dashboard sections live with their views in [`crate::views`].

use serde::{Deserialize, Serialize};

/// Login form body
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "ok" when all data files are reachable
    pub storage: String,
    pub users: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
