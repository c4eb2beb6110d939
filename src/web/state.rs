//! Application State
//!
//! Shared state accessible by all handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use super::error::WebResult;
use super::templates::Templates;
use crate::auth::Authenticator;
use crate::config::Config;
use crate::store::{CostStore, DestinationStore, QuestionStore};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Credential checks and session cookies
    pub authenticator: Arc<Authenticator>,
    pub destinations: Arc<DestinationStore>,
    pub questions: Arc<QuestionStore>,
    pub costs: Arc<CostStore>,
    /// Compiled page templates
    pub templates: Arc<Templates>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build stores, authenticator and templates from `config`
    pub fn new(config: Config) -> WebResult<Self> {
        let authenticator = Authenticator::from_config(&config);
        let destinations = DestinationStore::new(config.data.destinations.clone());
        let questions = QuestionStore::new(config.data.questions.clone());
        let costs = CostStore::new(config.data.costs.clone());

        Ok(Self {
            authenticator: Arc::new(authenticator),
            destinations: Arc::new(destinations),
            questions: Arc::new(questions),
            costs: Arc::new(costs),
            templates: Arc::new(Templates::new()?),
            start_time: Instant::now(),
        })
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
