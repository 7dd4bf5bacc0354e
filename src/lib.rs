use std::sync::Arc;

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::narrative::{NarrativeGenerator, PlaceholderNarrator};

// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub narrator: Arc<dyn NarrativeGenerator>,
}

impl AppState {
    pub fn new(config: config::Config) -> Self {
        Self::with_narrator(config, Arc::new(PlaceholderNarrator))
    }

    pub fn with_narrator(config: config::Config, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        Self { config, narrator }
    }
}
