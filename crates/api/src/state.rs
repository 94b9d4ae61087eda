//! Application state shared across handlers.

use std::env;
use std::sync::Arc;

use brain_core::{Brain, BrainError};
use groq_brain::GroqBrain;
use intake::IntakeService;
use mock_brain::KeywordBrain;
use tracing::{info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Intake actions over the database and brain.
    pub service: IntakeService,
}

impl AppState {
    /// Create new application state.
    pub fn new(service: IntakeService) -> Self {
        Self { service }
    }
}

/// Pick the extraction brain from the environment.
///
/// Uses Groq when `GROQ_API_KEY` is set and falls back to the offline
/// keyword brain otherwise.
pub fn brain_from_env() -> Result<Arc<dyn Brain>, BrainError> {
    match env::var("GROQ_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            let brain = GroqBrain::from_env()?;
            info!("Using Groq model {}", brain.config().model);
            Ok(Arc::new(brain))
        }
        _ => {
            warn!("GROQ_API_KEY not set; using offline keyword extraction");
            Ok(Arc::new(KeywordBrain::new()))
        }
    }
}
