//! Error types for brain operations.

use thiserror::Error;

/// Errors that can occur while a brain produces a completion.
#[derive(Debug, Error)]
pub enum BrainError {
    /// The brain is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the service or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered but the request failed.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The service is temporarily unavailable (rate limits, 5xx).
    #[error("brain unavailable: {0}")]
    Unavailable(String),

    /// A timeout occurred during processing.
    #[error("processing timed out")]
    Timeout,

    /// The brain has been shut down.
    #[error("brain shut down")]
    ShutDown,
}

impl BrainError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BrainError::Network(_) | BrainError::Unavailable(_) | BrainError::Timeout
        )
    }
}
