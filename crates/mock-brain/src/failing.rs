//! Failing brain implementation - every request errors.

use brain_core::{async_trait, Brain, BrainError, BrainRequest, BrainResponse};

/// What a [`FailingBrain`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Unavailable,
    Timeout,
    ProcessingFailed,
}

/// A brain that never answers.
///
/// Useful for checking that callers surface a generic error and write
/// nothing when extraction is impossible.
#[derive(Debug, Clone)]
pub struct FailingBrain {
    mode: FailureMode,
}

impl FailingBrain {
    pub fn new(mode: FailureMode) -> Self {
        Self { mode }
    }

    pub fn unavailable() -> Self {
        Self::new(FailureMode::Unavailable)
    }

    pub fn timeout() -> Self {
        Self::new(FailureMode::Timeout)
    }
}

#[async_trait]
impl Brain for FailingBrain {
    async fn process(&self, _request: BrainRequest) -> Result<BrainResponse, BrainError> {
        Err(match self.mode {
            FailureMode::Unavailable => BrainError::Unavailable("scripted outage".to_string()),
            FailureMode::Timeout => BrainError::Timeout,
            FailureMode::ProcessingFailed => {
                BrainError::ProcessingFailed("scripted failure".to_string())
            }
        })
    }

    fn name(&self) -> &str {
        "FailingBrain"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
