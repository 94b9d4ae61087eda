//! The uniform action result.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::IntakeError;

/// Outcome of a user action: either data or a user-facing error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T, IntakeError>> for ActionResult<T> {
    fn from(result: Result<T, IntakeError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => {
                if err.is_client_error() || matches!(err, IntakeError::Unauthenticated) {
                    warn!("Action rejected: {}", err);
                } else {
                    error!("Action failed: {}", err);
                }
                Self::failure(err.user_message())
            }
        }
    }
}
