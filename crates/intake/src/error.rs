//! Error types for intake operations.

use brain_core::BrainError;
use database::{DatabaseError, ValidationError};
use scheduler::SchedulerError;
use thiserror::Error;

/// Errors that can occur while handling a user action.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// No authenticated user for the action.
    #[error("not authenticated")]
    Unauthenticated,

    /// The brain's output held no usable JSON object.
    #[error("extraction output was not valid JSON: {0}")]
    ExtractionFormat(String),

    /// An extracted or submitted task failed validation.
    #[error("invalid task: {0}")]
    InvalidTask(String),

    /// The requested parent cannot hold sub-tasks.
    #[error("invalid parent task: {0}")]
    InvalidParent(String),

    /// No predefined stack with that id.
    #[error("unknown stack: {0}")]
    UnknownStack(String),

    /// Scheduling input (local time, dates, routine) was rejected.
    #[error("scheduling error: {0}")]
    Scheduling(#[from] SchedulerError),

    /// Brain processing failed.
    #[error("brain error: {0}")]
    Brain(#[from] BrainError),

    /// Storage failed.
    #[error("storage error: {0}")]
    Database(#[from] DatabaseError),

    /// Request input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl IntakeError {
    /// Message safe to show the user.
    ///
    /// Extraction and storage failures are reported generically; the detailed
    /// error only goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            IntakeError::Unauthenticated => "You need to sign in first.".to_string(),
            IntakeError::ExtractionFormat(_) | IntakeError::Brain(_) => {
                "Could not organize your tasks. Please try again.".to_string()
            }
            IntakeError::Database(DatabaseError::NotFound { entity, .. }) => {
                format!("{} not found.", entity)
            }
            IntakeError::Database(DatabaseError::Validation(e)) => e.to_string(),
            IntakeError::Database(_) => "Could not save your changes. Please try again.".to_string(),
            IntakeError::InvalidTask(msg) | IntakeError::InvalidParent(msg) => msg.clone(),
            IntakeError::UnknownStack(id) => format!("Unknown stack: {}", id),
            IntakeError::Scheduling(e) => e.to_string(),
            IntakeError::Validation(e) => e.to_string(),
        }
    }

    /// Whether the failure was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            IntakeError::InvalidTask(_)
                | IntakeError::InvalidParent(_)
                | IntakeError::UnknownStack(_)
                | IntakeError::Scheduling(_)
                | IntakeError::Validation(_)
                | IntakeError::Database(DatabaseError::Validation(_))
        )
    }

    /// Whether the failure means a record does not exist for this user.
    pub fn is_not_found(&self) -> bool {
        matches!(self, IntakeError::Database(DatabaseError::NotFound { .. }))
    }
}

/// Result type for intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;
