//! Input validation for task fields.

use std::fmt;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value too long.
    TooLong { field: String, max: usize, actual: usize },
    /// Empty value where one is required.
    Empty(String),
    /// Number that must be greater than zero.
    NotPositive { field: String, value: i64 },
    /// Value outside a fixed set.
    NotAllowed { field: String, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::TooLong { field, max, actual } => {
                write!(f, "{} is too long ({} chars, max {})", field, actual, max)
            }
            ValidationError::Empty(field) => write!(f, "{} cannot be empty", field),
            ValidationError::NotPositive { field, value } => {
                write!(f, "{} must be positive (got {})", field, value)
            }
            ValidationError::NotAllowed { field, value } => {
                write!(f, "{} has an unsupported value: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Maximum allowed length for task titles, in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Allowed task status values.
pub const STATUSES: [&str; 2] = ["pending", "done"];

/// Validate a task title.
///
/// The title is trimmed first; it must not be empty and must not exceed
/// [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Empty("title".to_string()));
    }

    let chars = title.chars().count();
    if chars > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LENGTH,
            actual: chars,
        });
    }

    Ok(())
}

/// Validate an estimated time in minutes.
pub fn validate_estimated_time(minutes: i64) -> Result<(), ValidationError> {
    if minutes <= 0 {
        return Err(ValidationError::NotPositive {
            field: "estimated_time".to_string(),
            value: minutes,
        });
    }
    Ok(())
}

/// Validate a task status.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    if !STATUSES.contains(&status) {
        return Err(ValidationError::NotAllowed {
            field: "status".to_string(),
            value: status.to_string(),
        });
    }
    Ok(())
}
