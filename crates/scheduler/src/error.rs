//! Error types for routine and scheduling input.

use chrono::NaiveTime;
use thiserror::Error;

use crate::types::Category;

/// Errors raised while building routines or scheduling inputs.
///
/// Resolution itself never fails; these only come from constructing the
/// values the resolver consumes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// A time-of-day string could not be parsed.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    /// A window whose start is not before its end.
    #[error("{category} window must start before it ends ({start} >= {end})")]
    EmptyWindow {
        category: Category,
        start: NaiveTime,
        end: NaiveTime,
    },

    /// More than one window for the same category.
    #[error("duplicate routine window for {0}")]
    DuplicateCategory(Category),

    /// The caller's reported local time could not be parsed.
    #[error("invalid local time: {0}")]
    InvalidLocalTime(String),

    /// A caller-supplied date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A recurrence interval below 1.
    #[error("recurrence interval must be at least 1")]
    InvalidInterval,

    /// A value outside one of the closed enumerations.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Result type for scheduler operations.
pub type Result<T> = std::result::Result<T, SchedulerError>;
