//! The per-request scheduling context.

use chrono::{FixedOffset, NaiveDate, NaiveDateTime};

use crate::error::{Result, SchedulerError};
use crate::time::parse_with_offset;

/// Immutable snapshot of "now" for one resolution pass.
///
/// Built once per request from what the client reports and passed to the
/// resolver explicitly; nothing is read from the process clock inside the
/// resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingContext {
    /// The user's current local wall-clock time.
    pub now: NaiveDateTime,
    /// The user's UTC offset, when known.
    pub offset: Option<FixedOffset>,
}

impl SchedulingContext {
    /// Context with a known local time and no offset information.
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now, offset: None }
    }

    /// Attach a UTC offset.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Build a context from the client's reported local time.
    ///
    /// An RFC 3339 string contributes its own offset; `utc_offset_minutes`
    /// (minutes east of UTC) takes precedence when given.
    pub fn from_local_time(local_time: &str, utc_offset_minutes: Option<i32>) -> Result<Self> {
        let (now, parsed_offset) = parse_with_offset(local_time)
            .ok_or_else(|| SchedulerError::InvalidLocalTime(local_time.to_string()))?;

        let offset = match utc_offset_minutes {
            Some(minutes) => Some(
                FixedOffset::east_opt(minutes.saturating_mul(60))
                    .ok_or_else(|| SchedulerError::InvalidLocalTime(format!("offset {minutes}")))?,
            ),
            None => parsed_offset,
        };

        Ok(Self { now, offset })
    }

    /// The user's current calendar day.
    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}
