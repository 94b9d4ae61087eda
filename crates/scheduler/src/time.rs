//! Permissive parsing of the date and time strings that reach the scheduler.
//!
//! Model output and client input are loosely formatted, so every parser here
//! tries a short list of shapes and returns `None` (or an error for
//! caller-supplied values) rather than guessing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, SchedulerError};

/// Wire format for resolved due dates (local wall-clock time).
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Wire format for routine window bounds.
pub const TIME_FORMAT: &str = "%H:%M";

const NAIVE_DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    // pt-BR `toLocaleString` output, day first.
    "%d/%m/%Y, %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y, %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Parse a time of day in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| SchedulerError::InvalidTime(value.to_string()))
}

/// Format a time of day as `HH:MM`.
pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Format a local date-time in the due-date wire format.
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Parse a date-time string into the user's local wall-clock time.
///
/// Strings carrying an offset are shifted into `local_offset` when it is
/// known; otherwise their own wall-clock value is kept. A bare date means
/// midnight of that day. Returns `None` for anything unrecognised.
pub fn parse_datetime(value: &str, local_offset: Option<FixedOffset>) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(match local_offset {
            Some(offset) => with_offset.with_timezone(&offset).naive_local(),
            None => with_offset.naive_local(),
        });
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a date-time together with the offset it was written in, if any.
pub(crate) fn parse_with_offset(value: &str) -> Option<(NaiveDateTime, Option<FixedOffset>)> {
    let value = value.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some((with_offset.naive_local(), Some(*with_offset.offset())));
    }
    parse_datetime(value, None).map(|naive| (naive, None))
}
