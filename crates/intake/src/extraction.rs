//! Parsing brain output into draft tasks.
//!
//! The model may wrap its JSON in prose, so the object is taken from the
//! first `{` to the last `}`. Every field is then checked against the closed
//! enumerations before anything reaches the resolver.

use brain_core::BrainResponse;
use database::validation::validate_title;
use scheduler::{Category, DraftTask, Priority, Recurrence, RecurrenceType};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{IntakeError, Result};

/// Estimate used when the model gives none.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 15;

/// A task object as the model writes it. Everything is optional and loosely
/// typed; [`RawTask::into_draft`] decides what is acceptable.
#[derive(Debug, Default, Deserialize)]
struct RawTask {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    estimated_time: Option<Value>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<Value>,
    #[serde(default)]
    recurrence_type: Option<String>,
    #[serde(default)]
    recurrence_interval: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TaskList {
    tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
struct SuggestionList {
    suggestions: Vec<RawTask>,
}

/// Slice out the outermost JSON object candidate.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a `{"tasks": [...]}` completion into drafts.
///
/// An empty list is valid. One invalid task fails the whole batch.
pub fn parse_tasks(response: &BrainResponse) -> Result<Vec<DraftTask>> {
    let list: TaskList = parse_object(&response.text)?;
    debug!("Extracted {} raw task(s)", list.tasks.len());
    into_drafts(list.tasks)
}

/// Parse a `{"suggestions": [...]}` completion into drafts.
pub fn parse_suggestions(response: &BrainResponse) -> Result<Vec<DraftTask>> {
    let list: SuggestionList = parse_object(&response.text)?;
    into_drafts(list.suggestions)
}

fn parse_object<T: for<'de> Deserialize<'de>>(text: &str) -> Result<T> {
    let json = extract_json(text)
        .ok_or_else(|| IntakeError::ExtractionFormat(format!("no JSON object in: {}", text)))?;

    serde_json::from_str(json).map_err(|e| {
        IntakeError::ExtractionFormat(format!("parse error: {}, response was: {}", e, text))
    })
}

fn into_drafts(raw: Vec<RawTask>) -> Result<Vec<DraftTask>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, task)| task.into_draft(index))
        .collect()
}

impl RawTask {
    fn into_draft(self, index: usize) -> Result<DraftTask> {
        let position = index + 1;

        let title = self.title.unwrap_or_default().trim().to_string();
        validate_title(&title)
            .map_err(|e| IntakeError::InvalidTask(format!("task {}: {}", position, e)))?;

        let estimated_time = minutes(self.estimated_time.as_ref())
            .map_err(|msg| IntakeError::InvalidTask(format!("task {}: {}", position, msg)))?;

        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => Category::default(),
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!(title = %title, value, "Unknown category, using {}", Category::default());
                Category::default()
            }),
        };

        let priority = match self.priority.as_deref().map(str::trim) {
            None | Some("") => Priority::default(),
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!(title = %title, value, "Unknown priority, using {}", Priority::default());
                Priority::default()
            }),
        };

        let inferred_due_date = match self.due_date {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Null) | None => None,
            Some(other) => {
                warn!(title = %title, value = %other, "Ignoring non-string due date");
                None
            }
        };

        let inferred_recurrence = self
            .recurrence_type
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| match value.parse::<RecurrenceType>() {
                Ok(kind) => Some(kind),
                Err(_) => {
                    warn!(title = %title, value, "Unknown recurrence type, ignoring");
                    None
                }
            })
            .map(|kind| recurrence(kind, self.recurrence_interval.as_ref()));

        Ok(DraftTask {
            title,
            category,
            estimated_time,
            priority,
            inferred_due_date,
            inferred_recurrence,
        })
    }
}

/// Read a whole number from a JSON number or numeric string.
fn whole_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.round() as i64))
        }
        _ => None,
    }
}

fn minutes(value: Option<&Value>) -> std::result::Result<u32, String> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Ok(DEFAULT_ESTIMATED_MINUTES);
    };

    let n = whole_number(value).ok_or_else(|| format!("estimated_time is not a number: {}", value))?;
    if n <= 0 {
        return Err(format!("estimated_time must be positive (got {})", n));
    }
    Ok(u32::try_from(n).unwrap_or(u32::MAX))
}

fn recurrence(kind: RecurrenceType, interval: Option<&Value>) -> Recurrence {
    let interval = interval.and_then(whole_number).unwrap_or(1);
    match u32::try_from(interval).ok().and_then(|n| Recurrence::new(kind, n).ok()) {
        Some(rule) => rule,
        None => {
            warn!(interval, "Invalid recurrence interval, using 1");
            Recurrence::every(kind)
        }
    }
}
