//! Database models.
//!
//! Enumerated fields (category, priority, recurrence, status) are stored as
//! their lowercase wire names; typed parsing happens in the caller.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Random v4 UUID.
    pub id: String,
    /// Owner.
    pub user_id: String,
    /// Parent task for sub-tasks; top-level tasks have none.
    pub parent_id: Option<String>,
    pub title: String,
    pub category: String,
    /// Minutes.
    pub estimated_time: i64,
    pub priority: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM:SS`.
    pub due_date: Option<String>,
    pub recurrence_type: Option<String>,
    pub recurrence_interval: Option<i64>,
    /// "pending" or "done".
    pub status: String,
    /// SQLite `datetime('now')` at insert.
    pub created_at: String,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status == "done"
    }
}

/// A task ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub category: String,
    pub estimated_time: i64,
    pub priority: String,
    pub due_date: Option<String>,
    pub recurrence_type: Option<String>,
    pub recurrence_interval: Option<i64>,
    pub status: String,
}

/// Partial update of a task.
///
/// Only these fields may change after creation. `None` leaves a field as is;
/// `due_date: Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<Option<String>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

/// A stored routine window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoutineRow {
    pub category: String,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
}
