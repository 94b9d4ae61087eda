//! Due-date and recurrence resolution for extracted tasks.
//!
//! Precedence, highest first:
//!
//! 1. Recurrence: a manual recurrence replaces the inferred one. With
//!    neither, the type is empty and the interval is 1.
//! 2. Date: a manual date is used verbatim for every task in the batch.
//! 3. Otherwise the inferred date is used, or the task stays unscheduled.
//! 4. An inferred date outside its category's window moves to the window
//!    start that day, or to the next opening if that start has passed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::context::SchedulingContext;
use crate::error::{Result, SchedulerError};
use crate::routine::{Routine, RoutineWindow};
use crate::time::parse_datetime;
use crate::types::{Category, Priority, Recurrence, RecurrenceType, TaskStatus};

/// A freshly extracted task, before scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftTask {
    pub title: String,
    pub category: Category,
    /// Estimated effort in minutes, always positive.
    pub estimated_time: u32,
    pub priority: Priority,
    /// Date-time proposed by extraction. Kept raw: unparseable values are
    /// treated as absent during resolution.
    #[serde(default, alias = "due_date")]
    pub inferred_due_date: Option<String>,
    #[serde(default, alias = "recurrence")]
    pub inferred_recurrence: Option<Recurrence>,
}

/// Caller-forced scheduling values for a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulingOverride {
    pub manual_date: Option<NaiveDateTime>,
    pub manual_recurrence: Option<Recurrence>,
}

impl SchedulingOverride {
    /// No overrides.
    pub fn none() -> Self {
        Self::default()
    }

    /// Force the due date. A bare date becomes midnight of that day.
    pub fn with_manual_date(mut self, value: &str) -> Result<Self> {
        let parsed =
            parse_datetime(value, None).ok_or_else(|| SchedulerError::InvalidDate(value.to_string()))?;
        self.manual_date = Some(parsed);
        Ok(self)
    }

    /// Force the recurrence rule.
    pub fn with_manual_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.manual_recurrence = Some(recurrence);
        self
    }
}

/// Where a resolved due date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    /// The caller's manual date.
    Manual,
    /// The inferred date, unchanged.
    Inferred,
    /// Moved to the category window's start on the inferred day.
    ClampedToWindow,
    /// The window start had passed; moved to the next opening.
    RolledForward,
    /// No usable date; the task stays unscheduled.
    Unscheduled,
}

/// The scheduling fields decided for one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub due_date: Option<NaiveDateTime>,
    pub recurrence_type: Option<RecurrenceType>,
    pub recurrence_interval: u32,
    pub source: DateSource,
}

/// A task ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTask {
    pub user_id: String,
    pub parent_id: Option<String>,
    pub title: String,
    pub category: Category,
    pub estimated_time: u32,
    pub priority: Priority,
    pub due_date: Option<NaiveDateTime>,
    pub recurrence_type: Option<RecurrenceType>,
    pub recurrence_interval: u32,
    pub status: TaskStatus,
}

impl ResolvedTask {
    /// Combine a draft with its resolution under `user_id`, as pending.
    pub fn new(user_id: impl Into<String>, draft: DraftTask, resolution: Resolution) -> Self {
        Self {
            user_id: user_id.into(),
            parent_id: None,
            title: draft.title,
            category: draft.category,
            estimated_time: draft.estimated_time,
            priority: draft.priority,
            due_date: resolution.due_date,
            recurrence_type: resolution.recurrence_type,
            recurrence_interval: resolution.recurrence_interval,
            status: TaskStatus::Pending,
        }
    }

    /// Attach the task under a parent.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Batch-path fallback: an unscheduled task becomes due at `now`.
    pub fn or_due_at(mut self, now: NaiveDateTime) -> Self {
        if self.due_date.is_none() {
            self.due_date = Some(now);
        }
        self
    }
}

/// Resolves drafts against one routine, one override set and one context.
///
/// Pure: the same inputs always produce the same output.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    routine: &'a Routine,
    overrides: &'a SchedulingOverride,
    context: &'a SchedulingContext,
}

impl<'a> Resolver<'a> {
    pub fn new(
        routine: &'a Routine,
        overrides: &'a SchedulingOverride,
        context: &'a SchedulingContext,
    ) -> Self {
        Self {
            routine,
            overrides,
            context,
        }
    }

    /// Decide the due date and recurrence for one draft.
    pub fn resolve(&self, draft: &DraftTask) -> Resolution {
        let (recurrence_type, recurrence_interval) = self.resolve_recurrence(draft);
        let (due_date, source) = self.resolve_due_date(draft);

        debug!(
            title = %draft.title,
            category = %draft.category,
            due_date = ?due_date,
            source = ?source,
            recurrence = ?recurrence_type,
            "Resolved task schedule"
        );

        Resolution {
            due_date,
            recurrence_type,
            recurrence_interval,
            source,
        }
    }

    /// Resolve a draft into a storable task owned by `user_id`.
    pub fn resolve_task(&self, user_id: &str, draft: DraftTask) -> ResolvedTask {
        let resolution = self.resolve(&draft);
        ResolvedTask::new(user_id, draft, resolution)
    }

    fn resolve_recurrence(&self, draft: &DraftTask) -> (Option<RecurrenceType>, u32) {
        match self.overrides.manual_recurrence.or(draft.inferred_recurrence) {
            Some(rule) => (Some(rule.kind), rule.interval),
            // The stored interval is 1 even without a recurrence type.
            None => (None, 1),
        }
    }

    fn resolve_due_date(&self, draft: &DraftTask) -> (Option<NaiveDateTime>, DateSource) {
        if let Some(manual) = self.overrides.manual_date {
            return (Some(manual), DateSource::Manual);
        }

        let Some(raw) = draft.inferred_due_date.as_deref() else {
            return (None, DateSource::Unscheduled);
        };

        let Some(inferred) = parse_datetime(raw, self.context.offset) else {
            warn!(title = %draft.title, value = %raw, "Ignoring unparseable inferred due date");
            return (None, DateSource::Unscheduled);
        };

        match self.routine.window_for(draft.category) {
            Some(window) => {
                let (due, source) = fit_to_window(window, inferred, self.context.now);
                (Some(due), source)
            }
            None => (Some(inferred), DateSource::Inferred),
        }
    }
}

/// Move `inferred` into `window`, never before `now`.
pub fn fit_to_window(
    window: &RoutineWindow,
    inferred: NaiveDateTime,
    now: NaiveDateTime,
) -> (NaiveDateTime, DateSource) {
    if window.contains(inferred.time()) {
        return (inferred, DateSource::Inferred);
    }

    let same_day = inferred.date().and_time(window.start_time);
    if same_day >= now {
        return (same_day, DateSource::ClampedToWindow);
    }

    (window.next_start(now), DateSource::RolledForward)
}
