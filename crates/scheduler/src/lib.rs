//! Routine-aware scheduling for Organize.
//!
//! This crate decides when an extracted task is due. It provides:
//!
//! - [`Category`], [`Priority`], [`RecurrenceType`], [`TaskStatus`] - closed
//!   enumerations validated at every boundary
//! - [`RoutineWindow`] / [`Routine`] - per-category availability windows
//! - [`Resolver`] - merges inferred dates, manual overrides and routine
//!   windows into a final due date and recurrence
//! - [`SchedulingContext`] - the explicit "now" for one request
//!
//! Nothing here performs I/O.
//!
//! # Example
//!
//! ```rust
//! use scheduler::{
//!     Category, DraftTask, Priority, Resolver, Routine, RoutineWindow, SchedulingContext,
//!     SchedulingOverride,
//! };
//!
//! let routine = Routine::new(vec![
//!     RoutineWindow::parse(Category::Work, "09:00", "18:00").unwrap(),
//! ])
//! .unwrap();
//! let overrides = SchedulingOverride::none();
//! let ctx = SchedulingContext::from_local_time("2026-10-18T08:00:00", None).unwrap();
//!
//! let draft = DraftTask {
//!     title: "Call supplier".to_string(),
//!     category: Category::Work,
//!     estimated_time: 15,
//!     priority: Priority::High,
//!     inferred_due_date: Some("2026-10-18T20:00:00".to_string()),
//!     inferred_recurrence: None,
//! };
//!
//! let resolution = Resolver::new(&routine, &overrides, &ctx).resolve(&draft);
//! assert_eq!(
//!     resolution.due_date.map(scheduler::time::format_datetime).as_deref(),
//!     Some("2026-10-18T09:00:00")
//! );
//! ```

mod context;
mod error;
mod resolver;
mod routine;
pub mod time;
mod types;

pub use context::SchedulingContext;
pub use error::{Result, SchedulerError};
pub use resolver::{
    fit_to_window, DateSource, DraftTask, Resolution, ResolvedTask, Resolver, SchedulingOverride,
};
pub use routine::{Routine, RoutineWindow};
pub use types::{Category, Priority, Recurrence, RecurrenceType, TaskStatus};

// Re-export chrono so callers build contexts with the same version.
pub use chrono;
