//! Task intake pipeline and storage-confirmed task actions.
//!
//! This crate provides the [`IntakeService`] type which turns brain dumps
//! into stored tasks and carries out every other user action.
//!
//! # Architecture
//!
//! ```text
//! Brain dump + local time + overrides
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      INTAKE SERVICE                         │
//! │                                                             │
//! │  1. Require an authenticated user                           │
//! │         ↓                                                   │
//! │  2. Build the extraction prompt (local time, timezone)      │
//! │         ↓                                                   │
//! │  3. Ask the brain; slice first '{' to last '}'              │
//! │         ↓                                                   │
//! │  4. Validate fields into DraftTasks (whole batch or none)   │
//! │         ↓                                                   │
//! │  5. Resolve due dates with overrides + routine windows      │
//! │         ↓                                                   │
//! │  6. Insert all tasks as pending in one transaction          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use intake::{IntakeService, OrganizeRequest, RequestContext};
//!
//! let service = IntakeService::new(db, Arc::new(brain));
//! let ctx = RequestContext::authenticated("user-1");
//!
//! let tasks = service
//!     .organize(&ctx, OrganizeRequest {
//!         text: "buy eggs, call the supplier tomorrow".to_string(),
//!         local_time: "2026-10-18T08:00:00".to_string(),
//!         timezone: "America/Sao_Paulo".to_string(),
//!         utc_offset_minutes: None,
//!         manual_date: None,
//!         manual_recurrence: None,
//!     })
//!     .await?;
//! ```

mod context;
mod error;
pub mod extraction;
mod result;
mod service;
pub mod stacks;

pub use context::RequestContext;
pub use error::{IntakeError, Result};
pub use result::ActionResult;
pub use service::{IntakeService, OrganizeRequest, TaskPatch};
pub use stacks::{find_stack, Stack, StackTask, STACKS};
