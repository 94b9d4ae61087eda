//! The intake service: every user action behind one type.

use std::sync::Arc;

use brain_core::prompt::extraction_prompt;
use brain_core::{hash_prompt, Brain, BrainRequest, ExtractionContext};
use database::{routine, task, Database, NewTask, RoutineRow, Task, TaskUpdate, ValidationError};
use scheduler::chrono::FixedOffset;
use scheduler::time::{format_datetime, format_time_of_day, parse_datetime};
use scheduler::{
    Category, DraftTask, Priority, Recurrence, ResolvedTask, Resolver, Routine, RoutineWindow,
    SchedulerError, SchedulingContext, SchedulingOverride, TaskStatus,
};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::context::RequestContext;
use crate::error::{IntakeError, Result};
use crate::extraction::{parse_suggestions, parse_tasks};
use crate::stacks::find_stack;

/// A brain dump submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrganizeRequest {
    /// Free text describing one or more tasks.
    pub text: String,
    /// The client's local time, e.g. `2026-10-18T08:00:00`.
    pub local_time: String,
    /// Timezone label, only shown to the model.
    #[serde(default)]
    pub timezone: String,
    /// Minutes east of UTC, when the client knows it.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
    /// Due date forced on every extracted task.
    #[serde(default)]
    pub manual_date: Option<String>,
    /// Recurrence forced on every extracted task.
    #[serde(default)]
    pub manual_recurrence: Option<Recurrence>,
}

/// Editable task fields. Anything else in a request body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Absent leaves the date alone; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
    /// The caller's UTC offset in minutes east. Dates carrying their own
    /// offset are shifted into it; never stored.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Runs user actions against one database and one brain.
#[derive(Clone)]
pub struct IntakeService {
    db: Database,
    brain: Arc<dyn Brain>,
}

impl IntakeService {
    pub fn new(db: Database, brain: Arc<dyn Brain>) -> Self {
        info!("Intake service using brain: {}", brain.name());
        Self { db, brain }
    }

    /// Name of the configured brain.
    pub fn brain_name(&self) -> &str {
        self.brain.name()
    }

    /// Whether the configured brain reports itself ready.
    pub async fn brain_ready(&self) -> bool {
        self.brain.is_ready().await
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Turn a brain dump into stored tasks.
    ///
    /// The brain only splits and describes tasks. Manual overrides and the
    /// user's routine windows are applied afterwards by the resolver. If the
    /// brain's output cannot be parsed nothing is stored.
    pub async fn organize(&self, ctx: &RequestContext, request: OrganizeRequest) -> Result<Vec<Task>> {
        let user_id = ctx.require_user()?;

        let text = request.text.trim();
        if text.is_empty() {
            return Err(ValidationError::Empty("text".to_string()).into());
        }

        let scheduling =
            SchedulingContext::from_local_time(&request.local_time, request.utc_offset_minutes)?;

        let mut overrides = SchedulingOverride::none();
        if let Some(date) = request.manual_date.as_deref().filter(|d| !d.trim().is_empty()) {
            overrides = overrides.with_manual_date(date.trim())?;
        }
        if let Some(recurrence) = request.manual_recurrence {
            overrides = overrides.with_manual_recurrence(recurrence);
        }

        let routine = self.load_routine(user_id).await?;

        let system = extraction_prompt(&ExtractionContext {
            local_time: request.local_time.clone(),
            timezone: request.timezone.clone(),
        });
        debug!("Extraction prompt fingerprint: {}", hash_prompt(&system));

        info!(
            "Organizing brain dump for {} ({} chars) with {}",
            user_id,
            text.chars().count(),
            self.brain.name()
        );

        let response = self
            .brain
            .process(BrainRequest::extract_tasks(system, text))
            .await?;
        let drafts = parse_tasks(&response)?;

        if drafts.is_empty() {
            info!("Brain found no tasks for {}", user_id);
            return Ok(Vec::new());
        }

        let resolver = Resolver::new(&routine, &overrides, &scheduling);
        let new_tasks: Vec<NewTask> = drafts
            .into_iter()
            .map(|draft| to_new_task(resolver.resolve_task(user_id, draft)))
            .collect();

        let stored = task::insert_tasks(self.db.pool(), &new_tasks).await?;
        info!("Stored {} task(s) for {}", stored.len(), user_id);
        Ok(stored)
    }

    /// Ask the brain for sub-task ideas. Nothing is stored.
    pub async fn suggest_subtasks(&self, ctx: &RequestContext, title: &str) -> Result<Vec<DraftTask>> {
        let user_id = ctx.require_user()?;

        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty("title".to_string()).into());
        }

        debug!("Requesting sub-task suggestions for {}", user_id);
        let response = self.brain.process(BrainRequest::suggest_subtasks(title)).await?;
        let suggestions = parse_suggestions(&response)?;

        info!("Got {} suggestion(s) for \"{}\"", suggestions.len(), title);
        Ok(suggestions)
    }

    /// Store one task, optionally under a parent.
    ///
    /// The parent must be the caller's own top-level task. The draft's date is
    /// kept as given; no routine window or default date applies.
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        scheduling: &SchedulingContext,
        draft: DraftTask,
        parent_id: Option<&str>,
    ) -> Result<Task> {
        let user_id = ctx.require_user()?;

        let routine = Routine::empty();
        let overrides = SchedulingOverride::none();
        let mut resolved = Resolver::new(&routine, &overrides, scheduling).resolve_task(user_id, draft);

        if let Some(parent_id) = parent_id {
            self.check_parent(user_id, parent_id).await?;
            resolved = resolved.with_parent(parent_id);
        }

        let stored = task::insert_task(self.db.pool(), &to_new_task(resolved)).await?;
        debug!("Created task {} for {}", stored.id, user_id);
        Ok(stored)
    }

    /// Store several tasks at once. Undated tasks become due now.
    ///
    /// All tasks are stored or none are.
    pub async fn create_batch(
        &self,
        ctx: &RequestContext,
        scheduling: &SchedulingContext,
        drafts: Vec<DraftTask>,
    ) -> Result<Vec<Task>> {
        let user_id = ctx.require_user()?;

        let routine = self.load_routine(user_id).await?;
        let overrides = SchedulingOverride::none();
        let resolver = Resolver::new(&routine, &overrides, scheduling);

        let new_tasks: Vec<NewTask> = drafts
            .into_iter()
            .map(|draft| to_new_task(resolver.resolve_task(user_id, draft).or_due_at(scheduling.now)))
            .collect();

        let stored = task::insert_tasks(self.db.pool(), &new_tasks).await?;
        info!("Created batch of {} task(s) for {}", stored.len(), user_id);
        Ok(stored)
    }

    /// Apply a predefined stack; every task is due now.
    pub async fn apply_stack(
        &self,
        ctx: &RequestContext,
        scheduling: &SchedulingContext,
        stack_id: &str,
    ) -> Result<Vec<Task>> {
        ctx.require_user()?;

        let stack = find_stack(stack_id).ok_or_else(|| IntakeError::UnknownStack(stack_id.to_string()))?;
        info!("Applying stack {}", stack.id);
        self.create_batch(ctx, scheduling, stack.drafts()).await
    }

    /// Change title, category, priority or due date of the caller's task.
    pub async fn update_task(&self, ctx: &RequestContext, id: &str, patch: TaskPatch) -> Result<Task> {
        let user_id = ctx.require_user()?;

        let due_date = match patch.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) if raw.trim().is_empty() => Some(None),
            Some(Some(raw)) => {
                let offset = patch
                    .utc_offset_minutes
                    .map(|minutes| {
                        FixedOffset::east_opt(minutes.saturating_mul(60))
                            .ok_or_else(|| SchedulerError::InvalidLocalTime(format!("offset {minutes}")))
                    })
                    .transpose()?;
                let parsed = parse_datetime(&raw, offset)
                    .ok_or_else(|| SchedulerError::InvalidDate(raw.clone()))?;
                Some(Some(format_datetime(parsed)))
            }
        };

        let update = TaskUpdate {
            title: patch.title,
            category: patch.category.map(|c| c.as_str().to_string()),
            priority: patch.priority.map(|p| p.as_str().to_string()),
            due_date,
        };

        if update.is_empty() {
            return Ok(task::get_task(self.db.pool(), user_id, id).await?);
        }

        Ok(task::update_task(self.db.pool(), user_id, id, &update).await?)
    }

    /// Mark the caller's task done or pending.
    pub async fn set_status(&self, ctx: &RequestContext, id: &str, done: bool) -> Result<Task> {
        let user_id = ctx.require_user()?;
        let status = TaskStatus::from_done(done);
        Ok(task::set_status(self.db.pool(), user_id, id, status.as_str()).await?)
    }

    /// Delete the caller's task and its sub-tasks.
    pub async fn delete_task(&self, ctx: &RequestContext, id: &str) -> Result<()> {
        let user_id = ctx.require_user()?;
        task::delete_task(self.db.pool(), user_id, id).await?;
        info!("Deleted task {} for {}", id, user_id);
        Ok(())
    }

    /// One of the caller's tasks.
    pub async fn get_task(&self, ctx: &RequestContext, id: &str) -> Result<Task> {
        let user_id = ctx.require_user()?;
        Ok(task::get_task(self.db.pool(), user_id, id).await?)
    }

    /// The caller's tasks, newest first.
    pub async fn list_tasks(&self, ctx: &RequestContext) -> Result<Vec<Task>> {
        let user_id = ctx.require_user()?;
        Ok(task::list_tasks(self.db.pool(), user_id).await?)
    }

    /// Replace the caller's routine with `windows`.
    pub async fn save_routine(&self, ctx: &RequestContext, windows: Vec<RoutineWindow>) -> Result<Routine> {
        let user_id = ctx.require_user()?;

        let routine = Routine::new(windows)?;
        let rows: Vec<RoutineRow> = routine
            .windows()
            .iter()
            .map(|window| RoutineRow {
                category: window.category.as_str().to_string(),
                start_time: format_time_of_day(window.start_time),
                end_time: format_time_of_day(window.end_time),
            })
            .collect();

        let stored = routine::replace_routine(self.db.pool(), user_id, &rows).await?;
        info!("Saved routine for {} ({} window(s))", user_id, stored.len());
        to_routine(stored)
    }

    /// The caller's current routine; empty if none was saved.
    pub async fn get_routine(&self, ctx: &RequestContext) -> Result<Routine> {
        let user_id = ctx.require_user()?;
        self.load_routine(user_id).await
    }

    async fn load_routine(&self, user_id: &str) -> Result<Routine> {
        let rows = routine::list_routine(self.db.pool(), user_id).await?;
        to_routine(rows)
    }

    async fn check_parent(&self, user_id: &str, parent_id: &str) -> Result<()> {
        let parent = task::get_task(self.db.pool(), user_id, parent_id)
            .await
            .map_err(|e| match e {
                database::DatabaseError::NotFound { .. } => {
                    IntakeError::InvalidParent(format!("task {} does not exist", parent_id))
                }
                other => IntakeError::Database(other),
            })?;

        if parent.parent_id.is_some() {
            return Err(IntakeError::InvalidParent(
                "sub-tasks cannot have sub-tasks".to_string(),
            ));
        }
        Ok(())
    }
}

/// Rebuild a routine from stored rows, skipping rows that no longer parse.
fn to_routine(rows: Vec<RoutineRow>) -> Result<Routine> {
    let windows = rows
        .into_iter()
        .filter_map(|row| {
            let window = row
                .category
                .parse::<Category>()
                .and_then(|category| RoutineWindow::parse(category, &row.start_time, &row.end_time));
            match window {
                Ok(window) => Some(window),
                Err(e) => {
                    warn!("Skipping stored routine window {:?}: {}", row, e);
                    None
                }
            }
        })
        .collect();
    Ok(Routine::new(windows)?)
}

fn to_new_task(resolved: ResolvedTask) -> NewTask {
    NewTask {
        user_id: resolved.user_id,
        parent_id: resolved.parent_id,
        title: resolved.title,
        category: resolved.category.as_str().to_string(),
        estimated_time: i64::from(resolved.estimated_time),
        priority: resolved.priority.as_str().to_string(),
        due_date: resolved.due_date.map(format_datetime),
        recurrence_type: resolved.recurrence_type.map(|kind| kind.as_str().to_string()),
        recurrence_interval: Some(i64::from(resolved.recurrence_interval)),
        status: resolved.status.as_str().to_string(),
    }
}
