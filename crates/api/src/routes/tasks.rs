//! Task endpoints.

use axum::extract::{Path, State};
use database::Task;
use intake::{ActionResult, TaskPatch};
use scheduler::DraftTask;
use serde::{Deserialize, Serialize};

use super::ClientClock;
use crate::error::Result;
use crate::extract::Json;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTask {
    #[serde(flatten)]
    pub draft: DraftTask,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(flatten)]
    pub clock: ClientClock,
}

#[derive(Debug, Deserialize)]
pub struct CreateBatch {
    pub tasks: Vec<DraftTask>,
    #[serde(flatten)]
    pub clock: ClientClock,
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

/// List the caller's tasks, newest first.
pub async fn list(
    State(state): State<AppState>,
    Session(ctx): Session,
) -> Result<Json<ActionResult<Vec<Task>>>> {
    let tasks = state.service.list_tasks(&ctx).await?;
    Ok(Json(ActionResult::ok(tasks)))
}

/// Create one task, optionally as a sub-task.
pub async fn create(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<CreateTask>,
) -> Result<Json<ActionResult<Task>>> {
    let scheduling = body.clock.scheduling()?;
    let task = state
        .service
        .create_task(&ctx, &scheduling, body.draft, body.parent_id.as_deref())
        .await?;
    Ok(Json(ActionResult::ok(task)))
}

/// Create several tasks at once.
pub async fn create_batch(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<CreateBatch>,
) -> Result<Json<ActionResult<Vec<Task>>>> {
    let scheduling = body.clock.scheduling()?;
    let tasks = state.service.create_batch(&ctx, &scheduling, body.tasks).await?;
    Ok(Json(ActionResult::ok(tasks)))
}

/// Edit a task's title, category, priority or due date.
pub async fn update(
    State(state): State<AppState>,
    Session(ctx): Session,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<ActionResult<Task>>> {
    let task = state.service.update_task(&ctx, &id, patch).await?;
    Ok(Json(ActionResult::ok(task)))
}

/// Mark a task done or pending.
pub async fn set_status(
    State(state): State<AppState>,
    Session(ctx): Session,
    Path(id): Path<String>,
    Json(body): Json<StatusChange>,
) -> Result<Json<ActionResult<Task>>> {
    let task = state.service.set_status(&ctx, &id, body.done).await?;
    Ok(Json(ActionResult::ok(task)))
}

/// Delete a task and its sub-tasks.
pub async fn delete(
    State(state): State<AppState>,
    Session(ctx): Session,
    Path(id): Path<String>,
) -> Result<Json<ActionResult<Deleted>>> {
    state.service.delete_task(&ctx, &id).await?;
    Ok(Json(ActionResult::ok(Deleted { id })))
}

/// Suggest sub-tasks for an existing task. Nothing is stored.
pub async fn suggestions(
    State(state): State<AppState>,
    Session(ctx): Session,
    Path(id): Path<String>,
) -> Result<Json<ActionResult<Vec<DraftTask>>>> {
    let task = state.service.get_task(&ctx, &id).await?;
    let suggestions = state.service.suggest_subtasks(&ctx, &task.title).await?;
    Ok(Json(ActionResult::ok(suggestions)))
}
