//! Predefined task stacks.

use axum::extract::{Path, State};
use database::Task;
use intake::{ActionResult, Stack, STACKS};

use super::ClientClock;
use crate::error::Result;
use crate::extract::Json;
use crate::session::Session;
use crate::state::AppState;

/// List the available stacks.
pub async fn list() -> Json<ActionResult<&'static [Stack]>> {
    Json(ActionResult::ok(STACKS))
}

/// Add every task of a stack to the caller's list.
pub async fn apply(
    State(state): State<AppState>,
    Session(ctx): Session,
    Path(id): Path<String>,
    clock: Option<Json<ClientClock>>,
) -> Result<Json<ActionResult<Vec<Task>>>> {
    let clock = clock.map(|Json(clock)| clock).unwrap_or_default();
    let scheduling = clock.scheduling()?;
    let tasks = state.service.apply_stack(&ctx, &scheduling, &id).await?;
    Ok(Json(ActionResult::ok(tasks)))
}
