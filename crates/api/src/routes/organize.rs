//! Brain dump intake endpoint.

use axum::extract::State;
use database::Task;
use intake::{ActionResult, OrganizeRequest};

use crate::error::Result;
use crate::extract::Json;
use crate::session::Session;
use crate::state::AppState;

/// Extract, schedule and store the tasks in a brain dump.
pub async fn organize(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(request): Json<OrganizeRequest>,
) -> Result<Json<ActionResult<Vec<Task>>>> {
    let tasks = state.service.organize(&ctx, request).await?;
    Ok(Json(ActionResult::ok(tasks)))
}
