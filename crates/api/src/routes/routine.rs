//! Routine endpoints.

use axum::extract::State;
use intake::ActionResult;
use scheduler::{Routine, RoutineWindow};
use serde::Deserialize;

use crate::error::Result;
use crate::extract::Json;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveRoutine {
    pub windows: Vec<RoutineWindow>,
}

/// The caller's routine windows.
pub async fn get(
    State(state): State<AppState>,
    Session(ctx): Session,
) -> Result<Json<ActionResult<Routine>>> {
    let routine = state.service.get_routine(&ctx).await?;
    Ok(Json(ActionResult::ok(routine)))
}

/// Replace the caller's routine.
pub async fn save(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<SaveRoutine>,
) -> Result<Json<ActionResult<Routine>>> {
    let routine = state.service.save_routine(&ctx, body.windows).await?;
    Ok(Json(ActionResult::ok(routine)))
}
