//! Route handlers for the API.

pub mod health;
pub mod organize;
pub mod routine;
pub mod stacks;
pub mod tasks;

use axum::routing::{get, patch, post};
use axum::Router;
use scheduler::chrono::Local;
use scheduler::SchedulingContext;
use serde::Deserialize;

use crate::error::Result;
use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Brain dump intake
        .route("/api/organize", post(organize::organize))
        // Tasks
        .route("/api/tasks", get(tasks::list).post(tasks::create))
        .route("/api/tasks/batch", post(tasks::create_batch))
        .route("/api/tasks/:id", patch(tasks::update).delete(tasks::delete))
        .route("/api/tasks/:id/status", post(tasks::set_status))
        .route("/api/tasks/:id/suggestions", post(tasks::suggestions))
        // Stacks
        .route("/api/stacks", get(stacks::list))
        .route("/api/stacks/:id", post(stacks::apply))
        // Routine
        .route("/api/routine", get(routine::get).put(routine::save))
}

/// The client's clock, sent alongside task bodies.
#[derive(Debug, Default, Deserialize)]
pub struct ClientClock {
    #[serde(default)]
    pub local_time: Option<String>,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl ClientClock {
    /// Scheduling context for this request. Falls back to the server's
    /// local clock when the client sent no time.
    pub fn scheduling(&self) -> Result<SchedulingContext> {
        match self.local_time.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(local_time) => Ok(SchedulingContext::from_local_time(
                local_time,
                self.utc_offset_minutes,
            )
            .map_err(intake::IntakeError::from)?),
            None => Ok(SchedulingContext::new(Local::now().naive_local())),
        }
    }
}
