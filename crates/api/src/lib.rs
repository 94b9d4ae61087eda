//! HTTP API for the brain dump task app.
//!
//! Every `/api` endpoint answers with an [`intake::ActionResult`] body. The caller
//! is identified by the `x-user-id` header. Only `/health` and the stack
//! listing answer without it; everything else returns `401`.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod session;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

pub use crate::state::AppState;

/// Build the application with state and request tracing attached.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
