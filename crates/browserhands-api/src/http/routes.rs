//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{cancel_task, create_task, task_status};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the main router.
///
/// ## Route Structure
///
/// ```text
/// /tasks
///   POST   /tasks              - Start task
///   GET    /tasks/{session_id} - Query task status
///   DELETE /tasks/{session_id} - Cancel task
///
/// /health  - Health check
/// /        - Endpoint index
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let task_routes = Router::new()
        .route("/", post(create_task))
        .route("/{session_id}", get(task_status).delete(cancel_task));

    Router::new()
        .route("/", get(monitoring::index))
        .route("/health", get(monitoring::health_check))
        .nest("/tasks", task_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
