//! Task API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use browserhands_runtime::{NewTask, SessionSnapshot, SessionStatus};

use crate::error::ApiError;
use crate::http::extract::ApiJson;
use crate::state::{AppState, TaskDefaults};

/// Request to start a browser automation task.
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    /// The task for the browser agent to perform.
    pub task: String,

    /// LLM provider: openai, anthropic, google.
    pub llm_provider: Option<String>,

    pub model: Option<String>,

    /// Maximum steps for task execution.
    pub max_steps: Option<u32>,

    /// Run the browser without a window.
    pub headless: Option<bool>,

    /// Let the agent see screenshots.
    pub use_vision: Option<bool>,
}

impl TaskRequest {
    fn into_new_task(self, defaults: &TaskDefaults) -> NewTask {
        NewTask {
            task: self.task,
            provider: self.llm_provider.unwrap_or_else(|| defaults.provider.clone()),
            model: self.model.unwrap_or_else(|| defaults.model.clone()),
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
            headless: self.headless.unwrap_or(defaults.headless),
            use_vision: self.use_vision.unwrap_or(defaults.use_vision),
        }
    }
}

/// Response to a started task.
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

/// Polled session state.
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub status: SessionStatus,
    pub current_step: u32,
    pub max_steps: u32,
    pub final_result: Option<String>,
    pub error: Option<String>,
}

impl From<SessionSnapshot> for SessionStatusResponse {
    fn from(snap: SessionSnapshot) -> Self {
        Self {
            session_id: snap.id,
            status: snap.status,
            current_step: snap.current_step,
            max_steps: snap.max_steps,
            final_result: snap.final_result,
            error: snap.error,
        }
    }
}

/// Response to a cancellation.
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub message: String,
}

/// Start a task in the background.
///
/// POST /tasks
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<TaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    info!("Task request: task={}", req.task);

    let session_id = state
        .manager
        .create_task(req.into_new_task(&state.defaults))
        .await?;

    Ok(Json(TaskResponse {
        message: format!("Task started with session ID: {}", session_id),
        session_id,
        status: "started".to_string(),
    }))
}

/// Get the status of a task.
///
/// GET /tasks/{session_id}
pub async fn task_status(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionStatusResponse>, ApiError> {
    let snapshot = state.manager.status(&session_id)?;
    Ok(Json(snapshot.into()))
}

/// Cancel a task and release its browser.
///
/// DELETE /tasks/{session_id}
pub async fn cancel_task(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<CancelResponse>, ApiError> {
    state.manager.cancel(&session_id).await?;

    Ok(Json(CancelResponse {
        message: format!("Task {} cancelled successfully", session_id),
    }))
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
