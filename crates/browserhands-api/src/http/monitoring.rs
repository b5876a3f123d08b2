//! Health check and index handlers.

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub active_sessions: usize,
    pub max_sessions: usize,
    pub version: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        active_sessions: state.manager.active_sessions(),
        max_sessions: state.manager.max_sessions(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>BrowserHands API</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 40px; }
        .container { max-width: 800px; margin: 0 auto; }
        .endpoint { background: #f5f5f5; padding: 15px; margin: 10px 0; border-radius: 5px; }
        code { background: #e0e0e0; padding: 2px 4px; border-radius: 3px; }
    </style>
</head>
<body>
    <div class="container">
        <h1>BrowserHands API</h1>
        <p>AI-powered browser automation service</p>
        <h2>Endpoints</h2>
        <div class="endpoint">
            <h3>POST /tasks</h3>
            <p>Start a browser automation task</p>
            <p><strong>Body:</strong> <code>{"task": "your task description"}</code></p>
        </div>
        <div class="endpoint">
            <h3>GET /tasks/{session_id}</h3>
            <p>Poll the status of a task</p>
        </div>
        <div class="endpoint">
            <h3>DELETE /tasks/{session_id}</h3>
            <p>Cancel a task and close its browser</p>
        </div>
        <div class="endpoint">
            <h3>GET /health</h3>
            <p>Service health check</p>
        </div>
    </div>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[cfg(test)]
#[path = "monitoring_tests.rs"]
mod tests;
