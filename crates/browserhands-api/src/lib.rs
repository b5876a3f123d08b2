//! # BrowserHands API
//!
//! HTTP boundary for the session lifecycle manager.
//!
//! ```text
//! POST   /tasks        - start a browser automation task
//! GET    /tasks/{id}   - poll task status
//! DELETE /tasks/{id}   - cancel a task
//! GET    /health       - service health
//! GET    /             - endpoint index
//! ```
//!
//! Handlers only translate between JSON and
//! [`SessionLifecycleManager`](browserhands_runtime::SessionLifecycleManager)
//! calls. Task execution happens on background tokio tasks owned by the runtime.

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::{ApiError, ServerError};
pub use http::routes::create_router;
pub use server::{ApiConfig, ApiServer};
pub use state::{AppState, TaskDefaults};
