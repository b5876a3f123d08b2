//! API error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use browserhands_runtime::SessionError;

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Request body could not be read as the expected JSON.
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Error body: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Session(err) => match err {
                SessionError::UnsupportedProvider(_) | SessionError::MissingCredential { .. } => {
                    StatusCode::BAD_REQUEST
                }
                SessionError::CapacityExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
                SessionError::NotFound(_) => StatusCode::NOT_FOUND,
                SessionError::Duplicate(_) | SessionError::EngineConstruction(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::InvalidRequest { status, .. } => *status,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Session(SessionError::NotFound(_)) => "Session not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Error creating task: {}", self);
        }
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}

/// Errors starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
