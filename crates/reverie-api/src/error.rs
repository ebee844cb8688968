//! Reverie — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use reverie_content::ScriptError;
use reverie_core::error::StageError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The scene script could not be loaded.
    #[error("script error: {0}")]
    Script(#[from] ScriptError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `StageError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub StageError);

impl From<StageError> for ApiError {
    fn from(err: StageError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            StageError::SceneNotFound(_) => (StatusCode::NOT_FOUND, "scene_not_found"),
            StageError::DuplicateScene(_) => (StatusCode::CONFLICT, "duplicate_scene"),
            StageError::SceneFault { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "scene_fault"),
            StageError::SurfaceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "surface_unavailable")
            }
            StageError::StageClosed => (StatusCode::SERVICE_UNAVAILABLE, "stage_closed"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
