//! Scrollyteller server — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use scrollyteller_core::error::StoryError;
use serde::Serialize;
use thiserror::Error;

/// Startup errors for the preview server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The story manifest could not be read or parsed.
    #[error("invalid manifest {path}: {reason}")]
    Manifest {
        /// Manifest location.
        path: String,
        /// Underlying failure description.
        reason: String,
    },

    /// The story failed to build or render.
    #[error("story error: {0}")]
    Story(#[from] StoryError),

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

/// HTTP-layer wrapper around `StoryError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub StoryError);

impl From<StoryError> for ApiError {
    fn from(err: StoryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self.0 {
            StoryError::SectionNotFound(_) => (StatusCode::NOT_FOUND, "section_not_found"),
            StoryError::UnknownStep { .. } => (StatusCode::BAD_REQUEST, "unknown_step"),
            StoryError::ConfigValidation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            StoryError::NotRendered => (StatusCode::CONFLICT, "not_rendered"),
            StoryError::UnsupportedFormat { .. }
            | StoryError::Fetch { .. }
            | StoryError::Parse { .. }
            | StoryError::InvalidNarrationShape(_) => (StatusCode::BAD_GATEWAY, "source_error"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
