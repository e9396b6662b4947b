//! API error types with IntoResponse
//!
//! Errors become `{"error": <message>, "status": <code>}` bodies. Which
//! status a repository failure gets depends on the endpoint, so handlers
//! pick one of the `*_failed` constructors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::RepoError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { message: String },

    /// Write rejected by the store (400)
    BadRequest { message: String },

    /// Internal error (500, logged)
    Internal { message: String },
}

impl ApiError {
    /// Failure while listing or aggregating: anything unexpected is a 500.
    pub fn list_failed(err: RepoError) -> Self {
        match err {
            RepoError::Validation(e) => Self::Validation(e),
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }

    /// Failure on single-item fetch: the store reports a missing row as an
    /// error, so every failure here is a 404.
    pub fn lookup_failed(err: RepoError) -> Self {
        match err {
            RepoError::Validation(e) => Self::Validation(e),
            other => Self::NotFound {
                message: other.to_string(),
            },
        }
    }

    /// Failure on create/update/delete: 400, or 404 for an unknown id.
    pub fn write_failed(err: RepoError) -> Self {
        match err {
            RepoError::Validation(e) => Self::Validation(e),
            e @ RepoError::NotFound { .. } => Self::NotFound {
                message: e.to_string(),
            },
            other => Self::BadRequest {
                message: other.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { message }
            | Self::BadRequest { message }
            | Self::Internal { message } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", message);
        } else {
            tracing::debug!(status = status.as_u16(), "Request rejected: {}", message);
        }

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
