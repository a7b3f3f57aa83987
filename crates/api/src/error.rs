//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use enrollments::EnrollmentError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed caller identity.
    #[error("{0}")]
    Unauthorized(&'static str),

    #[error(transparent)]
    Service(#[from] EnrollmentError),
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Service(EnrollmentError::NotFound) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Service(EnrollmentError::RequestError { .. }) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            Self::Service(EnrollmentError::Lookup(_) | EnrollmentError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let message = if status.is_server_error() {
            error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}
