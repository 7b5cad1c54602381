//! Error type for the non-hook endpoints.
//!
//! Hook endpoints never fail (they fall back to the original body); listing and
//! configuration can, and report `{"error": "..."}` with a matching status.

use automem_service::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum ApiError {
    /// Caller sent something unusable.
    BadRequest(String),
    /// Store or endpoint is temporarily unavailable; the caller may retry.
    ServiceUnavailable(String),
    /// Anything else. The cause is logged, the client sees a fixed message.
    Internal(anyhow::Error),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match *self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg) | Self::ServiceUnavailable(msg) => msg,
            Self::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                "internal server error".to_owned()
            },
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_transient() {
            return Self::ServiceUnavailable(err.to_string());
        }
        match err {
            ServiceError::InvalidInput(msg) => Self::BadRequest(msg),
            other => Self::Internal(other.into()),
        }
    }
}
