use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::report::ValidationError;

/// Request-level failure taxonomy. Every variant maps to a single JSON error
/// body (`{"detail": "..."}`) so clients never see a partially-typed response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("vision model is not configured")]
    VisionUnavailable,

    #[error("vision model call failed: {0}")]
    UpstreamTransient(anyhow::Error),

    #[error("analysis result failed validation: {0}")]
    Validation(#[from] ValidationError),

    #[error("storage is not configured")]
    StorageUnavailable,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::VisionUnavailable | ApiError::StorageUnavailable => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::UpstreamTransient(_) => StatusCode::BAD_GATEWAY,
            ApiError::Validation(_) | ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_per_variant() {
        assert_eq!(
            ApiError::InvalidInput("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::VisionUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::StorageUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::UpstreamTransient(anyhow::anyhow!("quota")).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn invalid_input_keeps_its_message() {
        let err = ApiError::InvalidInput("expected an image/* upload".into());
        assert_eq!(err.to_string(), "expected an image/* upload");
    }
}
