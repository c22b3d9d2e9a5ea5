use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use common::types::ApiResponse;
use service::errors::ServiceError;

/// Boundary error: wraps a service error and renders the response envelope.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            ServiceError::AlreadyVoted
            | ServiceError::InvalidOption
            | ServiceError::PollClosed
            | ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            // internal detail is logged, never sent to the caller
            ServiceError::Persistence(_) | ServiceError::MalformedStore(_) => {
                error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ApiResponse::error(message))).into_response()
    }
}
