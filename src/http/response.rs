//! Response handling.
//!
//! # Responsibilities
//! - Define the error kinds a handler can surface
//! - Map each kind to a status code and a JSON error body
//!
//! # Design Decisions
//! - Error bodies are always `{"error": "<message>"}`
//! - Successful responses are plain `Json<T>`; no envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Errors surfaced by the movie API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("movie {0} not found")]
    NotFound(String),

    #[error("malformed movie body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(status = %status, error = %self, "Request rejected");
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body() {
        let response = ApiError::NotFound("9".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "movie 9 not found");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MalformedBody("eof".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
