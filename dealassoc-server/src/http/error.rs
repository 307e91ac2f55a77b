//! API error types with IntoResponse
//!
//! Every failure becomes `{"success": false, "error": <message>}`.
//! Callers must check `success`: a failed listing still answers 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StorageError;
use crate::models::ValidationError;

/// Message returned for a verb the route does not serve
pub const INVALID_METHOD_MESSAGE: &str = "Invalid request method.";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Missing fields or unreadable body (400)
    Validation(ValidationError),

    /// Store rejected a write, uniqueness conflicts included (500)
    Storage(StorageError),

    /// Store failed while listing (200 with `success: false`)
    ListUnavailable(StorageError),

    /// Wrong HTTP verb for the route (405)
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ListUnavailable(_) => StatusCode::OK,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Validation(e) => e.to_string(),
            Self::Storage(e) => {
                if e.is_constraint_violation() {
                    tracing::warn!("Constraint violation: {}", e);
                } else {
                    tracing::error!("Storage error: {}", e);
                }
                e.to_string()
            }
            Self::ListUnavailable(e) => {
                tracing::error!("Listing failed: {}", e);
                e.to_string()
            }
            Self::MethodNotAllowed => INVALID_METHOD_MESSAGE.to_owned(),
        };

        let body = json!({
            "success": false,
            "error": message
        });

        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let response = ApiError::Validation(ValidationError::MissingFields).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": "Email and deal_id are required."})
        );
    }

    #[tokio::test]
    async fn constraint_violation_is_500_with_message() {
        let err = ApiError::from(StorageError::ConstraintViolation {
            constraint: None,
            message: "duplicate key".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"success": false, "error": "duplicate key"})
        );
    }

    #[tokio::test]
    async fn list_failure_keeps_200() {
        let err = ApiError::ListUnavailable(StorageError::Backend("connection refused".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], json!(false));
    }

    #[tokio::test]
    async fn method_not_allowed_is_405() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await["error"],
            json!(INVALID_METHOD_MESSAGE)
        );
    }
}
