//! API response types
//!
//! Standard envelopes shared by every endpoint. DataTables endpoints use
//! their own envelope, see `features::shared::datatables`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Standard success response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new success response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    /// Create a success response with metadata
    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    /// 400 `VALIDATION_ERROR`
    pub fn validation(message: impl Into<String>) -> Response {
        Self::new("VALIDATION_ERROR", message).with_status(StatusCode::BAD_REQUEST)
    }

    /// 404 `NOT_FOUND`
    pub fn not_found(message: impl Into<String>) -> Response {
        Self::new("NOT_FOUND", message).with_status(StatusCode::NOT_FOUND)
    }

    /// 409 `CONFLICT`
    pub fn conflict(message: impl Into<String>) -> Response {
        Self::new("CONFLICT", message).with_status(StatusCode::CONFLICT)
    }

    /// 500 `INTERNAL_ERROR`; the cause is logged, never returned
    pub fn internal(cause: &dyn std::fmt::Display) -> Response {
        tracing::error!("Internal error: {}", cause);
        Self::new("INTERNAL_ERROR", "An internal error occurred")
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// 500 `INTERNAL_ERROR` for database failures
    pub fn database(cause: &dyn std::fmt::Display) -> Response {
        tracing::error!("Database error: {}", cause);
        Self::new("INTERNAL_ERROR", "A database error occurred")
            .with_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization_skips_missing_meta() {
        let body = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "missing")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "missing");
    }

    #[test]
    fn test_error_statuses() {
        assert_eq!(ErrorResponse::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorResponse::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorResponse::database(&"boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
