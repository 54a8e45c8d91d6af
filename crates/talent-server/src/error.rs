//! Server-level error types
//!
//! Feature endpoints map their own error enums to responses; [`AppError`]
//! covers what sits underneath them: mediator dispatch and health reporting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::response::ErrorResponse;

/// Result type alias for server operations
pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request dispatch failed: {0}")]
    Dispatch(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Dispatch(_) => ErrorResponse::internal(&self),
            AppError::Unavailable(ref message) => {
                tracing::warn!("Service unavailable: {}", message);
                ErrorResponse::new("SERVICE_UNAVAILABLE", message.clone())
                    .with_status(StatusCode::SERVICE_UNAVAILABLE)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let dispatch = AppError::Dispatch("no handler".to_string()).into_response();
        assert_eq!(dispatch.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let unavailable = AppError::Unavailable("database".to_string()).into_response();
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
