//! Database error handling utilities
//!
//! Helpers for turning unique and foreign key violations into feature errors.
//!
//! # Examples
//!
//! ```rust,ignore
//! use talent_server::features::shared::error_helpers::map_constraint_violation;
//!
//! insert_position(&pool, &write).await.map_err(|e| {
//!     map_constraint_violation(
//!         e,
//!         CreatePositionError::DuplicateNumber(number.clone()),
//!         CreatePositionError::DepartmentNotFound(department_id),
//!         CreatePositionError::Database,
//!     )
//! })?;
//! ```

use axum::response::Response;
use sqlx::Error as SqlxError;

use crate::api::response::ErrorResponse;
use crate::db::ListQueryError;

/// Kind of constraint a database error violated
#[derive(Debug)]
pub enum ConstraintViolation {
    UniqueViolation,
    ForeignKeyViolation,
    /// No constraint violation, some other error occurred
    Other(SqlxError),
}

pub fn check_constraint_violation(error: SqlxError) -> ConstraintViolation {
    if let SqlxError::Database(ref db_err) = error {
        if db_err.is_unique_violation() {
            return ConstraintViolation::UniqueViolation;
        }
        if db_err.is_foreign_key_violation() {
            return ConstraintViolation::ForeignKeyViolation;
        }
    }
    ConstraintViolation::Other(error)
}

/// Check if the error is a unique constraint violation
pub fn is_unique_violation(error: &SqlxError) -> bool {
    if let SqlxError::Database(db_err) = error {
        return db_err.is_unique_violation();
    }
    false
}

/// Return `unique_error` on a unique violation, otherwise wrap the error
pub fn map_unique_violation<E, F>(error: SqlxError, unique_error: E, default_wrapper: F) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    if is_unique_violation(&error) {
        unique_error
    } else {
        default_wrapper(error)
    }
}

/// Map unique and foreign key violations, wrapping anything else
pub fn map_constraint_violation<E, F>(
    error: SqlxError,
    unique_error: E,
    fk_error: E,
    default_wrapper: F,
) -> E
where
    F: FnOnce(SqlxError) -> E,
{
    match check_constraint_violation(error) {
        ConstraintViolation::UniqueViolation => unique_error,
        ConstraintViolation::ForeignKeyViolation => fk_error,
        ConstraintViolation::Other(e) => default_wrapper(e),
    }
}

/// Response for a failed list or shaping request
///
/// Bad field names and order clauses are the caller's fault (400). Database
/// failures are logged and reported without detail.
pub fn list_query_error_response(error: &ListQueryError) -> Response {
    match error {
        ListQueryError::InvalidField { .. } | ListQueryError::InvalidOrderBy { .. } => {
            ErrorResponse::validation(error.to_string())
        },
        ListQueryError::Database(e) => ErrorResponse::database(e),
    }
}
