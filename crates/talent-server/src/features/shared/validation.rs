//! Shared validation utilities
//!
//! Provides common validation functions for command input.
//!
//! # Examples
//!
//! ```rust,ignore
//! use talent_server::features::shared::validation::{validate_required, validate_salary};
//!
//! validate_required("positionNumber", &command.position_number, 100)?;
//! validate_salary(command.position_salary)?;
//! ```

use thiserror::Error;

/// Errors that can occur while validating a required text field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextValidationError {
    #[error("{field} is required and cannot be empty")]
    Required { field: &'static str },

    #[error("{field} must be between 1 and {max_length} characters")]
    TooLong {
        field: &'static str,
        max_length: usize,
    },
}

/// Errors that can occur while validating a salary
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SalaryValidationError {
    #[error("positionSalary must be a finite number")]
    NotFinite,

    #[error("positionSalary cannot be negative (got {0})")]
    Negative(f64),

    #[error("positionSalary exceeds the maximum of {max}")]
    TooLarge { max: f64 },
}

/// Largest value that fits a NUMERIC(12,2) column
pub const MAX_SALARY: f64 = 9_999_999_999.99;

/// Validate a required text field
///
/// # Rules
/// - Must not be empty (after trimming whitespace)
/// - Must not exceed `max_length` characters
pub fn validate_required(
    field: &'static str,
    value: &str,
    max_length: usize,
) -> Result<(), TextValidationError> {
    if value.trim().is_empty() {
        return Err(TextValidationError::Required { field });
    }

    if value.chars().count() > max_length {
        return Err(TextValidationError::TooLong { field, max_length });
    }

    Ok(())
}

/// Validate a position salary
pub fn validate_salary(salary: f64) -> Result<(), SalaryValidationError> {
    if !salary.is_finite() {
        return Err(SalaryValidationError::NotFinite);
    }
    if salary < 0.0 {
        return Err(SalaryValidationError::Negative(salary));
    }
    if salary > MAX_SALARY {
        return Err(SalaryValidationError::TooLarge { max: MAX_SALARY });
    }
    Ok(())
}

/// Trim a free-text value, mapping blank strings to `None`
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_valid() {
        assert!(validate_required("name", "Engineering", 250).is_ok());
        assert!(validate_required("name", "a", 1).is_ok());
    }

    #[test]
    fn test_validate_required_blank() {
        assert_eq!(
            validate_required("name", "   ", 250),
            Err(TextValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn test_validate_required_counts_characters() {
        assert!(validate_required("name", "ééé", 3).is_ok());
        assert_eq!(
            validate_required("name", "abcd", 3),
            Err(TextValidationError::TooLong {
                field: "name",
                max_length: 3
            })
        );
    }

    #[test]
    fn test_validate_salary() {
        assert!(validate_salary(0.0).is_ok());
        assert!(validate_salary(85_000.5).is_ok());
        assert_eq!(validate_salary(-1.0), Err(SalaryValidationError::Negative(-1.0)));
        assert_eq!(validate_salary(f64::NAN), Err(SalaryValidationError::NotFinite));
        assert!(matches!(
            validate_salary(1e12),
            Err(SalaryValidationError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  text ".into())), Some("text".into()));
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(None), None);
    }
}
