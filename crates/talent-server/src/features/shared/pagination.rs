//! Shared pagination utilities
//!
//! Page-number/page-size paging used by the REST list queries, and the
//! metadata returned alongside each page.
//!
//! # Examples
//!
//! ```rust,ignore
//! use talent_server::features::shared::pagination::{PaginationMetadata, PaginationParams};
//!
//! let params = PaginationParams::new(Some(2), Some(20));
//! params.validate()?;
//!
//! // After fetching data...
//! let metadata = PaginationMetadata::from_params(&params, 100);
//! ```

use serde::{Deserialize, Serialize};

/// Page size used when the request does not name one
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a REST list request may ask for
pub const MAX_PAGE_SIZE: i64 = 100;

/// Largest page number whose offset still fits in an `i64` at [`MAX_PAGE_SIZE`]
pub const MAX_PAGE_NUMBER: i64 = i64::MAX / MAX_PAGE_SIZE + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("Page number must be between 1 and {MAX_PAGE_NUMBER}")]
    InvalidPageNumber,
    #[error("Page size must be between 1 and {MAX_PAGE_SIZE}")]
    InvalidPageSize,
}

/// Page-number/page-size request parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// 1-indexed page number. Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,

    /// Items per page. Defaults to [`DEFAULT_PAGE_SIZE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    pub fn new(page_number: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Page number, defaulting to 1
    pub fn page_number(&self) -> i64 {
        self.page_number.unwrap_or(1).max(1)
    }

    /// Page size, defaulting to [`DEFAULT_PAGE_SIZE`] and clamped to 1..=[`MAX_PAGE_SIZE`]
    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page_number() - 1).saturating_mul(self.page_size())
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        if let Some(page) = self.page_number {
            if !(1..=MAX_PAGE_NUMBER).contains(&page) {
                return Err(PaginationError::InvalidPageNumber);
            }
        }
        if let Some(size) = self.page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&size) {
                return Err(PaginationError::InvalidPageSize);
            }
        }
        Ok(())
    }
}

/// Pagination metadata for list responses
///
/// `total` counts the records that matched the filter, so `pages` reflects
/// what the client can actually page through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub page_number: i64,
    pub page_size: i64,
    pub total: i64,
    pub pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMetadata {
    pub fn new(page_number: i64, page_size: i64, total: i64) -> Self {
        let pages = if total == 0 || page_size <= 0 {
            0
        } else {
            (total + page_size - 1) / page_size
        };

        Self {
            page_number,
            page_size,
            total,
            pages,
            has_next: page_number < pages,
            has_prev: page_number > 1,
        }
    }

    pub fn from_params(params: &PaginationParams, total: i64) -> Self {
        Self::new(params.page_number(), params.page_size(), total)
    }
}
