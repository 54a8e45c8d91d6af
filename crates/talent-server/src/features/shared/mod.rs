//! Shared utilities and types for feature modules
//!
//! # Contents
//!
//! - **datatables**: DataTables server-side processing request/response types
//! - **pagination**: Page-number paging and response metadata
//! - **validation**: Input validation utilities
//! - **error_helpers**: Database constraint violation mapping
//! - **test_helpers**: Test fixtures (test-only)

pub mod datatables;
pub mod error_helpers;
pub mod pagination;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;

pub use datatables::{Column, DataTableResponse, PageWindow, Search, SortOrder};
pub use pagination::{PaginationError, PaginationMetadata, PaginationParams};
