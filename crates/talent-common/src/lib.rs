//! Talent Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared utilities for the talent management workspace.
//!
//! - **Logging**: subscriber setup shared by every binary
//!
//! # Example
//!
//! ```no_run
//! use talent_common::logging::{init_logging, LogConfig};
//!
//! let _guard = init_logging(&LogConfig::default()).expect("logging");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig};
