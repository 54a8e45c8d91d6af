//! Talent Management API
//!
//! HTTP server exposing positions and departments with paged, filtered,
//! sorted and field-shaped list endpoints.
//!
//! # Architecture
//!
//! The server follows a **CQRS** layout:
//!
//! - **Routes** (`features::*::routes`) build a command or query from the
//!   request and send it through the mediator
//! - **Handlers** (`features::*::{commands,queries}`) validate, call the
//!   repositories and return typed results
//! - **Repositories** (`db`) compose the list pipeline: count, filter, count
//!   filtered, order, project, page, then shape each row
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: PostgreSQL access and migrations
//! - **mediator**: request dispatch
//! - **Tower**: middleware
//!
//! # Example
//!
//! ```no_run
//! use talent_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::migrate(&pool).await?;
//!     api::serve(config, pool).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod middleware;

pub use error::{AppError, AppResult};
