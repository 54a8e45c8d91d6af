//! Feature modules implementing the talent management API
//!
//! Each feature is a vertical slice with its own commands, queries and
//! routes. Route handlers build a request and send it through the mediator;
//! the request's handler function owns validation and database access.
//!
//! # Features
//!
//! - **positions**: position listing (REST and DataTables) and CRUD
//! - **departments**: department listing, lookup and creation
//!
//! # Architecture
//!
//! Each feature module follows the structure:
//! - `commands/` - Write operations (create, update, delete)
//! - `queries/` - Read operations (get, list, paged)
//! - `routes.rs` - HTTP route definitions and error mapping

pub mod departments;
pub mod positions;
pub mod shared;

use axum::Router;

use crate::cqrs::AppMediator;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// PostgreSQL connection pool
    pub db: sqlx::PgPool,
    /// Dispatches commands and queries to their handlers
    pub mediator: AppMediator,
}

impl FeatureState {
    pub fn new(db: sqlx::PgPool) -> Self {
        let mediator = crate::cqrs::build_mediator(db.clone());
        Self { db, mediator }
    }
}

/// Creates the API router with all feature routes mounted
///
/// - `/positions` - Position management and DataTables paging
/// - `/departments` - Department management
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/positions", positions::positions_routes())
        .nest("/departments", departments::departments_routes())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::response::Response;
    use sqlx::postgres::PgPoolOptions;

    use super::FeatureState;

    /// State whose pool never connects unless a query is actually run
    pub fn lazy_state() -> FeatureState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/talent_unused")
            .unwrap();
        FeatureState::new(pool)
    }

    pub async fn read_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
