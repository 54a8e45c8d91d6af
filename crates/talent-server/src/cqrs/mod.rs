//! Mediator wiring
//!
//! Every command and query is registered here with a closure that clones the
//! pool into its feature handler.

pub use mediator::DefaultAsyncMediator;
use sqlx::PgPool;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(pool: PgPool) -> AppMediator {
    DefaultAsyncMediator::builder()
        // Positions
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::positions::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::positions::queries::paged::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::positions::queries::get::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::positions::commands::create::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::positions::commands::update::handle(pool, cmd).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::positions::commands::delete::handle(pool, cmd).await }
            }
        })
        // Departments
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::departments::queries::list::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |query| {
                let pool = pool.clone();
                async move { crate::features::departments::queries::get::handle(pool, query).await }
            }
        })
        .add_handler({
            let pool = pool.clone();
            move |cmd| {
                let pool = pool.clone();
                async move { crate::features::departments::commands::create::handle(pool, cmd).await }
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::positions::queries::{GetPositionsError, GetPositionsQuery};
    use crate::features::shared::pagination::PaginationError;
    use sqlx::postgres::PgPoolOptions;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_query_reaches_registered_handler() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/talent_unused")
            .unwrap();
        let mediator = build_mediator(pool);

        let query = GetPositionsQuery {
            page_size: Some(0),
            ..Default::default()
        };
        let result = middleware::send_query(&mediator, query).await.unwrap();

        assert!(matches!(
            result,
            Err(GetPositionsError::Pagination(PaginationError::InvalidPageSize))
        ));
    }
}
