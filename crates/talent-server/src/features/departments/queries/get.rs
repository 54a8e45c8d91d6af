use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::departments::{get_department, DepartmentRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetDepartmentQuery {
    pub id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDepartmentError {
    #[error("Department '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DepartmentRecord, GetDepartmentError>> for GetDepartmentQuery {}

impl crate::cqrs::middleware::Query for GetDepartmentQuery {
    const NAME: &'static str = "GetDepartment";
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetDepartmentQuery,
) -> Result<DepartmentRecord, GetDepartmentError> {
    get_department(&pool, query.id)
        .await?
        .ok_or(GetDepartmentError::NotFound(query.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestDepartment;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_found_and_missing(pool: PgPool) -> sqlx::Result<()> {
        let dept = TestDepartment::new("Research").insert(&pool).await?;

        let record = handle(pool.clone(), GetDepartmentQuery { id: dept.id }).await.unwrap();
        assert_eq!(record.name, "Research");

        let missing = handle(pool.clone(), GetDepartmentQuery { id: Uuid::new_v4() }).await;
        assert!(matches!(missing, Err(GetDepartmentError::NotFound(_))));
        Ok(())
    }
}
