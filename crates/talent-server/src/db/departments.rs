//! Department repository

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::query::{fetch_page, ContainsAny, ListQueryError, ListRequest, ShapedPage};
use super::view::{FieldDef, FieldKind, ViewModel};

/// Fields exposed by the department list endpoint
pub const DEPARTMENT_VIEW: ViewModel = ViewModel {
    entity: "department",
    source: "departments d",
    fields: &[
        FieldDef::new("id", "d.id", FieldKind::Uuid),
        FieldDef::new("name", "d.name", FieldKind::Text),
        FieldDef::new("createdAt", "d.created_at", FieldKind::Timestamp),
    ],
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentListParams {
    pub page_number: i64,
    pub page_size: Option<i64>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
    pub name: Option<String>,
}

#[tracing::instrument(skip(pool))]
pub async fn get_paged_departments(
    pool: &PgPool,
    params: &DepartmentListParams,
) -> Result<ShapedPage, ListQueryError> {
    let filter = ContainsAny::new().or_contains("d.name", params.name.as_deref());
    let request = ListRequest {
        page_number: params.page_number,
        page_size: params.page_size,
        order_by: params.order_by.as_deref(),
        fields: params.fields.as_deref(),
    };
    fetch_page(pool, &DEPARTMENT_VIEW, &filter, &request).await
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub async fn get_department(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<DepartmentRecord>, sqlx::Error> {
    sqlx::query_as::<_, DepartmentRecord>(
        "SELECT id, name, created_at, updated_at FROM departments WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn department_name_exists(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM departments WHERE LOWER(name) = LOWER($1))",
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn insert_department(pool: &PgPool, name: &str) -> Result<DepartmentRecord, sqlx::Error> {
    sqlx::query_as::<_, DepartmentRecord>(
        r#"
        INSERT INTO departments (name)
        VALUES ($1)
        RETURNING id, name, created_at, updated_at
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::TestDepartment;

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_paged_departments_filter_by_name(pool: PgPool) -> sqlx::Result<()> {
        for name in ["Engineering", "Human Resources", "Sales Engineering"] {
            TestDepartment::new(name).insert(&pool).await?;
        }

        let params = DepartmentListParams {
            page_number: 1,
            page_size: Some(10),
            order_by: Some("name desc".to_string()),
            fields: Some("name".to_string()),
            name: Some("engineering".to_string()),
        };

        let page = get_paged_departments(&pool, &params).await.unwrap();
        assert_eq!(page.counts.records_total, 3);
        assert_eq!(page.counts.records_filtered, 2);
        assert_eq!(page.data[0]["name"], "Sales Engineering");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_insert_and_lookup(pool: PgPool) -> sqlx::Result<()> {
        let created = insert_department(&pool, "Research").await?;
        assert!(department_name_exists(&pool, "research").await?);

        let fetched = get_department(&pool, created.id).await?.unwrap();
        assert_eq!(fetched.name, "Research");
        assert!(get_department(&pool, Uuid::new_v4()).await?.is_none());
        Ok(())
    }
}
