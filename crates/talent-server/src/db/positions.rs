//! Position repository
//!
//! # Key Operations
//!
//! - `get_paged_positions()` - filtered, sorted, shaped page of positions
//! - `get_position()` - single position with its department name
//! - `position_number_exists()` - uniqueness pre-check for commands
//! - `insert_position()` / `update_position()` / `delete_position()`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::query::{fetch_page, ContainsAny, ListQueryError, ListRequest, ShapedPage};
use super::view::{FieldDef, FieldKind, ViewModel};

/// Fields exposed by position list endpoints
pub const POSITION_VIEW: ViewModel = ViewModel {
    entity: "position",
    source: "positions p JOIN departments d ON d.id = p.department_id",
    fields: &[
        FieldDef::new("id", "p.id", FieldKind::Uuid),
        FieldDef::new("positionNumber", "p.position_number", FieldKind::Text),
        FieldDef::new("positionTitle", "p.position_title", FieldKind::Text),
        FieldDef::new("positionDescription", "p.position_description", FieldKind::Text)
            .unsortable(),
        FieldDef::new("positionSalary", "p.position_salary", FieldKind::Decimal),
        FieldDef::new("departmentId", "p.department_id", FieldKind::Uuid),
        FieldDef::new("departmentName", "d.name", FieldKind::Text)
            .with_aliases(&["department", "Department.Name"]),
        FieldDef::new("createdAt", "p.created_at", FieldKind::Timestamp),
    ],
};

/// Validated list request for positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionListParams {
    pub page_number: i64,
    /// `None` returns every matching position
    pub page_size: Option<i64>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
    pub position_number: Option<String>,
    pub position_title: Option<String>,
    pub department: Option<String>,
}

impl PositionListParams {
    /// OR-combined substring filter over number, title and department name
    pub fn filter(&self) -> ContainsAny {
        ContainsAny::new()
            .or_contains("p.position_number", self.position_number.as_deref())
            .or_contains("p.position_title", self.position_title.as_deref())
            .or_contains("d.name", self.department.as_deref())
    }

    fn list_request(&self) -> ListRequest<'_> {
        ListRequest {
            page_number: self.page_number,
            page_size: self.page_size,
            order_by: self.order_by.as_deref(),
            fields: self.fields.as_deref(),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn get_paged_positions(
    pool: &PgPool,
    params: &PositionListParams,
) -> Result<ShapedPage, ListQueryError> {
    let filter = params.filter();
    fetch_page(pool, &POSITION_VIEW, &filter, &params.list_request()).await
}

/// A position joined with its department
///
/// Serialized with the same field names as [`POSITION_VIEW`] so it can be
/// shaped like a list row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub id: Uuid,
    pub position_number: String,
    pub position_title: String,
    pub position_description: Option<String>,
    pub position_salary: f64,
    pub department_id: Uuid,
    pub department_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const SELECT_POSITION: &str = r#"
    SELECT p.id, p.position_number, p.position_title, p.position_description,
           p.position_salary::FLOAT8 AS position_salary,
           p.department_id, d.name AS department_name,
           p.created_at, p.updated_at
    FROM positions p
    JOIN departments d ON d.id = p.department_id
"#;

pub async fn get_position(pool: &PgPool, id: Uuid) -> Result<Option<PositionRecord>, sqlx::Error> {
    sqlx::query_as::<_, PositionRecord>(&format!("{} WHERE p.id = $1", SELECT_POSITION))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Whether another position already uses `position_number`
pub async fn position_number_exists(
    pool: &PgPool,
    position_number: &str,
    excluding: Option<Uuid>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM positions
            WHERE position_number = $1
              AND ($2::UUID IS NULL OR id <> $2)
        )
        "#,
    )
    .bind(position_number)
    .bind(excluding)
    .fetch_one(pool)
    .await
}

/// Column values written by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct PositionWrite {
    pub position_number: String,
    pub position_title: String,
    pub position_description: Option<String>,
    pub position_salary: f64,
    pub department_id: Uuid,
}

pub async fn insert_position(pool: &PgPool, write: &PositionWrite) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO positions
            (position_number, position_title, position_description, position_salary, department_id)
        VALUES ($1, $2, $3, $4::FLOAT8::NUMERIC, $5)
        RETURNING id
        "#,
    )
    .bind(&write.position_number)
    .bind(&write.position_title)
    .bind(&write.position_description)
    .bind(write.position_salary)
    .bind(write.department_id)
    .fetch_one(pool)
    .await
}

/// Returns `false` when no position has `id`
pub async fn update_position(
    pool: &PgPool,
    id: Uuid,
    write: &PositionWrite,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE positions
        SET position_number = $2,
            position_title = $3,
            position_description = $4,
            position_salary = $5::FLOAT8::NUMERIC,
            department_id = $6,
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(&write.position_number)
    .bind(&write.position_title)
    .bind(&write.position_description)
    .bind(write.position_salary)
    .bind(write.department_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Returns `false` when no position has `id`
pub async fn delete_position(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM positions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
