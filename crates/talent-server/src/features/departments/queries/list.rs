//! List departments query
//!
//! REST list endpoint for departments: page-number paging, `orderBy`, field
//! shaping and a `name` substring filter taken from the query string.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::departments::{get_paged_departments, DepartmentListParams};
use crate::db::{Entity, ListQueryError, RecordsCount};
use crate::features::shared::pagination::{PaginationError, PaginationMetadata, PaginationParams};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDepartmentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    /// Case-insensitive substring of the department name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetDepartmentsResponse {
    pub data: Vec<Entity>,
    pub pagination: PaginationMetadata,
    pub counts: RecordsCount,
}

#[derive(Debug, thiserror::Error)]
pub enum GetDepartmentsError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    List(#[from] ListQueryError),
}

impl Request<Result<GetDepartmentsResponse, GetDepartmentsError>> for GetDepartmentsQuery {}

impl crate::cqrs::middleware::Query for GetDepartmentsQuery {
    const NAME: &'static str = "GetDepartments";
}

impl GetDepartmentsQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page_number, self.page_size)
    }

    pub fn to_list_params(&self) -> DepartmentListParams {
        let pagination = self.pagination();
        DepartmentListParams {
            page_number: pagination.page_number(),
            page_size: Some(pagination.page_size()),
            order_by: self.order_by.clone(),
            fields: self.fields.clone(),
            name: self.name.clone(),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetDepartmentsQuery,
) -> Result<GetDepartmentsResponse, GetDepartmentsError> {
    query.pagination().validate()?;

    let page = get_paged_departments(&pool, &query.to_list_params()).await?;
    let pagination = PaginationMetadata::from_params(&query.pagination(), page.counts.records_filtered);

    Ok(GetDepartmentsResponse {
        data: page.data,
        pagination,
        counts: page.counts,
    })
}
