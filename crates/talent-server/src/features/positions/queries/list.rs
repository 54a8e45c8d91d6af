//! List positions query
//!
//! REST list endpoint: page-number paging, `orderBy`, field shaping and
//! OR-combined substring filters, all taken from the query string.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::positions::{get_paged_positions, PositionListParams};
use crate::db::{Entity, ListQueryError, RecordsCount};
use crate::features::shared::pagination::{PaginationError, PaginationMetadata, PaginationParams};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPositionsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    /// Comma-separated `field [asc|desc]` clauses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    /// Comma-separated field names to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_title: Option<String>,
    /// Matched against the department name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPositionsResponse {
    pub data: Vec<Entity>,
    pub pagination: PaginationMetadata,
    pub counts: RecordsCount,
}

#[derive(Debug, thiserror::Error)]
pub enum GetPositionsError {
    #[error(transparent)]
    Pagination(#[from] PaginationError),
    #[error(transparent)]
    List(#[from] ListQueryError),
}

impl Request<Result<GetPositionsResponse, GetPositionsError>> for GetPositionsQuery {}

impl crate::cqrs::middleware::Query for GetPositionsQuery {
    const NAME: &'static str = "GetPositions";
}

impl GetPositionsQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams::new(self.page_number, self.page_size)
    }

    pub fn validate(&self) -> Result<(), GetPositionsError> {
        self.pagination().validate()?;
        Ok(())
    }

    pub fn to_list_params(&self) -> PositionListParams {
        let pagination = self.pagination();
        PositionListParams {
            page_number: pagination.page_number(),
            page_size: Some(pagination.page_size()),
            order_by: self.order_by.clone(),
            fields: self.fields.clone(),
            position_number: self.position_number.clone(),
            position_title: self.position_title.clone(),
            department: self.department.clone(),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    query: GetPositionsQuery,
) -> Result<GetPositionsResponse, GetPositionsError> {
    query.validate()?;

    let params = query.to_list_params();
    let page = get_paged_positions(&pool, &params).await?;

    let pagination = PaginationMetadata::from_params(&query.pagination(), page.counts.records_filtered);

    Ok(GetPositionsResponse {
        data: page.data,
        pagination,
        counts: page.counts,
    })
}
