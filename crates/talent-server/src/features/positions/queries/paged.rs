//! DataTables paged positions query
//!
//! Maps the DataTables server-side processing convention onto
//! [`PositionListParams`]:
//!
//! - `start`/`length` become page number and size
//! - `order[0]` picks the sort column: 0 position number, 1 title,
//!   2 department name. Other indexes leave the rows unordered.
//! - a non-empty `search.value` filters number, title and department (OR)
//! - fields default to the whole position view
//!
//! `columns` is accepted so the widget's request deserializes, but plays no
//! part in the query.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::positions::{get_paged_positions, PositionListParams, POSITION_VIEW};
use crate::db::query::order_by_string;
use crate::db::{Entity, ListQueryError};
use crate::features::shared::datatables::{Column, DataTableResponse, PageWindow, Search, SortOrder};

/// Sortable columns by DataTables column index
const SORT_COLUMNS: [&str; 3] = ["positionNumber", "positionTitle", "departmentName"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagedPositionsQuery {
    /// Echoed back so the widget can match responses to requests
    #[serde(default)]
    pub draw: i64,
    /// Index of the first row (0-based)
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub length: i64,
    #[serde(default)]
    pub order: Vec<SortOrder>,
    #[serde(default)]
    pub search: Search,
    #[serde(default)]
    pub columns: Vec<Column>,
}

pub type PagedPositionsResponse = DataTableResponse<Entity>;

#[derive(Debug, thiserror::Error)]
pub enum PagedPositionsError {
    #[error(transparent)]
    List(#[from] ListQueryError),
}

impl Request<Result<PagedPositionsResponse, PagedPositionsError>> for PagedPositionsQuery {}

impl crate::cqrs::middleware::Query for PagedPositionsQuery {
    const NAME: &'static str = "PagedPositions";
}

impl PagedPositionsQuery {
    fn order_by(&self) -> Option<String> {
        let order = self.order.first()?;
        let field = usize::try_from(order.column)
            .ok()
            .and_then(|i| SORT_COLUMNS.get(i))?;
        Some(order_by_string(field, order.direction()))
    }

    pub fn to_list_params(&self) -> PositionListParams {
        let window = PageWindow::from_start_length(self.start, self.length);
        let term = self.search.term().map(str::to_string);

        PositionListParams {
            page_number: window.page_number,
            page_size: window.page_size,
            order_by: self.order_by(),
            fields: Some(POSITION_VIEW.field_list()),
            position_number: term.clone(),
            position_title: term.clone(),
            department: term,
        }
    }
}

#[tracing::instrument(skip(pool, query), fields(draw = query.draw, start = query.start, length = query.length))]
pub async fn handle(
    pool: PgPool,
    query: PagedPositionsQuery,
) -> Result<PagedPositionsResponse, PagedPositionsError> {
    let params = query.to_list_params();
    let page = get_paged_positions(&pool, &params).await?;

    Ok(DataTableResponse::new(page.data, query.draw, page.counts))
}
