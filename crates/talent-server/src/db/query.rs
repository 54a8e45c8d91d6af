//! Paged list query composition
//!
//! Every list endpoint runs the same pipeline against a [`ViewModel`]:
//!
//! 1. count all records
//! 2. apply the OR-combined substring filter
//! 3. count the filtered records
//! 4. apply the dynamic ORDER BY
//! 5. project the requested fields
//! 6. page with OFFSET/LIMIT
//! 7. materialize and shape the rows
//!
//! # Examples
//!
//! ```rust,ignore
//! use talent_server::db::query::{fetch_page, ContainsAny, ListRequest};
//!
//! let filter = ContainsAny::new()
//!     .or_contains("p.position_number", Some("PN-1"))
//!     .or_contains("p.position_title", Some("PN-1"));
//!
//! let request = ListRequest {
//!     page_number: 1,
//!     page_size: Some(10),
//!     order_by: Some("positionTitle desc"),
//!     fields: Some("id,positionTitle"),
//! };
//!
//! let page = fetch_page(&pool, &POSITION_VIEW, &filter, &request).await?;
//! ```

use futures::{future, TryStreamExt};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::shaping::{shape_row, Entity};
use super::view::{FieldDef, ViewModel};

/// Errors raised while composing or running a list query
#[derive(Debug, thiserror::Error)]
pub enum ListQueryError {
    #[error("Unknown field '{field}' for {entity}")]
    InvalidField { entity: &'static str, field: String },

    #[error("Invalid order by clause '{clause}' for {entity}")]
    InvalidOrderBy { entity: &'static str, clause: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SortClause {
    pub field: &'static FieldDef,
    pub direction: SortDirection,
}

/// Parsed `orderBy` expression
///
/// Grammar: `clause ("," clause)*` with `clause = field [asc|desc]`. The
/// direction is case-insensitive and defaults to ascending.
#[derive(Debug, Clone, Default)]
pub struct OrderBy {
    clauses: Vec<SortClause>,
}

impl OrderBy {
    pub fn parse(input: Option<&str>, view: &ViewModel) -> Result<Self, ListQueryError> {
        let input = match input.map(str::trim) {
            Some(i) if !i.is_empty() => i,
            _ => return Ok(Self::default()),
        };

        let invalid = |clause: &str| ListQueryError::InvalidOrderBy {
            entity: view.entity,
            clause: clause.to_string(),
        };

        let mut clauses = Vec::new();
        for raw in input.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let mut parts = raw.split_whitespace();
            let name = parts.next().ok_or_else(|| invalid(raw))?;
            let direction = match parts.next() {
                None => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(_) => return Err(invalid(raw)),
            };
            if parts.next().is_some() {
                return Err(invalid(raw));
            }

            let field = view.field(name).filter(|f| f.sortable).ok_or_else(|| invalid(raw))?;
            clauses.push(SortClause { field, direction });
        }

        Ok(Self { clauses })
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[SortClause] {
        &self.clauses
    }

    pub fn push_to(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        if self.clauses.is_empty() {
            return;
        }
        qb.push(" ORDER BY ");
        let mut separated = qb.separated(", ");
        for clause in &self.clauses {
            separated.push(format!("{} {}", clause.field.column, clause.direction.as_sql()));
        }
    }
}

/// Render a single-field `orderBy` string, e.g. `positionNumber DESC`
pub fn order_by_string(field: &str, direction: SortDirection) -> String {
    match direction {
        SortDirection::Asc => field.to_string(),
        SortDirection::Desc => format!("{} DESC", field),
    }
}

// ============================================================================
// Filtering
// ============================================================================

/// Escape `%`, `_` and `\` so a term matches literally inside `LIKE`
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring predicate OR-combined across columns
///
/// Empty terms are skipped. Non-empty terms are trimmed before matching.
#[derive(Debug, Clone, Default)]
pub struct ContainsAny {
    terms: Vec<(&'static str, String)>,
}

impl ContainsAny {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn or_contains(mut self, column: &'static str, term: Option<&str>) -> Self {
        if let Some(term) = term.filter(|t| !t.is_empty()) {
            self.terms
                .push((column, format!("%{}%", escape_like(term.trim()))));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn push_to<'a>(&'a self, qb: &mut QueryBuilder<'a, Postgres>) {
        if self.terms.is_empty() {
            return;
        }
        qb.push(" WHERE (");
        for (i, (column, pattern)) in self.terms.iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(*column).push(" ILIKE ").push_bind(pattern.as_str());
        }
        qb.push(")");
    }
}

// ============================================================================
// Paging
// ============================================================================

/// Internal list request, after any external paging convention is mapped
#[derive(Debug, Clone, Copy)]
pub struct ListRequest<'a> {
    /// 1-based page number
    pub page_number: i64,
    /// `None` returns every matching row
    pub page_size: Option<i64>,
    pub order_by: Option<&'a str>,
    pub fields: Option<&'a str>,
}

impl ListRequest<'_> {
    pub fn offset(&self) -> i64 {
        match self.page_size {
            Some(size) => (self.page_number.max(1) - 1).saturating_mul(size),
            None => 0,
        }
    }
}

/// Record counts before and after filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsCount {
    pub records_total: i64,
    pub records_filtered: i64,
}

/// One page of shaped rows
#[derive(Debug, Clone)]
pub struct ShapedPage {
    pub data: Vec<Entity>,
    pub counts: RecordsCount,
}

// ============================================================================
// Composition
// ============================================================================

fn count_query<'a>(view: &ViewModel, filter: &'a ContainsAny) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", view.source));
    filter.push_to(&mut qb);
    qb
}

fn select_query<'a>(
    view: &ViewModel,
    fields: &[&FieldDef],
    filter: &'a ContainsAny,
    order_by: &OrderBy,
    request: &ListRequest<'_>,
) -> QueryBuilder<'a, Postgres> {
    let columns = fields.iter().map(|f| f.select_expr()).collect::<Vec<_>>().join(", ");
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", columns, view.source));
    filter.push_to(&mut qb);
    order_by.push_to(&mut qb);
    if let Some(size) = request.page_size {
        qb.push(" LIMIT ").push_bind(size);
        qb.push(" OFFSET ").push_bind(request.offset());
    }
    qb
}

/// Run the full list pipeline for `view`
///
/// Request text is validated (fields, order by) before any database work, so
/// a malformed request never reaches PostgreSQL.
#[tracing::instrument(skip(pool, view, filter), fields(entity = view.entity, filters = filter.len()))]
pub async fn fetch_page(
    pool: &PgPool,
    view: &ViewModel,
    filter: &ContainsAny,
    request: &ListRequest<'_>,
) -> Result<ShapedPage, ListQueryError> {
    let fields = view.resolve_fields(request.fields)?;
    let order_by = OrderBy::parse(request.order_by, view)?;

    let unfiltered = ContainsAny::new();
    let records_total: i64 = count_query(view, &unfiltered)
        .build_query_scalar()
        .fetch_one(pool)
        .await?;

    let records_filtered: i64 = if filter.is_empty() {
        records_total
    } else {
        count_query(view, filter)
            .build_query_scalar()
            .fetch_one(pool)
            .await?
    };

    let mut select = select_query(view, &fields, filter, &order_by, request);
    let data: Vec<Entity> = select
        .build()
        .fetch(pool)
        .map_err(ListQueryError::from)
        .and_then(|row| future::ready(shape_row(&row, &fields).map_err(ListQueryError::from)))
        .try_collect()
        .await?;

    tracing::debug!(
        records_total,
        records_filtered,
        returned = data.len(),
        "List query completed"
    );

    Ok(ShapedPage {
        data,
        counts: RecordsCount {
            records_total,
            records_filtered,
        },
    })
}
