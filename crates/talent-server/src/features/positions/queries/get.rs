use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::positions::{get_position, POSITION_VIEW};
use crate::db::shaping::shape_value;
use crate::db::{Entity, ListQueryError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPositionQuery {
    pub id: Uuid,
    /// Optional comma-separated field list, same names as the list endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GetPositionError {
    #[error("Position '{0}' not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Fields(#[from] ListQueryError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<Entity, GetPositionError>> for GetPositionQuery {}

impl crate::cqrs::middleware::Query for GetPositionQuery {
    const NAME: &'static str = "GetPosition";
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: PgPool, query: GetPositionQuery) -> Result<Entity, GetPositionError> {
    let fields = POSITION_VIEW.resolve_fields(query.fields.as_deref())?;

    let record = get_position(&pool, query.id)
        .await?
        .ok_or(GetPositionError::NotFound(query.id))?;

    let value = serde_json::to_value(&record).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
    Ok(shape_value(value, &fields))
}
