use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::positions::delete_position;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePositionCommand {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePositionResponse {
    pub id: Uuid,
    pub deleted: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum DeletePositionError {
    #[error("Position '{0}' not found")]
    NotFound(Uuid),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DeletePositionResponse, DeletePositionError>> for DeletePositionCommand {}

impl crate::cqrs::middleware::Command for DeletePositionCommand {
    const NAME: &'static str = "DeletePosition";
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: PgPool,
    command: DeletePositionCommand,
) -> Result<DeletePositionResponse, DeletePositionError> {
    if !delete_position(&pool, command.id).await? {
        return Err(DeletePositionError::NotFound(command.id));
    }

    tracing::info!(position_id = %command.id, "Position deleted");

    Ok(DeletePositionResponse {
        id: command.id,
        deleted: true,
    })
}
