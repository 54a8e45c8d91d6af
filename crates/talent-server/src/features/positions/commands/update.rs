use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::positions::{get_position, position_number_exists, update_position, PositionRecord};
use crate::features::shared::error_helpers::map_constraint_violation;
use crate::features::shared::validation::{
    validate_required, validate_salary, SalaryValidationError, TextValidationError,
};

use super::create::{CreatePositionCommand, MAX_POSITION_NUMBER_LENGTH, MAX_POSITION_TITLE_LENGTH};

/// Replace every mutable field of a position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePositionCommand {
    /// Taken from the path
    #[serde(skip)]
    pub id: Uuid,
    pub position_number: String,
    pub position_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_description: Option<String>,
    pub position_salary: f64,
    pub department_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdatePositionError {
    #[error(transparent)]
    Text(#[from] TextValidationError),

    #[error(transparent)]
    Salary(#[from] SalaryValidationError),

    #[error("Position '{0}' not found")]
    NotFound(Uuid),

    #[error("Position number '{0}' already exists")]
    DuplicateNumber(String),

    #[error("Department '{0}' not found")]
    DepartmentNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<PositionRecord, UpdatePositionError>> for UpdatePositionCommand {}

impl crate::cqrs::middleware::Command for UpdatePositionCommand {
    const NAME: &'static str = "UpdatePosition";
}

impl UpdatePositionCommand {
    fn as_create(&self) -> CreatePositionCommand {
        CreatePositionCommand {
            position_number: self.position_number.clone(),
            position_title: self.position_title.clone(),
            position_description: self.position_description.clone(),
            position_salary: self.position_salary,
            department_id: self.department_id,
        }
    }

    pub fn validate(&self) -> Result<(), UpdatePositionError> {
        validate_required("positionNumber", &self.position_number, MAX_POSITION_NUMBER_LENGTH)?;
        validate_required("positionTitle", &self.position_title, MAX_POSITION_TITLE_LENGTH)?;
        validate_salary(self.position_salary)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(id = %command.id))]
pub async fn handle(
    pool: PgPool,
    command: UpdatePositionCommand,
) -> Result<PositionRecord, UpdatePositionError> {
    command.validate()?;
    let id = command.id;
    let write = command.as_create().into_write();

    if position_number_exists(&pool, &write.position_number, Some(id)).await? {
        return Err(UpdatePositionError::DuplicateNumber(write.position_number));
    }

    let updated = update_position(&pool, id, &write).await.map_err(|e| {
        map_constraint_violation(
            e,
            UpdatePositionError::DuplicateNumber(write.position_number.clone()),
            UpdatePositionError::DepartmentNotFound(write.department_id),
            UpdatePositionError::Database,
        )
    })?;

    if !updated {
        return Err(UpdatePositionError::NotFound(id));
    }

    tracing::info!("Position updated");

    get_position(&pool, id)
        .await?
        .ok_or(UpdatePositionError::NotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{TestDepartment, TestPosition};

    fn command(id: Uuid, department_id: Uuid) -> UpdatePositionCommand {
        UpdatePositionCommand {
            id,
            position_number: "OPS-7".to_string(),
            position_title: "Operations Lead".to_string(),
            position_description: None,
            position_salary: 70_000.0,
            department_id,
        }
    }

    #[test]
    fn test_validation_maps_field_errors() {
        let mut cmd = command(Uuid::new_v4(), Uuid::new_v4());
        assert!(cmd.validate().is_ok());

        cmd.position_title = String::new();
        assert!(matches!(cmd.validate(), Err(UpdatePositionError::Text(_))));

        cmd.position_title = "Lead".to_string();
        cmd.position_salary = f64::INFINITY;
        assert!(matches!(cmd.validate(), Err(UpdatePositionError::Salary(_))));
    }

    #[test]
    fn test_id_is_not_read_from_body() {
        let cmd: UpdatePositionCommand = serde_json::from_value(serde_json::json!({
            "id": "6f1c5bde-5d8c-4bd8-9a55-2c1b2f6f0e11",
            "positionNumber": "A-1",
            "positionTitle": "Analyst",
            "positionSalary": 10.5,
            "departmentId": "6f1c5bde-5d8c-4bd8-9a55-2c1b2f6f0e11"
        }))
        .unwrap();
        assert!(cmd.id.is_nil());
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_updates_position(pool: PgPool) -> sqlx::Result<()> {
        let ops = TestDepartment::new("Operations").insert(&pool).await?;
        let position = TestPosition::new(&ops, "OPS-1", "Coordinator").insert(&pool).await?;

        let record = handle(pool.clone(), command(position.id, ops.id)).await.unwrap();
        assert_eq!(record.position_number, "OPS-7");
        assert_eq!(record.position_title, "Operations Lead");
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_not_found(pool: PgPool) -> sqlx::Result<()> {
        let ops = TestDepartment::new("Operations").insert(&pool).await?;
        let result = handle(pool.clone(), command(Uuid::new_v4(), ops.id)).await;
        assert!(matches!(result, Err(UpdatePositionError::NotFound(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_duplicate_number(pool: PgPool) -> sqlx::Result<()> {
        let ops = TestDepartment::new("Operations").insert(&pool).await?;
        TestPosition::new(&ops, "OPS-7", "Taken").insert(&pool).await?;
        let position = TestPosition::new(&ops, "OPS-1", "Coordinator").insert(&pool).await?;

        let result = handle(pool.clone(), command(position.id, ops.id)).await;
        assert!(matches!(result, Err(UpdatePositionError::DuplicateNumber(_))));
        Ok(())
    }
}
