//! Create position command
//!
//! Validates the payload, rejects duplicate position numbers up front and maps
//! constraint violations raised by a concurrent insert onto the same errors.

use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::positions::{get_position, insert_position, position_number_exists, PositionRecord, PositionWrite};
use crate::features::shared::error_helpers::map_constraint_violation;
use crate::features::shared::validation::{
    normalize_optional, validate_required, validate_salary, SalaryValidationError,
    TextValidationError,
};

pub const MAX_POSITION_NUMBER_LENGTH: usize = 100;
pub const MAX_POSITION_TITLE_LENGTH: usize = 250;

/// Command to create a new position
///
/// # Examples
///
/// ```rust,ignore
/// let command = CreatePositionCommand {
///     position_number: "ENG-001".to_string(),
///     position_title: "Backend Engineer".to_string(),
///     position_description: None,
///     position_salary: 95000.0,
///     department_id,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionCommand {
    pub position_number: String,
    pub position_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_description: Option<String>,
    pub position_salary: f64,
    pub department_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum CreatePositionError {
    #[error(transparent)]
    Text(#[from] TextValidationError),

    #[error(transparent)]
    Salary(#[from] SalaryValidationError),

    #[error("Position number '{0}' already exists")]
    DuplicateNumber(String),

    #[error("Department '{0}' not found")]
    DepartmentNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<PositionRecord, CreatePositionError>> for CreatePositionCommand {}

impl crate::cqrs::middleware::Command for CreatePositionCommand {
    const NAME: &'static str = "CreatePosition";
}

impl CreatePositionCommand {
    pub fn validate(&self) -> Result<(), CreatePositionError> {
        validate_required("positionNumber", &self.position_number, MAX_POSITION_NUMBER_LENGTH)?;
        validate_required("positionTitle", &self.position_title, MAX_POSITION_TITLE_LENGTH)?;
        validate_salary(self.position_salary)?;
        Ok(())
    }

    pub(crate) fn into_write(self) -> PositionWrite {
        PositionWrite {
            position_number: self.position_number.trim().to_string(),
            position_title: self.position_title.trim().to_string(),
            position_description: normalize_optional(self.position_description),
            position_salary: self.position_salary,
            department_id: self.department_id,
        }
    }
}

#[tracing::instrument(
    skip(pool, command),
    fields(position_number = %command.position_number, department_id = %command.department_id)
)]
pub async fn handle(
    pool: PgPool,
    command: CreatePositionCommand,
) -> Result<PositionRecord, CreatePositionError> {
    command.validate()?;
    let write = command.into_write();

    if position_number_exists(&pool, &write.position_number, None).await? {
        return Err(CreatePositionError::DuplicateNumber(write.position_number));
    }

    let id = insert_position(&pool, &write).await.map_err(|e| {
        map_constraint_violation(
            e,
            CreatePositionError::DuplicateNumber(write.position_number.clone()),
            CreatePositionError::DepartmentNotFound(write.department_id),
            CreatePositionError::Database,
        )
    })?;

    tracing::info!(position_id = %id, "Position created");

    get_position(&pool, id)
        .await?
        .ok_or(CreatePositionError::Database(sqlx::Error::RowNotFound))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{TestDepartment, TestPosition};

    fn command(department_id: Uuid) -> CreatePositionCommand {
        CreatePositionCommand {
            position_number: "ENG-001".to_string(),
            position_title: "Backend Engineer".to_string(),
            position_description: Some("  Builds services  ".to_string()),
            position_salary: 95_000.0,
            department_id,
        }
    }

    #[test]
    fn test_validation_success() {
        assert!(command(Uuid::new_v4()).validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let mut cmd = command(Uuid::new_v4());
        cmd.position_number = " ".to_string();
        assert!(matches!(cmd.validate(), Err(CreatePositionError::Text(_))));

        let mut cmd = command(Uuid::new_v4());
        cmd.position_title = "x".repeat(MAX_POSITION_TITLE_LENGTH + 1);
        assert!(matches!(
            cmd.validate(),
            Err(CreatePositionError::Text(TextValidationError::TooLong { .. }))
        ));

        let mut cmd = command(Uuid::new_v4());
        cmd.position_salary = -10.0;
        assert!(matches!(cmd.validate(), Err(CreatePositionError::Salary(_))));
    }

    #[test]
    fn test_into_write_trims_values() {
        let write = command(Uuid::new_v4()).into_write();
        assert_eq!(write.position_description.as_deref(), Some("Builds services"));
        assert_eq!(write.position_number, "ENG-001");
    }

    #[test]
    fn test_deserializes_camel_case_body() {
        let cmd: CreatePositionCommand = serde_json::from_value(serde_json::json!({
            "positionNumber": "A-1",
            "positionTitle": "Analyst",
            "positionSalary": 1000,
            "departmentId": "6f1c5bde-5d8c-4bd8-9a55-2c1b2f6f0e11"
        }))
        .unwrap();
        assert!(cmd.position_description.is_none());
        assert_eq!(cmd.position_salary, 1000.0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_creates_position(pool: PgPool) -> sqlx::Result<()> {
        let dept = TestDepartment::new("Engineering").insert(&pool).await?;

        let record = handle(pool.clone(), command(dept.id)).await.unwrap();
        assert_eq!(record.position_number, "ENG-001");
        assert_eq!(record.department_name, "Engineering");
        assert_eq!(record.position_salary, 95_000.0);
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_duplicate_number(pool: PgPool) -> sqlx::Result<()> {
        let dept = TestDepartment::new("Engineering").insert(&pool).await?;
        TestPosition::new(&dept, "ENG-001", "Existing").insert(&pool).await?;

        let result = handle(pool.clone(), command(dept.id)).await;
        assert!(matches!(result, Err(CreatePositionError::DuplicateNumber(_))));
        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_handle_unknown_department(pool: PgPool) -> sqlx::Result<()> {
        let result = handle(pool.clone(), command(Uuid::new_v4())).await;
        assert!(matches!(result, Err(CreatePositionError::DepartmentNotFound(_))));
        Ok(())
    }
}
