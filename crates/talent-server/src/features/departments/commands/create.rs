use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::db::departments::{department_name_exists, insert_department, DepartmentRecord};
use crate::features::shared::error_helpers::map_unique_violation;
use crate::features::shared::validation::{validate_required, TextValidationError};

pub const MAX_DEPARTMENT_NAME_LENGTH: usize = 250;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartmentCommand {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CreateDepartmentError {
    #[error(transparent)]
    Name(#[from] TextValidationError),

    #[error("Department '{0}' already exists")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl Request<Result<DepartmentRecord, CreateDepartmentError>> for CreateDepartmentCommand {}

impl crate::cqrs::middleware::Command for CreateDepartmentCommand {
    const NAME: &'static str = "CreateDepartment";
}

impl CreateDepartmentCommand {
    pub fn validate(&self) -> Result<(), CreateDepartmentError> {
        validate_required("name", &self.name, MAX_DEPARTMENT_NAME_LENGTH)?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(name = %command.name))]
pub async fn handle(
    pool: PgPool,
    command: CreateDepartmentCommand,
) -> Result<DepartmentRecord, CreateDepartmentError> {
    command.validate()?;
    let name = command.name.trim();

    if department_name_exists(&pool, name).await? {
        return Err(CreateDepartmentError::DuplicateName(name.to_string()));
    }

    let record = insert_department(&pool, name).await.map_err(|e| {
        map_unique_violation(
            e,
            CreateDepartmentError::DuplicateName(name.to_string()),
            CreateDepartmentError::Database,
        )
    })?;

    tracing::info!(department_id = %record.id, "Department created");
    Ok(record)
}
