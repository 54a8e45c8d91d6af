//! Test helpers and fixtures for database tests
//!
//! # Examples
//!
//! ```rust,ignore
//! use talent_server::features::shared::test_helpers::*;
//!
//! #[sqlx::test(migrations = "../../migrations")]
//! async fn test_something(pool: PgPool) -> sqlx::Result<()> {
//!     let dept = TestDepartment::new("Engineering").insert(&pool).await?;
//!
//!     let position = TestPosition::new(&dept, "PN-001", "Backend Engineer")
//!         .with_salary(95_000.0)
//!         .insert(&pool)
//!         .await?;
//!
//!     // ... test logic ...
//!     Ok(())
//! }
//! ```

use sqlx::PgPool;
use uuid::Uuid;

/// Builder for creating test departments
#[derive(Debug, Clone)]
pub struct TestDepartment {
    pub id: Uuid,
    pub name: String,
}

impl TestDepartment {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    /// Use a specific ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Insert the department into the database
    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query("INSERT INTO departments (id, name) VALUES ($1, $2)")
            .bind(self.id)
            .bind(&self.name)
            .execute(pool)
            .await?;

        Ok(self)
    }
}

/// Builder for creating test positions
#[derive(Debug, Clone)]
pub struct TestPosition {
    pub id: Uuid,
    pub department_id: Uuid,
    pub position_number: String,
    pub position_title: String,
    pub position_description: Option<String>,
    pub position_salary: f64,
}

impl TestPosition {
    pub fn new(department: &TestDepartment, position_number: &str, position_title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            department_id: department.id,
            position_number: position_number.to_string(),
            position_title: position_title.to_string(),
            position_description: None,
            position_salary: 50_000.0,
        }
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.position_salary = salary;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.position_description = Some(description.to_string());
        self
    }

    /// Insert the position into the database
    pub async fn insert(self, pool: &PgPool) -> sqlx::Result<Self> {
        sqlx::query(
            r#"
            INSERT INTO positions
                (id, position_number, position_title, position_description, position_salary, department_id)
            VALUES ($1, $2, $3, $4, $5::FLOAT8::NUMERIC, $6)
            "#,
        )
        .bind(self.id)
        .bind(&self.position_number)
        .bind(&self.position_title)
        .bind(&self.position_description)
        .bind(self.position_salary)
        .bind(self.department_id)
        .execute(pool)
        .await?;

        Ok(self)
    }
}
