pub mod create;

pub use create::{CreateDepartmentCommand, CreateDepartmentError};
