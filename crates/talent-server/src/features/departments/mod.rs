pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{CreateDepartmentCommand, CreateDepartmentError};
pub use queries::{
    GetDepartmentError, GetDepartmentQuery, GetDepartmentsError, GetDepartmentsQuery,
    GetDepartmentsResponse,
};
pub use routes::departments_routes;
