pub mod get;
pub mod list;

pub use get::{GetDepartmentError, GetDepartmentQuery};
pub use list::{GetDepartmentsError, GetDepartmentsQuery, GetDepartmentsResponse};
