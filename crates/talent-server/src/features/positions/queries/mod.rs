pub mod get;
pub mod list;
pub mod paged;

pub use get::{GetPositionError, GetPositionQuery};
pub use list::{GetPositionsError, GetPositionsQuery, GetPositionsResponse};
pub use paged::{PagedPositionsError, PagedPositionsQuery, PagedPositionsResponse};
