pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreatePositionCommand, CreatePositionError, DeletePositionCommand, DeletePositionError,
    DeletePositionResponse, UpdatePositionCommand, UpdatePositionError,
};

pub use queries::{
    GetPositionError, GetPositionQuery, GetPositionsError, GetPositionsQuery,
    GetPositionsResponse, PagedPositionsError, PagedPositionsQuery, PagedPositionsResponse,
};

pub use routes::positions_routes;
