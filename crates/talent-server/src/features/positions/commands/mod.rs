pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreatePositionCommand, CreatePositionError};
pub use delete::{DeletePositionCommand, DeletePositionError, DeletePositionResponse};
pub use update::{UpdatePositionCommand, UpdatePositionError};
