//! Course levels and level sessions.

mod manage_levels;
mod sessions;

pub use manage_levels::{
    CreateLevelCommand, CreateLevelHandler, DeleteLevelHandler, GetLevelHandler,
    ListLevelsHandler, ListLevelsQuery,
};
pub use sessions::{
    CompleteSessionCommand, CompleteSessionHandler, CompletedSession, ListSessionsHandler,
    StartSessionCommand, StartSessionHandler,
};

use crate::domain::foundation::{DomainError, ErrorCode, LevelId};
use crate::domain::level::Level;
use crate::ports::LevelRepository;

pub(crate) async fn load_level(
    levels: &dyn LevelRepository,
    id: &LevelId,
) -> Result<Level, DomainError> {
    levels
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::LevelNotFound, "Level not found"))
}
