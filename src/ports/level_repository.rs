//! Level and level-session repository ports.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LevelId, LevelSessionId, UserId};
use crate::domain::level::{Level, LevelSession};

#[async_trait]
pub trait LevelRepository: Send + Sync {
    async fn create(&self, level: &Level) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LevelId) -> Result<Option<Level>, DomainError>;

    /// Levels ordered by language then position, optionally for one language.
    async fn list(&self, language: Option<&str>) -> Result<Vec<Level>, DomainError>;

    /// Delete a level together with its questions and sessions.
    ///
    /// # Errors
    ///
    /// - `LevelNotFound` if the level doesn't exist
    async fn delete(&self, id: &LevelId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait LevelSessionRepository: Send + Sync {
    async fn create(&self, session: &LevelSession) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    async fn update(&self, session: &LevelSession) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LevelSessionId) -> Result<Option<LevelSession>, DomainError>;

    /// A user's sessions, most recently started first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<LevelSession>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ports_are_object_safe() {
        fn _levels(_repo: &dyn LevelRepository) {}
        fn _sessions(_repo: &dyn LevelSessionRepository) {}
    }
}
