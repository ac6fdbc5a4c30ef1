//! Question repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LevelId, QuestionId};
use crate::domain::question::Question;

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// # Errors
    ///
    /// - `LevelNotFound` if the referenced level doesn't exist
    async fn create(&self, question: &Question) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError>;

    /// Questions of one level ordered by `(created_at, id)`.
    async fn list_by_level(&self, level_id: &LevelId) -> Result<Vec<Question>, DomainError>;

    /// Every question flagged for the daily challenge.
    async fn daily_pool(&self) -> Result<Vec<Question>, DomainError>;

    /// # Errors
    ///
    /// - `QuestionNotFound` if the question doesn't exist
    async fn delete(&self, id: &QuestionId) -> Result<(), DomainError>;
}
