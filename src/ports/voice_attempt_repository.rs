//! Voice practice attempt repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageRequest, UserId};
use crate::domain::voice_ai::VoiceAttempt;

#[async_trait]
pub trait VoiceAttemptRepository: Send + Sync {
    async fn create(&self, attempt: &VoiceAttempt) -> Result<(), DomainError>;

    /// A user's attempts, newest first.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<VoiceAttempt>, DomainError>;
}
