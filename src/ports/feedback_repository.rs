//! Feedback repository port.

use async_trait::async_trait;

use crate::domain::feedback::{Feedback, FeedbackStatus};
use crate::domain::foundation::{DomainError, FeedbackId, Page, PageRequest};

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn create(&self, feedback: &Feedback) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `FeedbackNotFound` if the entry doesn't exist
    async fn update(&self, feedback: &Feedback) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, DomainError>;

    /// Entries newest first, optionally filtered by status.
    async fn list(
        &self,
        status: Option<FeedbackStatus>,
        page: PageRequest,
    ) -> Result<Page<Feedback>, DomainError>;
}
