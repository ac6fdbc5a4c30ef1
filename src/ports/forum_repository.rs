//! Forum repository port: threads and replies.

use async_trait::async_trait;

use crate::domain::forum::{ForumReply, ForumThread};
use crate::domain::foundation::{DomainError, Page, PageRequest, ReplyId, ThreadId};

#[async_trait]
pub trait ForumRepository: Send + Sync {
    async fn create_thread(&self, thread: &ForumThread) -> Result<(), DomainError>;

    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, DomainError>;

    /// Threads newest first.
    async fn list_threads(&self, page: PageRequest) -> Result<Page<ForumThread>, DomainError>;

    /// Delete a thread and its replies.
    ///
    /// # Errors
    ///
    /// - `ThreadNotFound` if the thread doesn't exist
    async fn delete_thread(&self, id: &ThreadId) -> Result<(), DomainError>;

    /// Store a reply and bump the thread's `reply_count`.
    ///
    /// # Errors
    ///
    /// - `ThreadNotFound` if the thread doesn't exist
    async fn add_reply(&self, reply: &ForumReply) -> Result<(), DomainError>;

    async fn find_reply(&self, id: &ReplyId) -> Result<Option<ForumReply>, DomainError>;

    /// Replies of a thread, oldest first.
    async fn list_replies(&self, thread_id: &ThreadId) -> Result<Vec<ForumReply>, DomainError>;

    /// Delete a reply and decrement the thread's `reply_count`.
    ///
    /// # Errors
    ///
    /// - `ReplyNotFound` if the reply doesn't exist
    async fn delete_reply(&self, id: &ReplyId) -> Result<(), DomainError>;
}
