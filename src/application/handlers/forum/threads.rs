//! Thread handlers.

use std::sync::Arc;

use crate::domain::forum::{ForumThread, ThreadWithReplies};
use crate::domain::foundation::{
    AuthenticatedUser, DomainError, Page, PageRequest, ThreadId, UserId,
};
use crate::ports::ForumRepository;

use super::load_thread;

#[derive(Debug, Clone)]
pub struct CreateThreadCommand {
    pub author_id: UserId,
    pub title: String,
    pub body: String,
}

pub struct CreateThreadHandler {
    forum: Arc<dyn ForumRepository>,
}

impl CreateThreadHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, cmd: CreateThreadCommand) -> Result<ForumThread, DomainError> {
        let thread = ForumThread::new(cmd.author_id, &cmd.title, &cmd.body)?;
        self.forum.create_thread(&thread).await?;
        Ok(thread)
    }
}

/// Threads newest first.
pub struct ListThreadsHandler {
    forum: Arc<dyn ForumRepository>,
}

impl ListThreadsHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, page: PageRequest) -> Result<Page<ForumThread>, DomainError> {
        self.forum.list_threads(page).await
    }
}

pub struct GetThreadHandler {
    forum: Arc<dyn ForumRepository>,
}

impl GetThreadHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, id: ThreadId) -> Result<ThreadWithReplies, DomainError> {
        let thread = load_thread(self.forum.as_ref(), &id).await?;
        let replies = self.forum.list_replies(&id).await?;
        Ok(ThreadWithReplies { thread, replies })
    }
}

#[derive(Debug, Clone)]
pub struct DeleteThreadCommand {
    pub actor: AuthenticatedUser,
    pub thread_id: ThreadId,
}

pub struct DeleteThreadHandler {
    forum: Arc<dyn ForumRepository>,
}

impl DeleteThreadHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, cmd: DeleteThreadCommand) -> Result<(), DomainError> {
        let thread = load_thread(self.forum.as_ref(), &cmd.thread_id).await?;
        if !cmd.actor.can_manage(&thread.author_id) {
            return Err(DomainError::forbidden("Only the author or an admin can delete this thread"));
        }
        self.forum.delete_thread(&thread.id).await?;
        tracing::info!(thread_id = %thread.id, deleted_by = %cmd.actor.id, "thread deleted");
        Ok(())
    }
}
