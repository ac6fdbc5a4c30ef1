//! Reply handlers.

use std::sync::Arc;

use crate::domain::forum::ForumReply;
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, ReplyId, ThreadId, UserId};
use crate::ports::ForumRepository;

use super::load_thread;

#[derive(Debug, Clone)]
pub struct ReplyCommand {
    pub author_id: UserId,
    pub thread_id: ThreadId,
    pub body: String,
}

pub struct ReplyHandler {
    forum: Arc<dyn ForumRepository>,
}

impl ReplyHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, cmd: ReplyCommand) -> Result<ForumReply, DomainError> {
        let reply = ForumReply::new(cmd.thread_id, cmd.author_id, &cmd.body)?;
        load_thread(self.forum.as_ref(), &cmd.thread_id).await?;
        self.forum.add_reply(&reply).await?;
        Ok(reply)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteReplyCommand {
    pub actor: AuthenticatedUser,
    pub reply_id: ReplyId,
}

pub struct DeleteReplyHandler {
    forum: Arc<dyn ForumRepository>,
}

impl DeleteReplyHandler {
    pub fn new(forum: Arc<dyn ForumRepository>) -> Self {
        Self { forum }
    }

    pub async fn handle(&self, cmd: DeleteReplyCommand) -> Result<(), DomainError> {
        let reply = self
            .forum
            .find_reply(&cmd.reply_id)
            .await?
            .ok_or_else(|| DomainError::not_found(ErrorCode::ReplyNotFound, "Reply not found"))?;
        if !cmd.actor.can_manage(&reply.author_id) {
            return Err(DomainError::forbidden("Only the author or an admin can delete this reply"));
        }
        self.forum.delete_reply(&reply.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::forum::{CreateThreadCommand, CreateThreadHandler};
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::Role;

    #[tokio::test]
    async fn reply_to_missing_thread_is_not_found() {
        let f = Fixture::new();
        let err = ReplyHandler::new(f.store.clone())
            .handle(ReplyCommand {
                author_id: UserId::new(),
                thread_id: ThreadId::new(),
                body: "hello".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ThreadNotFound);
    }

    #[tokio::test]
    async fn deleting_reply_checks_author_and_updates_count() {
        let f = Fixture::new();
        let author = f.caller("ana@example.com", Role::User).await;
        let other = f.caller("eve@example.com", Role::User).await;
        let thread = CreateThreadHandler::new(f.store.clone())
            .handle(CreateThreadCommand {
                author_id: other.id,
                title: "Pronunciation".to_string(),
                body: "How do you roll the r?".to_string(),
            })
            .await
            .unwrap();
        let reply = ReplyHandler::new(f.store.clone())
            .handle(ReplyCommand {
                author_id: author.id,
                thread_id: thread.id,
                body: "Practice with 'perro'".to_string(),
            })
            .await
            .unwrap();
        let handler = DeleteReplyHandler::new(f.store.clone());

        // Owning the thread does not grant rights over other people's replies.
        let err = handler
            .handle(DeleteReplyCommand {
                actor: other,
                reply_id: reply.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        handler
            .handle(DeleteReplyCommand {
                actor: author,
                reply_id: reply.id,
            })
            .await
            .unwrap();
        let stored = ForumRepository::find_thread(f.store.as_ref(), &thread.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.reply_count, 0);
    }
}
