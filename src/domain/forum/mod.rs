//! Discussion forum: threads and their replies.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    bounded_text, DomainError, ReplyId, ThreadId, Timestamp, UserId, Violations,
};

pub const MIN_TITLE_LEN: usize = 3;
pub const MAX_TITLE_LEN: usize = 150;
pub const MAX_BODY_LEN: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumThread {
    pub id: ThreadId,
    pub author_id: UserId,
    pub title: String,
    pub body: String,
    pub reply_count: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ForumThread {
    pub fn new(author_id: UserId, title: &str, body: &str) -> Result<Self, DomainError> {
        let mut violations = Violations::new();
        let title = violations.check(bounded_text("title", title, MIN_TITLE_LEN, MAX_TITLE_LEN));
        let body = violations.check(bounded_text("body", body, 1, MAX_BODY_LEN));
        violations.finish()?;

        match (title, body) {
            (Some(title), Some(body)) => {
                let now = Timestamp::now();
                Ok(Self {
                    id: ThreadId::new(),
                    author_id,
                    title,
                    body,
                    reply_count: 0,
                    created_at: now,
                    updated_at: now,
                })
            }
            _ => Err(DomainError::internal("thread validation inconsistent")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumReply {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub author_id: UserId,
    pub body: String,
    pub created_at: Timestamp,
}

impl ForumReply {
    pub fn new(thread_id: ThreadId, author_id: UserId, body: &str) -> Result<Self, DomainError> {
        let body = bounded_text("body", body, 1, MAX_BODY_LEN)?;
        Ok(Self {
            id: ReplyId::new(),
            thread_id,
            author_id,
            body,
            created_at: Timestamp::now(),
        })
    }
}

/// A thread with its replies, oldest reply first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadWithReplies {
    pub thread: ForumThread,
    pub replies: Vec<ForumReply>,
}
