use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::feedback::Feedback;
use crate::domain::forum::{ForumReply, ForumThread};
use crate::domain::foundation::{
    FeedbackId, LevelId, LevelSessionId, QuestionId, ReplyId, ThreadId, UserId, VoiceAttemptId,
};
use crate::domain::level::{Level, LevelSession};
use crate::domain::question::Question;
use crate::domain::subscription::Subscription;
use crate::domain::user::User;
use crate::domain::voice_ai::VoiceAttempt;

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub users: HashMap<UserId, User>,
    pub levels: HashMap<LevelId, Level>,
    pub sessions: HashMap<LevelSessionId, LevelSession>,
    pub questions: HashMap<QuestionId, Question>,
    pub subscriptions: HashMap<UserId, Subscription>,
    pub threads: HashMap<ThreadId, ForumThread>,
    pub replies: HashMap<ReplyId, ForumReply>,
    pub feedback: HashMap<FeedbackId, Feedback>,
    pub voice_attempts: HashMap<VoiceAttemptId, VoiceAttempt>,
}

impl Tables {
    /// Removes a level and every row that references it.
    pub fn delete_level_cascade(&mut self, id: &LevelId) {
        self.levels.remove(id);
        self.questions.retain(|_, q| q.level_id != *id);
        self.sessions.retain(|_, s| s.level_id != *id);
    }

    /// Removes a thread and its replies.
    pub fn delete_thread_cascade(&mut self, id: &ThreadId) {
        self.threads.remove(id);
        self.replies.retain(|_, r| r.thread_id != *id);
    }

    /// Removes a user and everything they own.
    pub fn delete_user_cascade(&mut self, id: &UserId) {
        self.users.remove(id);
        self.sessions.retain(|_, s| s.user_id != *id);
        self.subscriptions.remove(id);
        self.feedback.retain(|_, f| f.user_id != *id);
        self.voice_attempts.retain(|_, a| a.user_id != *id);

        let owned_threads: Vec<ThreadId> = self
            .threads
            .values()
            .filter(|t| t.author_id == *id)
            .map(|t| t.id)
            .collect();
        for thread_id in owned_threads {
            self.delete_thread_cascade(&thread_id);
        }

        let orphaned: Vec<ReplyId> = self
            .replies
            .values()
            .filter(|r| r.author_id == *id)
            .map(|r| r.id)
            .collect();
        for reply_id in orphaned {
            self.remove_reply(&reply_id);
        }
    }

    /// Removes one reply and keeps the thread's counter in step.
    pub fn remove_reply(&mut self, id: &ReplyId) -> Option<ForumReply> {
        let reply = self.replies.remove(id)?;
        if let Some(thread) = self.threads.get_mut(&reply.thread_id) {
            thread.reply_count = thread.reply_count.saturating_sub(1);
        }
        Some(reply)
    }
}

/// Shared in-memory tables. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().await
    }

    pub(super) async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().await
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}
