//! Forum, feedback and voice practice attempts.

use async_trait::async_trait;

use crate::domain::feedback::{Feedback, FeedbackStatus};
use crate::domain::forum::{ForumReply, ForumThread};
use crate::domain::foundation::{
    DomainError, ErrorCode, FeedbackId, Page, PageRequest, ReplyId, ThreadId, UserId,
};
use crate::domain::voice_ai::VoiceAttempt;
use crate::ports::{FeedbackRepository, ForumRepository, VoiceAttemptRepository};

use super::InMemoryStore;

fn thread_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::ThreadNotFound, "Thread not found")
}

#[async_trait]
impl ForumRepository for InMemoryStore {
    async fn create_thread(&self, thread: &ForumThread) -> Result<(), DomainError> {
        self.write().await.threads.insert(thread.id, thread.clone());
        Ok(())
    }

    async fn find_thread(&self, id: &ThreadId) -> Result<Option<ForumThread>, DomainError> {
        Ok(self.read().await.threads.get(id).cloned())
    }

    async fn list_threads(&self, page: PageRequest) -> Result<Page<ForumThread>, DomainError> {
        let mut threads: Vec<ForumThread> = self.read().await.threads.values().cloned().collect();
        threads.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Page::from_vec(threads, page))
    }

    async fn delete_thread(&self, id: &ThreadId) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if !tables.threads.contains_key(id) {
            return Err(thread_not_found());
        }
        tables.delete_thread_cascade(id);
        Ok(())
    }

    async fn add_reply(&self, reply: &ForumReply) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        let thread = tables
            .threads
            .get_mut(&reply.thread_id)
            .ok_or_else(thread_not_found)?;
        thread.reply_count = thread.reply_count.saturating_add(1);
        thread.updated_at = reply.created_at;
        tables.replies.insert(reply.id, reply.clone());
        Ok(())
    }

    async fn find_reply(&self, id: &ReplyId) -> Result<Option<ForumReply>, DomainError> {
        Ok(self.read().await.replies.get(id).cloned())
    }

    async fn list_replies(&self, thread_id: &ThreadId) -> Result<Vec<ForumReply>, DomainError> {
        let mut replies: Vec<ForumReply> = self
            .read()
            .await
            .replies
            .values()
            .filter(|r| r.thread_id == *thread_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(replies)
    }

    async fn delete_reply(&self, id: &ReplyId) -> Result<(), DomainError> {
        match self.write().await.remove_reply(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(
                ErrorCode::ReplyNotFound,
                "Reply not found",
            )),
        }
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn create(&self, feedback: &Feedback) -> Result<(), DomainError> {
        self.write().await.feedback.insert(feedback.id, feedback.clone());
        Ok(())
    }

    async fn update(&self, feedback: &Feedback) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        match tables.feedback.get_mut(&feedback.id) {
            Some(stored) => {
                *stored = feedback.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::FeedbackNotFound,
                "Feedback not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &FeedbackId) -> Result<Option<Feedback>, DomainError> {
        Ok(self.read().await.feedback.get(id).cloned())
    }

    async fn list(
        &self,
        status: Option<FeedbackStatus>,
        page: PageRequest,
    ) -> Result<Page<Feedback>, DomainError> {
        let mut entries: Vec<Feedback> = self
            .read()
            .await
            .feedback
            .values()
            .filter(|f| status.map_or(true, |s| f.status == s))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Page::from_vec(entries, page))
    }
}

#[async_trait]
impl VoiceAttemptRepository for InMemoryStore {
    async fn create(&self, attempt: &VoiceAttempt) -> Result<(), DomainError> {
        self.write()
            .await
            .voice_attempts
            .insert(attempt.id, attempt.clone());
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<VoiceAttempt>, DomainError> {
        let mut attempts: Vec<VoiceAttempt> = self
            .read()
            .await
            .voice_attempts
            .values()
            .filter(|a| a.user_id == *user_id)
            .cloned()
            .collect();
        attempts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(Page::from_vec(attempts, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feedback::FeedbackKind;

    #[tokio::test]
    async fn replies_track_thread_counter() {
        let store = InMemoryStore::new();
        let thread = ForumThread::new(UserId::new(), "Tips", "Share yours").unwrap();
        store.create_thread(&thread).await.unwrap();
        let reply = ForumReply::new(thread.id, UserId::new(), "Practice daily").unwrap();

        store.add_reply(&reply).await.unwrap();
        assert_eq!(store.find_thread(&thread.id).await.unwrap().unwrap().reply_count, 1);

        store.delete_reply(&reply.id).await.unwrap();
        assert_eq!(store.find_thread(&thread.id).await.unwrap().unwrap().reply_count, 0);
    }

    #[tokio::test]
    async fn reply_to_missing_thread_fails() {
        let store = InMemoryStore::new();
        let reply = ForumReply::new(ThreadId::new(), UserId::new(), "Hello").unwrap();
        let err = store.add_reply(&reply).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ThreadNotFound);
    }

    #[tokio::test]
    async fn deleting_thread_removes_replies() {
        let store = InMemoryStore::new();
        let thread = ForumThread::new(UserId::new(), "Tips", "Share yours").unwrap();
        store.create_thread(&thread).await.unwrap();
        let reply = ForumReply::new(thread.id, UserId::new(), "Practice daily").unwrap();
        store.add_reply(&reply).await.unwrap();

        store.delete_thread(&thread.id).await.unwrap();
        assert!(store.find_reply(&reply.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn feedback_list_filters_by_status() {
        let store = InMemoryStore::new();
        let mut resolved =
            Feedback::submit(UserId::new(), FeedbackKind::Bug, "Audio does not play", None)
                .unwrap();
        resolved.resolve(resolved.created_at).unwrap();
        let open =
            Feedback::submit(UserId::new(), FeedbackKind::Feedback, "Great app!", None).unwrap();
        FeedbackRepository::create(&store, &resolved).await.unwrap();
        FeedbackRepository::create(&store, &open).await.unwrap();

        let page = FeedbackRepository::list(&store, Some(FeedbackStatus::Open), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, open.id);
    }
}
