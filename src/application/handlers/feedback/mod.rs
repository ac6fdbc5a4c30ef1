//! Feedback, bug reports and content reports.

use std::sync::Arc;

use crate::domain::feedback::{Feedback, FeedbackKind, FeedbackStatus};
use crate::domain::foundation::{
    DomainError, ErrorCode, FeedbackId, Page, PageRequest, Timestamp, UserId,
};
use crate::ports::FeedbackRepository;

#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub user_id: UserId,
    pub kind: FeedbackKind,
    pub message: String,
    pub target_id: Option<String>,
}

pub struct SubmitFeedbackHandler {
    feedback: Arc<dyn FeedbackRepository>,
}

impl SubmitFeedbackHandler {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn handle(&self, cmd: SubmitFeedbackCommand) -> Result<Feedback, DomainError> {
        let entry = Feedback::submit(cmd.user_id, cmd.kind, &cmd.message, cmd.target_id)?;
        self.feedback.create(&entry).await?;
        tracing::info!(feedback_id = %entry.id, kind = entry.kind.as_str(), "feedback submitted");
        Ok(entry)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListFeedbackQuery {
    pub status: Option<FeedbackStatus>,
    pub page: PageRequest,
}

pub struct ListFeedbackHandler {
    feedback: Arc<dyn FeedbackRepository>,
}

impl ListFeedbackHandler {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn handle(&self, query: ListFeedbackQuery) -> Result<Page<Feedback>, DomainError> {
        self.feedback.list(query.status, query.page).await
    }
}

pub struct ResolveFeedbackHandler {
    feedback: Arc<dyn FeedbackRepository>,
}

impl ResolveFeedbackHandler {
    pub fn new(feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { feedback }
    }

    pub async fn handle(&self, id: FeedbackId) -> Result<Feedback, DomainError> {
        let mut entry = self.feedback.find_by_id(&id).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::FeedbackNotFound, "Feedback not found")
        })?;
        entry.resolve(Timestamp::now())?;
        self.feedback.update(&entry).await?;
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;

    async fn submit(f: &Fixture, kind: FeedbackKind, target: Option<&str>) -> Feedback {
        SubmitFeedbackHandler::new(f.store.clone())
            .handle(SubmitFeedbackCommand {
                user_id: UserId::new(),
                kind,
                message: "Something to look at".to_string(),
                target_id: target.map(str::to_string),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn report_without_target_is_rejected() {
        let f = Fixture::new();
        let err = SubmitFeedbackHandler::new(f.store.clone())
            .handle(SubmitFeedbackCommand {
                user_id: UserId::new(),
                kind: FeedbackKind::Report,
                message: "This thread is spam".to_string(),
                target_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn filters_by_status() {
        let f = Fixture::new();
        let bug = submit(&f, FeedbackKind::Bug, None).await;
        submit(&f, FeedbackKind::Report, Some("thread-1")).await;
        ResolveFeedbackHandler::new(f.store.clone())
            .handle(bug.id)
            .await
            .unwrap();
        let list = ListFeedbackHandler::new(f.store.clone());

        let open = list
            .handle(ListFeedbackQuery {
                status: Some(FeedbackStatus::Open),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(open.total, 1);
        assert_eq!(open.items[0].kind, FeedbackKind::Report);

        let all = list.handle(ListFeedbackQuery::default()).await.unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn resolving_twice_conflicts() {
        let f = Fixture::new();
        let entry = submit(&f, FeedbackKind::Feedback, None).await;
        let handler = ResolveFeedbackHandler::new(f.store.clone());

        let resolved = handler.handle(entry.id).await.unwrap();
        assert_eq!(resolved.status, FeedbackStatus::Resolved);
        assert!(resolved.resolved_at.is_some());
        assert_eq!(
            handler.handle(entry.id).await.unwrap_err().code,
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(
            handler.handle(FeedbackId::new()).await.unwrap_err().code,
            ErrorCode::FeedbackNotFound
        );
    }
}
