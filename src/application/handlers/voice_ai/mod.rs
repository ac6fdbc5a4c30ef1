//! Voice practice: scoring transcripts and attempt history.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Page, PageRequest, UserId};
use crate::domain::voice_ai::VoiceAttempt;
use crate::ports::VoiceAttemptRepository;

#[derive(Debug, Clone)]
pub struct SubmitVoiceAttemptCommand {
    pub user_id: UserId,
    pub language: String,
    pub expected_text: String,
    pub transcript: String,
}

pub struct SubmitVoiceAttemptHandler {
    attempts: Arc<dyn VoiceAttemptRepository>,
}

impl SubmitVoiceAttemptHandler {
    pub fn new(attempts: Arc<dyn VoiceAttemptRepository>) -> Self {
        Self { attempts }
    }

    pub async fn handle(&self, cmd: SubmitVoiceAttemptCommand) -> Result<VoiceAttempt, DomainError> {
        let attempt = VoiceAttempt::record(
            cmd.user_id,
            &cmd.language,
            &cmd.expected_text,
            &cmd.transcript,
        )?;
        self.attempts.create(&attempt).await?;
        tracing::debug!(attempt_id = %attempt.id, accuracy = attempt.accuracy, "voice attempt scored");
        Ok(attempt)
    }
}

pub struct ListVoiceAttemptsHandler {
    attempts: Arc<dyn VoiceAttemptRepository>,
}

impl ListVoiceAttemptsHandler {
    pub fn new(attempts: Arc<dyn VoiceAttemptRepository>) -> Self {
        Self { attempts }
    }

    pub async fn handle(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<VoiceAttempt>, DomainError> {
        self.attempts.list_by_user(&user_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorCode;

    fn attempt(user_id: UserId, transcript: &str) -> SubmitVoiceAttemptCommand {
        SubmitVoiceAttemptCommand {
            user_id,
            language: "fr".to_string(),
            expected_text: "Je voudrais un croissant".to_string(),
            transcript: transcript.to_string(),
        }
    }

    #[tokio::test]
    async fn scores_and_keeps_history_per_user() {
        let f = Fixture::new();
        let me = UserId::new();
        let submit = SubmitVoiceAttemptHandler::new(f.store.clone());

        let scored = submit.handle(attempt(me, "je voudrais croissant")).await.unwrap();
        assert_eq!(scored.accuracy, 75);
        assert_eq!(scored.missing_words, vec!["un"]);
        submit
            .handle(attempt(UserId::new(), "je voudrais un croissant"))
            .await
            .unwrap();

        let mine = ListVoiceAttemptsHandler::new(f.store.clone())
            .handle(me, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(mine.total, 1);
        assert_eq!(mine.items[0].id, scored.id);
    }

    #[tokio::test]
    async fn blank_transcript_is_rejected() {
        let f = Fixture::new();
        let err = SubmitVoiceAttemptHandler::new(f.store.clone())
            .handle(attempt(UserId::new(), "   "))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
