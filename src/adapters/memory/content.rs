//! Levels, sessions, questions and subscriptions.

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, ErrorCode, LevelId, LevelSessionId, QuestionId, UserId,
};
use crate::domain::level::{Level, LevelSession};
use crate::domain::question::Question;
use crate::domain::subscription::Subscription;
use crate::ports::{
    LevelRepository, LevelSessionRepository, QuestionRepository, SubscriptionRepository,
};

use super::InMemoryStore;

fn level_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::LevelNotFound, "Level not found")
}

#[async_trait]
impl LevelRepository for InMemoryStore {
    async fn create(&self, level: &Level) -> Result<(), DomainError> {
        self.write().await.levels.insert(level.id, level.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &LevelId) -> Result<Option<Level>, DomainError> {
        Ok(self.read().await.levels.get(id).cloned())
    }

    async fn list(&self, language: Option<&str>) -> Result<Vec<Level>, DomainError> {
        let language = language.map(str::to_lowercase);
        let mut levels: Vec<Level> = self
            .read()
            .await
            .levels
            .values()
            .filter(|l| language.as_deref().map_or(true, |lang| l.language == lang))
            .cloned()
            .collect();
        levels.sort_by(|a, b| {
            a.language
                .cmp(&b.language)
                .then(a.position.cmp(&b.position))
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(levels)
    }

    async fn delete(&self, id: &LevelId) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if !tables.levels.contains_key(id) {
            return Err(level_not_found());
        }
        tables.delete_level_cascade(id);
        Ok(())
    }
}

#[async_trait]
impl LevelSessionRepository for InMemoryStore {
    async fn create(&self, session: &LevelSession) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if !tables.levels.contains_key(&session.level_id) {
            return Err(level_not_found());
        }
        tables.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn update(&self, session: &LevelSession) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        match tables.sessions.get_mut(&session.id) {
            Some(stored) => {
                *stored = session.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(
                ErrorCode::SessionNotFound,
                "Session not found",
            )),
        }
    }

    async fn find_by_id(&self, id: &LevelSessionId) -> Result<Option<LevelSession>, DomainError> {
        Ok(self.read().await.sessions.get(id).cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<LevelSession>, DomainError> {
        let mut sessions: Vec<LevelSession> = self
            .read()
            .await
            .sessions
            .values()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.started_at.cmp(&a.started_at).then(b.id.cmp(&a.id)));
        Ok(sessions)
    }
}

fn by_creation(questions: &mut [Question]) {
    questions.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn create(&self, question: &Question) -> Result<(), DomainError> {
        let mut tables = self.write().await;
        if !tables.levels.contains_key(&question.level_id) {
            return Err(level_not_found());
        }
        tables.questions.insert(question.id, question.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        Ok(self.read().await.questions.get(id).cloned())
    }

    async fn list_by_level(&self, level_id: &LevelId) -> Result<Vec<Question>, DomainError> {
        let mut questions: Vec<Question> = self
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.level_id == *level_id)
            .cloned()
            .collect();
        by_creation(&mut questions);
        Ok(questions)
    }

    async fn daily_pool(&self) -> Result<Vec<Question>, DomainError> {
        let mut questions: Vec<Question> = self
            .read()
            .await
            .questions
            .values()
            .filter(|q| q.daily_challenge)
            .cloned()
            .collect();
        by_creation(&mut questions);
        Ok(questions)
    }

    async fn delete(&self, id: &QuestionId) -> Result<(), DomainError> {
        match self.write().await.questions.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(
                ErrorCode::QuestionNotFound,
                "Question not found",
            )),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryStore {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.write()
            .await
            .subscriptions
            .insert(subscription.user_id, subscription.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.read().await.subscriptions.get(user_id).cloned())
    }
}
