//! Question authoring and lookup.

use std::sync::Arc;

use crate::application::handlers::level::load_level;
use crate::domain::foundation::{DomainError, LevelId, QuestionId};
use crate::domain::question::{NewQuestion, Question};
use crate::ports::{LevelRepository, QuestionRepository};

use super::load_question;

pub struct CreateQuestionHandler {
    levels: Arc<dyn LevelRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl CreateQuestionHandler {
    pub fn new(levels: Arc<dyn LevelRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { levels, questions }
    }

    pub async fn handle(&self, input: NewQuestion) -> Result<Question, DomainError> {
        let question = Question::new(input)?;
        load_level(self.levels.as_ref(), &question.level_id).await?;
        self.questions.create(&question).await?;
        tracing::debug!(question_id = %question.id, level_id = %question.level_id, "question created");
        Ok(question)
    }
}

/// Questions of one level in authoring order.
pub struct ListLevelQuestionsHandler {
    levels: Arc<dyn LevelRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl ListLevelQuestionsHandler {
    pub fn new(levels: Arc<dyn LevelRepository>, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { levels, questions }
    }

    pub async fn handle(&self, level_id: LevelId) -> Result<Vec<Question>, DomainError> {
        load_level(self.levels.as_ref(), &level_id).await?;
        self.questions.list_by_level(&level_id).await
    }
}

pub struct GetQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl GetQuestionHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, id: QuestionId) -> Result<Question, DomainError> {
        load_question(self.questions.as_ref(), &id).await
    }
}

pub struct DeleteQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl DeleteQuestionHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, id: QuestionId) -> Result<(), DomainError> {
        self.questions.delete(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::level::Level;
    use crate::domain::question::QuestionKind;

    fn input(level_id: LevelId, prompt: &str) -> NewQuestion {
        NewQuestion {
            level_id,
            kind: Some(QuestionKind::FillInTheBlank),
            prompt: prompt.to_string(),
            answer: "gato".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn creates_and_lists_questions_for_a_level() {
        let f = Fixture::new();
        let level = Level::new("es", "Animals", "", 1).unwrap();
        LevelRepository::create(f.store.as_ref(), &level).await.unwrap();

        let create = CreateQuestionHandler::new(f.store.clone(), f.store.clone());
        let first = create.handle(input(level.id, "The cat: el ___")).await.unwrap();
        create.handle(input(level.id, "Cats: los ___s")).await.unwrap();

        let listed = ListLevelQuestionsHandler::new(f.store.clone(), f.store.clone())
            .handle(level.id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
    }

    #[tokio::test]
    async fn question_needs_an_existing_level() {
        let f = Fixture::new();
        let err = CreateQuestionHandler::new(f.store.clone(), f.store.clone())
            .handle(input(LevelId::new(), "The cat: el ___"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::LevelNotFound);
    }

    #[tokio::test]
    async fn invalid_question_fails_before_level_lookup() {
        let f = Fixture::new();
        let err = CreateQuestionHandler::new(f.store.clone(), f.store.clone())
            .handle(input(LevelId::new(), ""))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn missing_question_is_not_found() {
        let f = Fixture::new();
        let err = GetQuestionHandler::new(f.store.clone())
            .handle(QuestionId::new())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::QuestionNotFound);
        assert!(DeleteQuestionHandler::new(f.store.clone())
            .handle(QuestionId::new())
            .await
            .is_err());
    }
}
