//! AnswerQuestionHandler - Checks a submitted answer.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::{DomainError, QuestionId};
use crate::domain::question::Question;
use crate::ports::QuestionRepository;

use super::load_question;

#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub question_id: QuestionId,
    pub answer: String,
}

/// Outcome of an answer, revealing the expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerResult {
    pub correct: bool,
    pub answer: String,
    pub explanation: Option<String>,
}

impl AnswerResult {
    pub fn check(question: &Question, given: &str) -> Self {
        Self {
            correct: question.is_correct(given),
            answer: question.answer.clone(),
            explanation: question.explanation.clone(),
        }
    }
}

pub struct AnswerQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl AnswerQuestionHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, cmd: AnswerQuestionCommand) -> Result<AnswerResult, DomainError> {
        let question = load_question(self.questions.as_ref(), &cmd.question_id).await?;
        Ok(AnswerResult::check(&question, &cmd.answer))
    }
}
