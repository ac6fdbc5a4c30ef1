//! Question bank, answer checking and the daily challenge.

mod answer;
mod daily_challenge;
mod manage_questions;

pub use answer::{AnswerQuestionCommand, AnswerQuestionHandler, AnswerResult};
pub use daily_challenge::{
    AnswerDailyChallengeCommand, AnswerDailyChallengeHandler, DailyAnswerResult,
    DailyChallengeHandler,
};
pub use manage_questions::{
    CreateQuestionHandler, DeleteQuestionHandler, GetQuestionHandler, ListLevelQuestionsHandler,
};

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId};
use crate::domain::question::Question;
use crate::ports::QuestionRepository;

pub(crate) async fn load_question(
    questions: &dyn QuestionRepository,
    id: &QuestionId,
) -> Result<Question, DomainError> {
    questions
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::QuestionNotFound, "Question not found"))
}
