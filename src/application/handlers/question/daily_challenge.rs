//! Daily challenge: one question per UTC day drawn from the eligible pool.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::application::handlers::user::load_user;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::question::{pick_daily, Question};
use crate::domain::user::Streak;
use crate::ports::{QuestionRepository, UserRepository};

use super::AnswerResult;

async fn todays_question(
    questions: &dyn QuestionRepository,
    today: NaiveDate,
) -> Result<Question, DomainError> {
    let pool = questions.daily_pool().await?;
    pick_daily(&pool, today).cloned().ok_or_else(|| {
        DomainError::not_found(ErrorCode::QuestionNotFound, "No daily challenge available")
    })
}

pub struct DailyChallengeHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl DailyChallengeHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, today: NaiveDate) -> Result<Question, DomainError> {
        todays_question(self.questions.as_ref(), today).await
    }
}

#[derive(Debug, Clone)]
pub struct AnswerDailyChallengeCommand {
    pub user_id: UserId,
    pub answer: String,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct DailyAnswerResult {
    pub question: Question,
    pub result: AnswerResult,
    pub streak: Streak,
}

/// A correct answer counts as the day's activity.
pub struct AnswerDailyChallengeHandler {
    questions: Arc<dyn QuestionRepository>,
    users: Arc<dyn UserRepository>,
}

impl AnswerDailyChallengeHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { questions, users }
    }

    pub async fn handle(
        &self,
        cmd: AnswerDailyChallengeCommand,
    ) -> Result<DailyAnswerResult, DomainError> {
        let question = todays_question(self.questions.as_ref(), cmd.today).await?;
        let result = AnswerResult::check(&question, &cmd.answer);

        let mut user = load_user(self.users.as_ref(), &cmd.user_id).await?;
        if result.correct {
            user.record_activity(cmd.today);
            self.users.update(&user).await?;
        }

        Ok(DailyAnswerResult {
            question,
            result,
            streak: user.streak,
        })
    }
}
