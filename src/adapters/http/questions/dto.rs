//! HTTP DTOs for question and daily-challenge endpoints.
//!
//! Question bodies never include the answer or explanation; those are only
//! revealed in the result of an answer attempt.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::handlers::question::{AnswerResult, DailyAnswerResult};
use crate::domain::foundation::LevelId;
use crate::domain::question::{NewQuestion, Question, QuestionKind};
use crate::domain::user::Streak;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub level_id: Uuid,
    pub kind: Option<QuestionKind>,
    pub prompt: String,
    pub passage: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    pub explanation: Option<String>,
    #[serde(default)]
    pub daily_challenge: bool,
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(req: CreateQuestionRequest) -> Self {
        NewQuestion {
            level_id: LevelId::from_uuid(req.level_id),
            kind: req.kind,
            prompt: req.prompt,
            passage: req.passage,
            options: req.options,
            answer: req.answer,
            explanation: req.explanation,
            daily_challenge: req.daily_challenge,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: String,
    pub level_id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    pub options: Vec<String>,
    pub daily_challenge: bool,
    pub created_at: String,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            level_id: question.level_id.to_string(),
            kind: question.kind,
            prompt: question.prompt,
            passage: question.passage,
            options: question.options,
            daily_challenge: question.daily_challenge,
            created_at: question.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyAnswerResponse {
    pub question: QuestionResponse,
    #[serde(flatten)]
    pub result: AnswerResult,
    pub streak: Streak,
}

impl From<DailyAnswerResult> for DailyAnswerResponse {
    fn from(outcome: DailyAnswerResult) -> Self {
        Self {
            question: outcome.question.into(),
            result: outcome.result,
            streak: outcome.streak,
        }
    }
}
