//! HTTP handlers for questions and the daily challenge.

use axum::extract::State;
use uuid::Uuid;

use crate::adapters::http::extract::{ApiJson, ApiPath};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::question::{
    AnswerDailyChallengeCommand, AnswerQuestionCommand, AnswerResult,
};
use crate::domain::foundation::{LevelId, QuestionId, Timestamp};

use super::dto::{AnswerRequest, CreateQuestionRequest, DailyAnswerResponse, QuestionResponse};

/// GET /api/levels/:id/questions
pub async fn list_level_questions(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Vec<QuestionResponse>> {
    let questions = state
        .list_level_questions_handler()
        .handle(LevelId::from_uuid(id))
        .await?;
    Ok(ApiResponse::ok(
        "Questions retrieved",
        questions.into_iter().map(Into::into).collect(),
    ))
}

/// POST /api/questions (admin)
pub async fn create_question(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(req): ApiJson<CreateQuestionRequest>,
) -> ApiResult<QuestionResponse> {
    let question = state.create_question_handler().handle(req.into()).await?;
    Ok(ApiResponse::created("Question created", question.into()))
}

/// GET /api/questions/:id
pub async fn get_question(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<QuestionResponse> {
    let question = state
        .get_question_handler()
        .handle(QuestionId::from_uuid(id))
        .await?;
    Ok(ApiResponse::ok("Question retrieved", question.into()))
}

/// DELETE /api/questions/:id (admin)
pub async fn delete_question(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<()> {
    state
        .delete_question_handler()
        .handle(QuestionId::from_uuid(id))
        .await?;
    Ok(ApiResponse::message("Question deleted"))
}

/// POST /api/questions/:id/answer
pub async fn answer_question(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<AnswerRequest>,
) -> ApiResult<AnswerResult> {
    let result = state
        .answer_question_handler()
        .handle(AnswerQuestionCommand {
            question_id: QuestionId::from_uuid(id),
            answer: req.answer,
        })
        .await?;
    Ok(ApiResponse::ok("Answer checked", result))
}

/// GET /api/daily-challenge
pub async fn daily_challenge(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> ApiResult<QuestionResponse> {
    let question = state
        .daily_challenge_handler()
        .handle(Timestamp::now().date())
        .await?;
    Ok(ApiResponse::ok("Daily challenge retrieved", question.into()))
}

/// POST /api/daily-challenge/answer
pub async fn answer_daily_challenge(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<AnswerRequest>,
) -> ApiResult<DailyAnswerResponse> {
    let outcome = state
        .answer_daily_challenge_handler()
        .handle(AnswerDailyChallengeCommand {
            user_id: user.id,
            answer: req.answer,
            today: Timestamp::now().date(),
        })
        .await?;
    Ok(ApiResponse::ok("Answer checked", outcome.into()))
}
