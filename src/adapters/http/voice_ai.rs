//! HTTP adapter for pronunciation practice.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::adapters::http::extract::{ApiJson, ApiQuery, PageParams};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::voice_ai::SubmitVoiceAttemptCommand;
use crate::domain::foundation::Page;
use crate::domain::voice_ai::VoiceAttempt;

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceAttemptRequest {
    pub language: String,
    pub expected_text: String,
    pub transcript: String,
}

/// POST /api/voice-ai/attempts
pub async fn submit_attempt(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<VoiceAttemptRequest>,
) -> ApiResult<VoiceAttempt> {
    let attempt = state
        .submit_voice_attempt_handler()
        .handle(SubmitVoiceAttemptCommand {
            user_id: user.id,
            language: req.language,
            expected_text: req.expected_text,
            transcript: req.transcript,
        })
        .await?;
    Ok(ApiResponse::created("Attempt scored", attempt))
}

/// GET /api/voice-ai/attempts/me?page=&limit=
pub async fn my_attempts(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<Page<VoiceAttempt>> {
    let attempts = state
        .list_voice_attempts_handler()
        .handle(user.id, params.into_request()?)
        .await?;
    Ok(ApiResponse::ok("Attempts retrieved", attempts))
}

pub fn voice_ai_routes() -> Router<AppState> {
    Router::new()
        .route("/voice-ai/attempts", post(submit_attempt))
        .route("/voice-ai/attempts/me", get(my_attempts))
}
