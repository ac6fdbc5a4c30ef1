//! HTTP adapter for feedback, bug reports and content reports.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery, PageParams};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::feedback::{ListFeedbackQuery, SubmitFeedbackCommand};
use crate::domain::feedback::{Feedback, FeedbackKind, FeedbackStatus};
use crate::domain::foundation::{FeedbackId, Page};

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub kind: FeedbackKind,
    pub message: String,
    #[serde(default)]
    pub target_id: Option<String>,
}

/// Query string for the admin listing. Kept flat so numeric fields parse.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFeedbackParams {
    pub status: Option<FeedbackStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<SubmitFeedbackRequest>,
) -> ApiResult<Feedback> {
    let feedback = state
        .submit_feedback_handler()
        .handle(SubmitFeedbackCommand {
            user_id: user.id,
            kind: req.kind,
            message: req.message,
            target_id: req.target_id,
        })
        .await?;
    Ok(ApiResponse::created("Thanks for your feedback", feedback))
}

/// GET /api/feedback?status=&page=&limit= (admin)
pub async fn list_feedback(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<ListFeedbackParams>,
) -> ApiResult<Page<Feedback>> {
    let page = PageParams {
        page: params.page,
        limit: params.limit,
    }
    .into_request()?;
    let feedback = state
        .list_feedback_handler()
        .handle(ListFeedbackQuery {
            status: params.status,
            page,
        })
        .await?;
    Ok(ApiResponse::ok("Feedback retrieved", feedback))
}

/// POST /api/feedback/:id/resolve (admin)
pub async fn resolve_feedback(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Feedback> {
    let feedback = state
        .resolve_feedback_handler()
        .handle(FeedbackId::from_uuid(id))
        .await?;
    Ok(ApiResponse::ok("Feedback resolved", feedback))
}

pub fn feedback_routes() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(list_feedback).post(submit_feedback))
        .route("/feedback/:id/resolve", post(resolve_feedback))
}
