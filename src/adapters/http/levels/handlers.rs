//! HTTP handlers for levels and level sessions.

use axum::extract::State;
use uuid::Uuid;

use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::level::{
    CompleteSessionCommand, CreateLevelCommand, ListLevelsQuery, StartSessionCommand,
};
use crate::domain::foundation::{LevelId, LevelSessionId};
use crate::domain::level::{Level, LevelSession};

use super::dto::{
    CompleteSessionRequest, CompletedSessionResponse, CreateLevelRequest, ListLevelsParams,
};

/// GET /api/levels?language=
pub async fn list_levels(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListLevelsParams>,
) -> ApiResult<Vec<Level>> {
    let levels = state
        .list_levels_handler()
        .handle(ListLevelsQuery {
            language: params.language,
        })
        .await?;
    Ok(ApiResponse::ok("Levels retrieved", levels))
}

/// GET /api/levels/:id
pub async fn get_level(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Level> {
    let level = state.get_level_handler().handle(LevelId::from_uuid(id)).await?;
    Ok(ApiResponse::ok("Level retrieved", level))
}

/// POST /api/levels (admin)
pub async fn create_level(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiJson(req): ApiJson<CreateLevelRequest>,
) -> ApiResult<Level> {
    let level = state
        .create_level_handler()
        .handle(CreateLevelCommand {
            language: req.language,
            title: req.title,
            description: req.description,
            position: req.position,
        })
        .await?;
    Ok(ApiResponse::created("Level created", level))
}

/// DELETE /api/levels/:id (admin)
pub async fn delete_level(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<()> {
    state
        .delete_level_handler()
        .handle(LevelId::from_uuid(id))
        .await?;
    Ok(ApiResponse::message("Level deleted"))
}

/// POST /api/levels/:id/sessions
pub async fn start_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<LevelSession> {
    let session = state
        .start_session_handler()
        .handle(StartSessionCommand {
            user_id: user.id,
            level_id: LevelId::from_uuid(id),
        })
        .await?;
    Ok(ApiResponse::created("Session started", session))
}

/// POST /api/sessions/:id/complete
pub async fn complete_session(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CompleteSessionRequest>,
) -> ApiResult<CompletedSessionResponse> {
    let completed = state
        .complete_session_handler()
        .handle(CompleteSessionCommand {
            actor: user,
            session_id: LevelSessionId::from_uuid(id),
            score: req.score,
        })
        .await?;
    Ok(ApiResponse::ok("Session completed", completed.into()))
}

/// GET /api/sessions/me
pub async fn my_sessions(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<Vec<LevelSession>> {
    let sessions = state.list_sessions_handler().handle(user.id).await?;
    Ok(ApiResponse::ok("Sessions retrieved", sessions))
}
