//! HTTP handlers for forum threads and replies.

use axum::extract::State;
use uuid::Uuid;

use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery, PageParams};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::forum::{
    CreateThreadCommand, DeleteReplyCommand, DeleteThreadCommand, ReplyCommand,
};
use crate::domain::forum::{ForumReply, ForumThread, ThreadWithReplies};
use crate::domain::foundation::{ReplyId, ThreadId};

use super::dto::{CreateReplyRequest, CreateThreadRequest, ThreadListResponse};

/// GET /api/forum/threads?page=&limit=
pub async fn list_threads(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<ThreadListResponse> {
    let page = state
        .list_threads_handler()
        .handle(params.into_request()?)
        .await?;
    Ok(ApiResponse::ok("Threads retrieved", page.into()))
}

/// POST /api/forum/threads
pub async fn create_thread(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<CreateThreadRequest>,
) -> ApiResult<ForumThread> {
    let thread = state
        .create_thread_handler()
        .handle(CreateThreadCommand {
            author_id: user.id,
            title: req.title,
            body: req.body,
        })
        .await?;
    Ok(ApiResponse::created("Thread created", thread))
}

/// GET /api/forum/threads/:id
pub async fn get_thread(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ThreadWithReplies> {
    let thread = state
        .get_thread_handler()
        .handle(ThreadId::from_uuid(id))
        .await?;
    Ok(ApiResponse::ok("Thread retrieved", thread))
}

/// DELETE /api/forum/threads/:id (author or admin)
pub async fn delete_thread(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<()> {
    state
        .delete_thread_handler()
        .handle(DeleteThreadCommand {
            actor: user,
            thread_id: ThreadId::from_uuid(id),
        })
        .await?;
    Ok(ApiResponse::message("Thread deleted"))
}

/// POST /api/forum/threads/:id/replies
pub async fn create_reply(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<CreateReplyRequest>,
) -> ApiResult<ForumReply> {
    let reply = state
        .reply_handler()
        .handle(ReplyCommand {
            author_id: user.id,
            thread_id: ThreadId::from_uuid(id),
            body: req.body,
        })
        .await?;
    Ok(ApiResponse::created("Reply posted", reply))
}

/// DELETE /api/forum/replies/:id (author or admin)
pub async fn delete_reply(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<()> {
    state
        .delete_reply_handler()
        .handle(DeleteReplyCommand {
            actor: user,
            reply_id: ReplyId::from_uuid(id),
        })
        .await?;
    Ok(ApiResponse::message("Reply deleted"))
}
