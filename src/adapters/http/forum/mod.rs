//! HTTP adapter for forum threads and replies.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateReplyRequest, CreateThreadRequest, ThreadListResponse};
pub use routes::forum_routes;
