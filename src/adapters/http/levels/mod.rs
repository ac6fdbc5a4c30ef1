//! HTTP adapter for levels and level sessions.

mod dto;
mod handlers;
mod routes;

pub use dto::{CompleteSessionRequest, CompletedSessionResponse, CreateLevelRequest};
pub use routes::level_routes;
