//! HTTP routes for the forum.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    create_reply, create_thread, delete_reply, delete_thread, get_thread, list_threads,
};

pub fn forum_routes() -> Router<AppState> {
    Router::new()
        .route("/forum/threads", get(list_threads).post(create_thread))
        .route("/forum/threads/:id", get(get_thread).delete(delete_thread))
        .route("/forum/threads/:id/replies", post(create_reply))
        .route("/forum/replies/:id", delete(delete_reply))
}
