//! HTTP routes for levels and level sessions.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{
    complete_session, create_level, delete_level, get_level, list_levels, my_sessions,
    start_session,
};

/// Level, level-session and per-level question routes share `/levels/:id`,
/// so the question listing is mounted from the questions module.
pub fn level_routes() -> Router<AppState> {
    Router::new()
        .route("/levels", get(list_levels).post(create_level))
        .route("/levels/:id", get(get_level).delete(delete_level))
        .route("/levels/:id/sessions", post(start_session))
        .route("/sessions/me", get(my_sessions))
        .route("/sessions/:id/complete", post(complete_session))
}
