//! HTTP routes for user endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::adapters::http::state::AppState;
use crate::application::handlers::user::MAX_IMAGE_BYTES;

use super::handlers::{
    change_password, delete_user, get_me, list_users, update_me, upload_profile_image,
};

/// Multipart framing on top of the largest accepted image.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/me", get(get_me).patch(update_me))
        .route("/users/me/password", post(change_password))
        .route(
            "/users/me/profile-image",
            post(upload_profile_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + UPLOAD_OVERHEAD_BYTES)),
        )
        .route("/users/:id", delete(delete_user))
}
