//! Assembles the REST API and the cross-cutting tower layers.

use std::time::Duration;

use axum::{http::HeaderValue, middleware, Router};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::auth::auth_routes;
use super::feedback::feedback_routes;
use super::forum::forum_routes;
use super::health::health_routes;
use super::levels::level_routes;
use super::middleware::auth_middleware;
use super::questions::question_routes;
use super::response::ApiError;
use super::state::AppState;
use super::subscriptions::subscription_routes;
use super::users::user_routes;
use super::voice_ai::voice_ai_routes;

/// Public path prefix for files served by the local image store.
pub const UPLOADS_PATH: &str = "/uploads";

async fn route_not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

/// Every `/api` route plus `/health`, with bearer tokens resolved on the way in.
///
/// This is the router integration tests drive; [`build_app`] only adds
/// transport concerns around it.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(level_routes())
        .merge(question_routes())
        .merge(subscription_routes())
        .merge(forum_routes())
        .merge(feedback_routes())
        .merge(voice_ai_routes());

    Router::new()
        .nest("/api", api)
        .merge(health_routes())
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(
            state.session_validator.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(60 * 60));

    if origins.is_empty() && !config.is_production() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

/// The full application: API, optional static uploads, request ids,
/// tracing, timeouts and CORS.
pub fn build_app(state: AppState, config: &ServerConfig, uploads_dir: Option<&str>) -> Router {
    let mut app = api_router(state);
    if let Some(dir) = uploads_dir {
        app = app.nest_service(UPLOADS_PATH, ServeDir::new(dir));
    }

    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
