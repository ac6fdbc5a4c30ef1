//! Liveness probe.

use axum::{routing::get, Router};
use serde::Serialize;

use super::response::{ApiResponse, ApiResult};

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> ApiResult<HealthResponse> {
    Ok(ApiResponse::ok(
        "OK",
        HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
    ))
}

pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
