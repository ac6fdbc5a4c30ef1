//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own module exposing a `*_routes()` function; the
//! router merges them under `/api`. Every response, success or failure,
//! uses the `{ messages, data }` envelope from [`response`].

pub mod auth;
pub mod extract;
pub mod feedback;
pub mod forum;
pub mod health;
pub mod levels;
pub mod middleware;
pub mod questions;
pub mod response;
pub mod router;
pub mod state;
pub mod subscriptions;
pub mod users;
pub mod voice_ai;

pub use middleware::{auth_middleware, AuthState, RequireAdmin, RequireAuth};
pub use response::{ApiError, ApiResponse, ApiResult};
pub use router::{api_router, build_app, UPLOADS_PATH};
pub use state::AppState;
