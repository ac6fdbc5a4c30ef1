//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token middleware plus the `RequireAuth` / `RequireAdmin`
//!   guards

pub mod auth;

pub use auth::{auth_middleware, AuthState, RequireAdmin, RequireAuth};
