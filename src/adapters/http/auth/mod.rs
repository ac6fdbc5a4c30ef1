//! HTTP adapter for signup, login, password reset and token refresh.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest, ResetPasswordRequest,
    SignupRequest,
};
pub use routes::auth_routes;
