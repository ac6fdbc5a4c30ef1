//! HTTP handlers for authentication endpoints.

use axum::extract::State;

use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::response::{ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::auth::{
    ForgotPasswordCommand, LoginCommand, RefreshTokenCommand, ResetPasswordCommand, SignupCommand,
};
use crate::ports::TokenPair;

use super::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, RefreshTokenRequest, ResetPasswordRequest,
    SignupRequest,
};

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> ApiResult<AuthResponse> {
    let session = state
        .signup_handler()
        .handle(SignupCommand {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        })
        .await?;
    Ok(ApiResponse::created("Account created", session.into()))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let session = state
        .login_handler()
        .handle(LoginCommand {
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(ApiResponse::ok("Logged in", session.into()))
}

/// POST /api/auth/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> ApiResult<()> {
    state
        .forgot_password_handler()
        .handle(ForgotPasswordCommand { email: req.email })
        .await?;
    Ok(ApiResponse::message("Password reset link sent"))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> ApiResult<()> {
    state
        .reset_password_handler()
        .handle(ResetPasswordCommand {
            encrypted_data: req.encrypted_data,
            iv: req.iv,
            new_password: req.new_password,
        })
        .await?;
    Ok(ApiResponse::message("Password has been reset"))
}

/// POST /api/auth/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshTokenRequest>,
) -> ApiResult<TokenPair> {
    let tokens = state
        .refresh_token_handler()
        .handle(RefreshTokenCommand {
            refresh_token: req.refresh_token,
        })
        .await?;
    Ok(ApiResponse::ok("Token refreshed", tokens))
}
