//! HTTP DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::users::UserResponse;
use crate::application::handlers::auth::AuthSession;
use crate::ports::TokenPair;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Body posted by the change-password page; `encrypted_data` and `iv` come
/// from the e-mailed link.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub encrypted_data: String,
    pub iv: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.into(),
            tokens: session.tokens,
        }
    }
}
