//! Account access: signup, login, password reset and token refresh.

mod forgot_password;
mod login;
mod refresh_token;
mod reset_password;
mod signup;

pub use forgot_password::{ForgotPasswordCommand, ForgotPasswordHandler, ResetLinkSettings};
pub use login::{LoginCommand, LoginHandler};
pub use refresh_token::{RefreshTokenCommand, RefreshTokenHandler};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler};
pub use signup::{SignupCommand, SignupHandler};

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::user::User;
use crate::ports::TokenPair;

/// A user together with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

pub(crate) fn principal(user: &User) -> AuthenticatedUser {
    AuthenticatedUser::new(user.id, user.email.as_str(), user.role)
}
