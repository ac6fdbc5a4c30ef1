//! LoginHandler - Exchanges e-mail and password for a token pair.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::Email;
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{principal, AuthSession};

#[derive(Debug, Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

pub struct LoginHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

fn invalid_credentials() -> DomainError {
    DomainError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
}

impl LoginHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<AuthSession, DomainError> {
        if cmd.password.is_empty() {
            return Err(DomainError::validation("password", "password should not be empty"));
        }
        let email = Email::parse(&cmd.email).map_err(|_| invalid_credentials())?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify(&cmd.password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "login rejected");
            return Err(invalid_credentials());
        }

        let tokens = self.tokens.issue(&principal(&user))?;
        Ok(AuthSession { user, tokens })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{Fixture, PASSWORD};
    use crate::domain::foundation::Role;
    use crate::ports::SessionValidator;

    fn handler(f: &Fixture) -> LoginHandler {
        LoginHandler::new(f.store.clone(), f.hasher.clone(), f.tokens.clone())
    }

    fn command(email: &str, password: &str) -> LoginCommand {
        LoginCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn issues_tokens_carrying_the_role() {
        let f = Fixture::new();
        let admin = f.user("admin@example.com", Role::Admin).await;

        let session = handler(&f)
            .handle(command("admin@example.com", PASSWORD))
            .await
            .unwrap();
        let principal = f.tokens.validate(&session.tokens.access_token).await.unwrap();

        assert_eq!(principal.id, admin.id);
        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let f = Fixture::new();
        f.user("ana@example.com", Role::User).await;

        let wrong = handler(&f)
            .handle(command("ana@example.com", "not the password"))
            .await
            .unwrap_err();
        let unknown = handler(&f)
            .handle(command("nobody@example.com", PASSWORD))
            .await
            .unwrap_err();

        assert_eq!(wrong.code, ErrorCode::InvalidCredentials);
        assert_eq!(unknown.code, ErrorCode::InvalidCredentials);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn empty_password_is_a_validation_error() {
        let f = Fixture::new();
        let err = handler(&f)
            .handle(command("ana@example.com", ""))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
