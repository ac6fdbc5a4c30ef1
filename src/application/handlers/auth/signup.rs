//! SignupHandler - Registers a new account and signs it in.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Violations};
use crate::domain::user::{check_password, person_name, Email, User};
use crate::ports::{PasswordHasher, TokenIssuer, UserRepository};

use super::{principal, AuthSession};

#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct SignupHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl SignupHandler {
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

    pub async fn handle(&self, cmd: SignupCommand) -> Result<AuthSession, DomainError> {
        let mut violations = Violations::new();
        let email = violations.check(Email::parse(&cmd.email));
        let first_name = violations.check(person_name("first_name", &cmd.first_name));
        let last_name = violations.check(person_name("last_name", &cmd.last_name));
        violations.check(check_password("password", &cmd.password));
        violations.finish()?;

        let (Some(email), Some(first_name), Some(last_name)) = (email, first_name, last_name)
        else {
            return Err(DomainError::internal("signup validation inconsistent"));
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email is already registered",
            ));
        }

        let password_hash = self.hasher.hash(&cmd.password)?;
        let user = User::register(email, first_name, last_name, password_hash);
        self.users.create(&user).await?;

        let tokens = self.tokens.issue(&principal(&user))?;
        tracing::info!(user_id = %user.id, "user signed up");

        Ok(AuthSession { user, tokens })
    }
}
