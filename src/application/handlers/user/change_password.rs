//! ChangePasswordHandler - Replaces the password after checking the current one.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::check_password;
use crate::ports::{PasswordHasher, UserRepository};

use super::load_user;

#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    pub user_id: UserId,
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl ChangePasswordHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: ChangePasswordCommand) -> Result<(), DomainError> {
        check_password("new_password", &cmd.new_password)?;
        if cmd.new_password == cmd.current_password {
            return Err(DomainError::validation(
                "new_password",
                "new_password must differ from the current password",
            ));
        }

        let mut user = load_user(self.users.as_ref(), &cmd.user_id).await?;
        if !self.hasher.verify(&cmd.current_password, &user.password_hash)? {
            return Err(DomainError::new(
                ErrorCode::InvalidCredentials,
                "Current password is incorrect",
            ));
        }

        user.set_password_hash(self.hasher.hash(&cmd.new_password)?);
        self.users.update(&user).await
    }
}
