//! Profile read and update handlers.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId, ValidationError, Violations};
use crate::domain::level::language;
use crate::domain::user::{person_name, User};
use crate::ports::UserRepository;

use super::load_user;

pub struct GetProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, user_id: UserId) -> Result<User, DomainError> {
        load_user(self.users.as_ref(), &user_id).await
    }
}

/// Partial profile update. `None` leaves a field unchanged; a blank
/// language clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

fn optional_language(raw: Option<&str>) -> Option<Result<Option<String>, ValidationError>> {
    raw.map(|value| match value.trim() {
        "" => Ok(None),
        v => language(v).map(Some),
    })
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, DomainError> {
        let mut violations = Violations::new();
        let first_name = cmd
            .first_name
            .as_deref()
            .and_then(|v| violations.check(person_name("first_name", v)));
        let last_name = cmd
            .last_name
            .as_deref()
            .and_then(|v| violations.check(person_name("last_name", v)));
        let native = optional_language(cmd.native_language.as_deref())
            .and_then(|r| violations.check(r));
        let learning = optional_language(cmd.learning_language.as_deref())
            .and_then(|r| violations.check(r));
        violations.finish()?;

        let mut user = load_user(self.users.as_ref(), &cmd.user_id).await?;
        if let Some(first_name) = first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            user.last_name = last_name;
        }
        if let Some(native) = native {
            user.native_language = native;
        }
        if let Some(learning) = learning {
            user.learning_language = learning;
        }
        user.updated_at = Timestamp::now();

        self.users.update(&user).await?;
        Ok(user)
    }
}
