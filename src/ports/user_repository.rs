//! User repository port.
//!
//! Defines the contract for persisting and retrieving user accounts,
//! including the reset token and streak fields carried on [`User`].

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, Page, PageRequest, UserId};
use crate::domain::user::{Email, User};

/// Repository port for user persistence.
///
/// Implementations must enforce a unique, case-insensitive e-mail.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Save a new user.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if another user has the same e-mail
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Users ordered by signup time, oldest first.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, DomainError>;

    /// Delete a user and everything they own.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn delete(&self, id: &UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn UserRepository) {}
    }
}
