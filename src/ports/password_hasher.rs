//! Password hashing port.

use crate::domain::foundation::DomainError;

/// One-way password hashing with a self-describing (PHC) hash string.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns `Ok(false)` for a wrong password, `Err` only for a corrupt hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
