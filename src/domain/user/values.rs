//! Value objects for user accounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{bounded_text, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_NAME_LEN: usize = 50;
const MAX_EMAIL_LEN: usize = 254;

/// A syntactically valid, lower-cased e-mail address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim().to_lowercase();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if value.len() > MAX_EMAIL_LEN || value.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "must be a valid email"));
        }

        let mut parts = value.split('@');
        let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => (local, domain),
            _ => return Err(ValidationError::invalid_format("email", "must be a valid email")),
        };

        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains("..");
        if local.is_empty() || !domain_ok {
            return Err(ValidationError::invalid_format("email", "must be a valid email"));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates a person's first or last name.
pub fn person_name(field: &str, raw: &str) -> Result<String, ValidationError> {
    bounded_text(field, raw, 1, MAX_NAME_LEN)
}

/// Validates a plaintext password before it is hashed.
///
/// Passwords are not trimmed; surrounding whitespace is significant.
pub fn check_password(field: &str, raw: &str) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = raw.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(ValidationError::invalid_length(
            field,
            MIN_PASSWORD_LEN,
            MAX_PASSWORD_LEN,
        ));
    }
    Ok(())
}
