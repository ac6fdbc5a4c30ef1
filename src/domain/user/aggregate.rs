//! User aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::foundation::{Role, Timestamp, UserId};

use super::{Email, Streak};

/// A pending password reset: hash of the emailed token plus its deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetToken {
    pub token_hash: String,
    pub expires_at: Timestamp,
}

impl ResetToken {
    /// Creates a reset token entry from the raw token sent to the user.
    pub fn issue(raw_token: &str, expires_at: Timestamp) -> Self {
        Self {
            token_hash: hash_token(raw_token),
            expires_at,
        }
    }

    /// Checks the raw token against the stored hash and the deadline.
    pub fn verify(&self, raw_token: &str, now: Timestamp) -> bool {
        let candidate = hash_token(raw_token);
        let matches: bool = candidate
            .as_bytes()
            .ct_eq(self.token_hash.as_bytes())
            .into();
        matches && !now.is_after(&self.expires_at)
    }
}

/// SHA-256 hex digest of a reset token.
pub fn hash_token(raw_token: &str) -> String {
    hex::encode(Sha256::digest(raw_token.as_bytes()))
}

/// A registered learner or administrator.
///
/// # Invariants
///
/// - `email` is unique across users
/// - `password_hash` is a PHC string, never plaintext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: Role,
    pub profile_image_url: Option<String>,
    /// Storage key of the current profile image.
    pub profile_image_id: Option<String>,
    pub native_language: Option<String>,
    pub learning_language: Option<String>,
    pub streak: Streak,
    pub reset_token: Option<ResetToken>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Registers a new account with the default user role.
    pub fn register(
        email: Email,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            email,
            first_name,
            last_name,
            password_hash,
            role: Role::User,
            profile_image_url: None,
            profile_image_id: None,
            native_language: None,
            learning_language: None,
            streak: Streak::default(),
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Grants a role (used for seeding administrators).
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.touch();
    }

    /// Points the profile at a newly stored image and returns the storage key
    /// of the image it replaces.
    pub fn set_profile_image(&mut self, url: String, public_id: String) -> Option<String> {
        self.profile_image_url = Some(url);
        self.touch();
        self.profile_image_id.replace(public_id)
    }

    /// Stores a new reset token, replacing any previous one.
    pub fn begin_password_reset(&mut self, token: ResetToken) {
        self.reset_token = Some(token);
        self.touch();
    }

    /// Returns true if `raw_token` is the current, unexpired reset token.
    pub fn reset_token_valid(&self, raw_token: &str, now: Timestamp) -> bool {
        self.reset_token
            .as_ref()
            .map(|t| t.verify(raw_token, now))
            .unwrap_or(false)
    }

    /// Replaces the password and consumes the reset token.
    pub fn complete_password_reset(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.reset_token = None;
        self.touch();
    }

    /// Records learning activity for the streak.
    pub fn record_activity(&mut self, today: NaiveDate) {
        self.streak.record(today);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
