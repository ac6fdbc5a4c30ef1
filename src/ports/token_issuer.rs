//! Token issuing port: access/refresh token pairs.

use serde::Serialize;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};

/// A freshly minted access/refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

/// Issues token pairs and validates refresh tokens.
pub trait TokenIssuer: Send + Sync {
    /// Mint a new access/refresh pair for `user`.
    fn issue(&self, user: &AuthenticatedUser) -> Result<TokenPair, AuthError>;

    /// Validate a refresh token and return the user it was issued to.
    ///
    /// Access tokens must be rejected with `AuthError::InvalidToken`.
    fn verify_refresh(&self, token: &str) -> Result<UserId, AuthError>;
}
