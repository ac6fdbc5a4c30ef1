//! Session validation port for bearer access tokens.
//!
//! HTTP middleware calls this to turn an `Authorization: Bearer` token into
//! an [`AuthenticatedUser`]. The JWT adapter is the production implementation;
//! tests use the in-memory mock.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature, issuer and expiry
/// - Reject refresh tokens presented as access tokens
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
