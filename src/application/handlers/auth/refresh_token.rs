//! RefreshTokenHandler - Trades a refresh token for a new pair.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, DomainError};
use crate::ports::{TokenIssuer, TokenPair, UserRepository};

use super::principal;

#[derive(Debug, Clone)]
pub struct RefreshTokenCommand {
    pub refresh_token: String,
}

pub struct RefreshTokenHandler {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenIssuer>,
}

impl RefreshTokenHandler {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub async fn handle(&self, cmd: RefreshTokenCommand) -> Result<TokenPair, DomainError> {
        let user_id = self.tokens.verify_refresh(&cmd.refresh_token)?;
        // Role changes and deletions take effect on the next refresh.
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(self.tokens.issue(&principal(&user))?)
    }
}
