//! ResetPasswordHandler - Sets a new password from a reset link.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::user::check_password;
use crate::ports::{EncryptedPayload, PasswordHasher, PayloadCipher, UserRepository};

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub encrypted_data: String,
    pub iv: String,
    pub new_password: String,
}

pub struct ResetPasswordHandler {
    users: Arc<dyn UserRepository>,
    cipher: Arc<dyn PayloadCipher>,
    hasher: Arc<dyn PasswordHasher>,
}

fn invalid_link() -> DomainError {
    DomainError::new(ErrorCode::InvalidResetLink, "Invalid or expired reset link")
}

impl ResetPasswordHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cipher: Arc<dyn PayloadCipher>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            cipher,
            hasher,
        }
    }

    pub async fn handle(&self, cmd: ResetPasswordCommand) -> Result<(), DomainError> {
        check_password("new_password", &cmd.new_password)?;

        let plaintext = self
            .cipher
            .decrypt(&EncryptedPayload {
                encrypted_data: cmd.encrypted_data,
                iv: cmd.iv,
            })
            .map_err(|_| invalid_link())?;
        let (user_id, raw_token) = plaintext.split_once(':').ok_or_else(invalid_link)?;
        let user_id: UserId = user_id.parse().map_err(|_| invalid_link())?;

        let mut user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(invalid_link)?;
        if !user.reset_token_valid(raw_token, Timestamp::now()) {
            return Err(invalid_link());
        }

        let password_hash = self.hasher.hash(&cmd.new_password)?;
        user.complete_password_reset(password_hash);
        self.users.update(&user).await?;

        tracing::info!(user_id = %user.id, "password reset completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Fixture;
    use crate::domain::foundation::Role;
    use crate::domain::user::{ResetToken, User};

    fn handler(f: &Fixture) -> ResetPasswordHandler {
        ResetPasswordHandler::new(f.store.clone(), f.cipher.clone(), f.hasher.clone())
    }

    async fn pending_reset(f: &Fixture, expires_at: Timestamp) -> (User, EncryptedPayload) {
        let mut user = f.user("ana@example.com", Role::User).await;
        user.begin_password_reset(ResetToken::issue("raw-token", expires_at));
        UserRepository::update(f.store.as_ref(), &user).await.unwrap();
        let payload = f
            .cipher
            .encrypt(&format!("{}:raw-token", user.id))
            .unwrap();
        (user, payload)
    }

    fn command(payload: &EncryptedPayload, password: &str) -> ResetPasswordCommand {
        ResetPasswordCommand {
            encrypted_data: payload.encrypted_data.clone(),
            iv: payload.iv.clone(),
            new_password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn replaces_password_and_consumes_token() {
        let f = Fixture::new();
        let (user, payload) = pending_reset(&f, Timestamp::now().plus_secs(600)).await;

        handler(&f)
            .handle(command(&payload, "brand-new-password"))
            .await
            .unwrap();

        let stored = f.store_user(&user).await;
        assert!(stored.reset_token.is_none());
        assert!(f
            .hasher
            .verify("brand-new-password", &stored.password_hash)
            .unwrap());

        let reused = handler(&f)
            .handle(command(&payload, "another-password"))
            .await
            .unwrap_err();
        assert_eq!(reused.code, ErrorCode::InvalidResetLink);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let f = Fixture::new();
        let expired = Timestamp::from_datetime(chrono::Utc::now() - chrono::Duration::seconds(5));
        let (_, payload) = pending_reset(&f, expired).await;

        let err = handler(&f)
            .handle(command(&payload, "brand-new-password"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResetLink);
    }

    #[tokio::test]
    async fn tampered_payload_is_rejected() {
        let f = Fixture::new();
        let (_, payload) = pending_reset(&f, Timestamp::now().plus_secs(600)).await;
        let tampered = EncryptedPayload {
            encrypted_data: "AAAA".to_string(),
            iv: payload.iv.clone(),
        };

        let err = handler(&f)
            .handle(command(&tampered, "brand-new-password"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidResetLink);
    }

    #[tokio::test]
    async fn weak_password_fails_validation_first() {
        let f = Fixture::new();
        let (_, payload) = pending_reset(&f, Timestamp::now().plus_secs(600)).await;

        let err = handler(&f).handle(command(&payload, "short")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
