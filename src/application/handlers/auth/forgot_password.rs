//! ForgotPasswordHandler - Issues a one-time reset link by e-mail.
//!
//! The link carries `"<user id>:<token>"` encrypted with the payload cipher.
//! Only the SHA-256 of the token is stored on the user.

use std::sync::Arc;

use rand::RngCore;

use crate::application::email_templates;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::user::{Email, ResetToken};
use crate::ports::{EmailSender, PayloadCipher, UserRepository};

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct ForgotPasswordCommand {
    pub email: String,
}

/// Where reset links point and how long they stay valid.
#[derive(Debug, Clone)]
pub struct ResetLinkSettings {
    pub frontend_url: String,
    pub ttl_secs: u64,
}

impl ResetLinkSettings {
    fn link(&self, encrypted_data: &str, iv: &str) -> String {
        format!(
            "{}/auth/change-password/{}?iv={}",
            self.frontend_url.trim_end_matches('/'),
            encrypted_data,
            iv
        )
    }
}

pub struct ForgotPasswordHandler {
    users: Arc<dyn UserRepository>,
    cipher: Arc<dyn PayloadCipher>,
    email_sender: Arc<dyn EmailSender>,
    settings: ResetLinkSettings,
}

impl ForgotPasswordHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        cipher: Arc<dyn PayloadCipher>,
        email_sender: Arc<dyn EmailSender>,
        settings: ResetLinkSettings,
    ) -> Self {
        Self {
            users,
            cipher,
            email_sender,
            settings,
        }
    }

    pub async fn handle(&self, cmd: ForgotPasswordCommand) -> Result<(), DomainError> {
        let email = Email::parse(&cmd.email)?;
        let mut user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            DomainError::not_found(ErrorCode::UserNotFound, "No account found for this email")
        })?;

        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let raw_token = hex::encode(bytes);

        let expires_at = Timestamp::now().plus_secs(self.settings.ttl_secs);
        user.begin_password_reset(ResetToken::issue(&raw_token, expires_at));

        let payload = self
            .cipher
            .encrypt(&format!("{}:{}", user.id, raw_token))?;
        let link = self.settings.link(&payload.encrypted_data, &payload.iv);

        self.users.update(&user).await?;

        let message = email_templates::password_reset(
            user.email.as_str(),
            &user.first_name,
            &link,
            self.settings.ttl_secs / 60,
        );
        self.email_sender.send(&message).await?;

        tracing::info!(user_id = %user.id, "password reset requested");
        Ok(())
    }
}
