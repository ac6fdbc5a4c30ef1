//! E-mail sender that only logs, for local development.

use async_trait::async_trait;

use crate::ports::{EmailError, EmailMessage, EmailSender};

#[derive(Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.text,
            "Email not sent (log provider)"
        );
        Ok(())
    }
}
