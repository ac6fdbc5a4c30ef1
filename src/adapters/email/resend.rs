//! Resend e-mail adapter.
//!
//! Sends through `POST {api_base_url}/emails` with a bearer API key.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{EmailError, EmailMessage, EmailSender};

#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub api_key: SecretString,
    /// Formatted "Name <address>" sender
    pub from: String,
    pub api_base_url: String,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

pub struct ResendEmailSender {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let body = SendEmailRequest {
            from: &self.config.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, error = %error_text, "Resend send failed");
            return Err(if status.is_server_error() {
                EmailError::Unavailable(format!("Resend returned {}", status))
            } else {
                EmailError::Rejected(error_text)
            });
        }

        tracing::debug!(subject = %message.subject, "Email sent via Resend");
        Ok(())
    }
}

impl std::fmt::Debug for ResendEmailSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendEmailSender")
            .field("from", &self.config.from)
            .field("api_base_url", &self.config.api_base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(base: &str) -> ResendEmailSender {
        ResendEmailSender::new(ResendConfig {
            api_key: SecretString::new("re_test".to_string()),
            from: "Dolphin Streak <noreply@dolphinstreak.com>".to_string(),
            api_base_url: base.to_string(),
        })
    }

    #[test]
    fn endpoint_joins_base_url() {
        assert_eq!(
            sender("https://api.resend.com/").endpoint(),
            "https://api.resend.com/emails"
        );
    }

    #[test]
    fn request_body_shape() {
        let body = SendEmailRequest {
            from: "a@example.com",
            to: ["b@example.com"],
            subject: "Hi",
            html: "<p>Hi</p>",
            text: "Hi",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"][0], "b@example.com");
        assert_eq!(json["subject"], "Hi");
    }

    #[test]
    fn debug_hides_api_key() {
        assert!(!format!("{:?}", sender("https://api.resend.com")).contains("re_test"));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        let message = EmailMessage {
            to: "b@example.com".to_string(),
            subject: "Hi".to_string(),
            html: "<p>Hi</p>".to_string(),
            text: "Hi".to_string(),
        };
        let result = sender("http://127.0.0.1:9").send(&message).await;
        assert!(matches!(result, Err(EmailError::Unavailable(_))));
    }
}
