//! Token signing configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// JWT and password reset settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub access_token_secret: SecretString,

    pub refresh_token_secret: SecretString,

    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,

    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// Lifetime of an e-mailed password reset link
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_secs: u64,

    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl AuthConfig {
    /// Secrets must be present and distinct; production also enforces length.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let access = self.access_token_secret.expose_secret();
        let refresh = self.refresh_token_secret.expose_secret();

        if access.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN_SECRET"));
        }
        if refresh.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__REFRESH_TOKEN_SECRET"));
        }
        if access == refresh {
            return Err(ValidationError::SecretsMustDiffer);
        }
        if *environment == Environment::Production {
            if access.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("AUTH__ACCESS_TOKEN_SECRET"));
            }
            if refresh.len() < MIN_PRODUCTION_SECRET_LEN {
                return Err(ValidationError::SecretTooShort("AUTH__REFRESH_TOKEN_SECRET"));
            }
        }
        if self.access_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTtl("AUTH__ACCESS_TOKEN_TTL_SECS"));
        }
        if self.refresh_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTtl("AUTH__REFRESH_TOKEN_TTL_SECS"));
        }
        if self.reset_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTtl("AUTH__RESET_TOKEN_TTL_SECS"));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_secret: SecretString::new(String::new()),
            refresh_token_secret: SecretString::new(String::new()),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
            reset_token_ttl_secs: default_reset_ttl(),
            issuer: default_issuer(),
        }
    }
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 3600
}

fn default_reset_ttl() -> u64 {
    3600
}

fn default_issuer() -> String {
    "dolphin-streak".to_string()
}
