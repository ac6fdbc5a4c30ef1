//! Reset-link encryption key

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct CryptoConfig {
    /// Secret hashed into the AES-256 key for reset-link payloads
    pub aes_key: SecretString,
}

impl CryptoConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let key = self.aes_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("CRYPTO__AES_KEY"));
        }
        if *environment == Environment::Production && key.len() < 32 {
            return Err(ValidationError::SecretTooShort("CRYPTO__AES_KEY"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_key_required() {
        let config = CryptoConfig {
            aes_key: SecretString::new(String::new()),
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_short_key_rejected_in_production() {
        let config = CryptoConfig {
            aes_key: SecretString::new("short".to_string()),
        };
        assert!(config.validate(&Environment::Staging).is_ok());
        assert!(config.validate(&Environment::Production).is_err());
    }
}
