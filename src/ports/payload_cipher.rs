//! Symmetric encryption of small payloads embedded in links.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Ciphertext plus the IV it was produced with, both base64url encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    pub encrypted_data: String,
    pub iv: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Bad encoding, wrong IV length, bad padding or non-UTF-8 plaintext.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("encryption failed: {0}")]
    Encryption(String),
}

impl From<CipherError> for DomainError {
    fn from(err: CipherError) -> Self {
        let code = match err {
            CipherError::InvalidPayload(_) => ErrorCode::InvalidResetLink,
            CipherError::Encryption(_) => ErrorCode::InternalError,
        };
        DomainError::new(code, err.to_string())
    }
}

pub trait PayloadCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedPayload, CipherError>;

    fn decrypt(&self, payload: &EncryptedPayload) -> Result<String, CipherError>;
}
