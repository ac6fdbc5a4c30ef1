//! AES-256-CBC payload cipher.
//!
//! The key is the SHA-256 digest of the configured secret, so any secret
//! length yields a valid 32-byte key. Every encryption draws a fresh random
//! 16-byte IV. Ciphertext and IV travel as base64url without padding so they
//! can sit in a URL path segment and query string unescaped.

use aes::Aes256;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::ports::{CipherError, EncryptedPayload, PayloadCipher};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

const IV_LEN: usize = 16;

pub struct AesCbcCipher {
    key: [u8; 32],
}

impl AesCbcCipher {
    pub fn new(secret: &SecretString) -> Self {
        let mut key = [0u8; 32];
        key.copy_from_slice(&Sha256::digest(secret.expose_secret().as_bytes()));
        Self { key }
    }
}

impl PayloadCipher for AesCbcCipher {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedPayload, CipherError> {
        let mut iv = [0u8; IV_LEN];
        rand::thread_rng().fill_bytes(&mut iv);

        let cipher = Aes256CbcEnc::new_from_slices(&self.key, &iv)
            .map_err(|e| CipherError::Encryption(e.to_string()))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(EncryptedPayload {
            encrypted_data: URL_SAFE_NO_PAD.encode(ciphertext),
            iv: URL_SAFE_NO_PAD.encode(iv),
        })
    }

    fn decrypt(&self, payload: &EncryptedPayload) -> Result<String, CipherError> {
        let ciphertext = URL_SAFE_NO_PAD
            .decode(payload.encrypted_data.as_bytes())
            .map_err(|e| CipherError::InvalidPayload(format!("ciphertext: {}", e)))?;
        let iv = URL_SAFE_NO_PAD
            .decode(payload.iv.as_bytes())
            .map_err(|e| CipherError::InvalidPayload(format!("iv: {}", e)))?;
        if iv.len() != IV_LEN {
            return Err(CipherError::InvalidPayload(format!(
                "iv must be {} bytes, got {}",
                IV_LEN,
                iv.len()
            )));
        }

        let cipher = Aes256CbcDec::new_from_slices(&self.key, &iv)
            .map_err(|e| CipherError::InvalidPayload(e.to_string()))?;
        let plaintext = cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CipherError::InvalidPayload("bad padding".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|_| CipherError::InvalidPayload("plaintext is not UTF-8".to_string()))
    }
}

impl std::fmt::Debug for AesCbcCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCbcCipher").finish_non_exhaustive()
    }
}
