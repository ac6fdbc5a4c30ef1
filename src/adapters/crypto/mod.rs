//! Cryptography adapters: reset-link cipher and password hashing.

mod aes_cbc;
mod argon2_hasher;

pub use aes_cbc::AesCbcCipher;
pub use argon2_hasher::Argon2PasswordHasher;
