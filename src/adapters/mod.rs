//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - JWT issuing and validation
//! - `crypto` - AES-CBC reset-link cipher, Argon2 password hashing
//! - `email` - Resend API and a log-only sender
//! - `http` - axum REST API
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories
//! - `storage` - Profile image storage (local disk, Cloudinary)

pub mod auth;
pub mod crypto;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
