//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `UserRepository`, `LevelRepository`, `LevelSessionRepository`
//! - `QuestionRepository`, `SubscriptionRepository`, `ForumRepository`
//! - `FeedbackRepository`, `VoiceAttemptRepository`
//!
//! ## Service Ports
//!
//! - `SessionValidator` / `TokenIssuer` - Bearer token validation and issuing
//! - `PasswordHasher` - One-way password hashing
//! - `PayloadCipher` - Reset-link payload encryption
//! - `EmailSender` - Outbound e-mail
//! - `ImageStorage` - Profile image storage

mod email_sender;
mod feedback_repository;
mod forum_repository;
mod image_storage;
mod level_repository;
mod password_hasher;
mod payload_cipher;
mod question_repository;
mod session_validator;
mod subscription_repository;
mod token_issuer;
mod user_repository;
mod voice_attempt_repository;

pub use email_sender::{EmailError, EmailMessage, EmailSender};
pub use feedback_repository::FeedbackRepository;
pub use forum_repository::ForumRepository;
pub use image_storage::{ImageStorage, ImageUpload, StorageError, StoredImage};
pub use level_repository::{LevelRepository, LevelSessionRepository};
pub use password_hasher::PasswordHasher;
pub use payload_cipher::{CipherError, EncryptedPayload, PayloadCipher};
pub use question_repository::QuestionRepository;
pub use session_validator::SessionValidator;
pub use subscription_repository::SubscriptionRepository;
pub use token_issuer::{TokenIssuer, TokenPair};
pub use user_repository::UserRepository;
pub use voice_attempt_repository::VoiceAttemptRepository;
