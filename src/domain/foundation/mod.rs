//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Dolphin Streak domain.

mod auth;
mod errors;
mod ids;
mod pagination;
mod text;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use errors::{DomainError, ErrorCode, ValidationError, Violations};
pub use ids::{
    FeedbackId, LevelId, LevelSessionId, QuestionId, ReplyId, SubscriptionId, ThreadId, UserId,
    VoiceAttemptId,
};
pub use pagination::{Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use text::{bounded_text, normalize, optional_text};
pub use timestamp::Timestamp;
