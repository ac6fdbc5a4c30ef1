//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, roles, errors, pagination)
//! - `user` - Accounts, credentials, password reset tokens and streaks
//! - `level` - Course levels and level sessions
//! - `question` - Questions, answer checking and the daily challenge
//! - `subscription` - Plans and the subscription lifecycle
//! - `forum` - Threads and replies
//! - `feedback` - Feedback, bug reports and content reports
//! - `voice_ai` - Voice practice attempts and transcript scoring

pub mod feedback;
pub mod forum;
pub mod foundation;
pub mod level;
pub mod question;
pub mod subscription;
pub mod user;
pub mod voice_ai;
