//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler is constructed from the ports it needs and exposes `handle`.

pub mod auth;
pub mod feedback;
pub mod forum;
pub mod level;
pub mod question;
pub mod subscription;
pub mod user;
pub mod voice_ai;

#[cfg(test)]
pub(crate) mod test_support;
