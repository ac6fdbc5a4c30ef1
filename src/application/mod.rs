//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers never touch adapters directly; HTTP state builds them per request.

pub mod email_templates;
pub mod handlers;
