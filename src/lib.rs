//! Dolphin Streak - Language-learning backend
//!
//! Accounts and password resets, course levels with practice sessions,
//! a question bank with a daily challenge and streaks, subscriptions,
//! a discussion forum, feedback and scored pronunciation attempts.
//!
//! The crate is laid out in hexagonal layers: `domain` holds the rules,
//! `ports` the traits the application needs, `application` the command and
//! query handlers, and `adapters` the PostgreSQL, HTTP and provider
//! implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
