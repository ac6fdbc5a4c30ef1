//! In-memory adapters.
//!
//! [`InMemoryStore`] implements every repository port over one shared set of
//! tables, so cascading deletes behave like the PostgreSQL schema. Used by
//! tests and for running the API without a database.

mod content;
mod community;
mod services;
mod store;
mod users;

pub use services::{InMemoryImageStorage, RecordingEmailSender};
pub use store::InMemoryStore;
