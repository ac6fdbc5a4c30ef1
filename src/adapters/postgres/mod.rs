//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserRepository` - Accounts, streaks and reset tokens
//! - `PostgresLevelRepository` / `PostgresLevelSessionRepository` - Course levels and attempts
//! - `PostgresQuestionRepository` - Question bank and daily challenge pool
//! - `PostgresSubscriptionRepository` - One subscription row per user
//! - `PostgresForumRepository` - Threads and replies
//! - `PostgresFeedbackRepository` - Feedback, bug reports and content reports
//! - `PostgresVoiceAttemptRepository` - Scored pronunciation attempts

mod common;
mod feedback_repository;
mod forum_repository;
mod level_repository;
mod question_repository;
mod subscription_repository;
mod user_repository;
mod voice_attempt_repository;

use sqlx::postgres::{PgPool, PgPoolOptions};
use secrecy::ExposeSecret;

use crate::config::DatabaseConfig;

pub use feedback_repository::PostgresFeedbackRepository;
pub use forum_repository::PostgresForumRepository;
pub use level_repository::{PostgresLevelRepository, PostgresLevelSessionRepository};
pub use question_repository::PostgresQuestionRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use user_repository::PostgresUserRepository;
pub use voice_attempt_repository::PostgresVoiceAttemptRepository;

/// Opens a connection pool and applies pending migrations when enabled.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(config.url.expose_secret())
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
    }
    Ok(pool)
}
