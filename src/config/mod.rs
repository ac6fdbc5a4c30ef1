//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `DOLPHIN_STREAK` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use dolphin_streak::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod crypto;
mod database;
mod email;
mod error;
mod server;
mod storage;

pub use auth::AuthConfig;
pub use crypto::CryptoConfig;
pub use database::DatabaseConfig;
pub use email::{EmailConfig, EmailProvider};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageConfig, StorageProvider};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: DatabaseConfig,

    pub auth: AuthConfig,

    pub crypto: CryptoConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the environment.
    ///
    /// - `DOLPHIN_STREAK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `DOLPHIN_STREAK__AUTH__ACCESS_TOKEN_SECRET=...` -> `auth.access_token_secret`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or a value
    /// cannot be parsed into its expected type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DOLPHIN_STREAK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation of every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = self.server.environment;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&environment)?;
        self.crypto.validate(&environment)?;
        self.email.validate()?;
        self.storage.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
