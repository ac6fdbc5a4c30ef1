//! Server entry point: loads configuration, wires adapters and serves the API.

use std::error::Error;
use std::sync::Arc;

use secrecy::SecretString;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use dolphin_streak::adapters::auth::{JwtConfig, JwtTokenService};
use dolphin_streak::adapters::crypto::{AesCbcCipher, Argon2PasswordHasher};
use dolphin_streak::adapters::email::{LogEmailSender, ResendConfig, ResendEmailSender};
use dolphin_streak::adapters::http::{build_app, AppState};
use dolphin_streak::adapters::postgres::{
    self, PostgresFeedbackRepository, PostgresForumRepository, PostgresLevelRepository,
    PostgresLevelSessionRepository, PostgresQuestionRepository, PostgresSubscriptionRepository,
    PostgresUserRepository, PostgresVoiceAttemptRepository,
};
use dolphin_streak::adapters::storage::{
    CloudinaryConfig, CloudinaryImageStorage, LocalImageStorage,
};
use dolphin_streak::application::handlers::auth::ResetLinkSettings;
use dolphin_streak::config::{
    AppConfig, EmailConfig, EmailProvider, StorageConfig, StorageProvider, ValidationError,
};
use dolphin_streak::ports::{EmailSender, ImageStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    info!(environment = ?config.server.environment, "connecting to database");
    let pool = postgres::connect(&config.database).await?;

    let tokens = Arc::new(JwtTokenService::new(JwtConfig {
        access_secret: config.auth.access_token_secret.clone(),
        refresh_secret: config.auth.refresh_token_secret.clone(),
        access_ttl_secs: config.auth.access_token_ttl_secs,
        refresh_ttl_secs: config.auth.refresh_token_ttl_secs,
        issuer: config.auth.issuer.clone(),
    }));

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        levels: Arc::new(PostgresLevelRepository::new(pool.clone())),
        level_sessions: Arc::new(PostgresLevelSessionRepository::new(pool.clone())),
        questions: Arc::new(PostgresQuestionRepository::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        forum: Arc::new(PostgresForumRepository::new(pool.clone())),
        feedback: Arc::new(PostgresFeedbackRepository::new(pool.clone())),
        voice_attempts: Arc::new(PostgresVoiceAttemptRepository::new(pool)),
        session_validator: tokens.clone(),
        token_issuer: tokens,
        password_hasher: Arc::new(Argon2PasswordHasher::new()),
        payload_cipher: Arc::new(AesCbcCipher::new(&config.crypto.aes_key)),
        email_sender: email_sender(&config.email)?,
        image_storage: image_storage(&config.storage)?,
        reset_link: ResetLinkSettings {
            frontend_url: config.server.frontend_base().to_string(),
            ttl_secs: config.auth.reset_token_ttl_secs,
        },
    };

    let uploads_dir = match config.storage.provider {
        StorageProvider::Local => Some(config.storage.local_dir.as_str()),
        StorageProvider::Cloudinary => None,
    };
    let app = build_app(state, &config.server, uploads_dir);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let result = if config.server.json_logs() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn email_sender(config: &EmailConfig) -> Result<Arc<dyn EmailSender>, ValidationError> {
    match config.provider {
        EmailProvider::Log => {
            warn!("e-mail provider is `log`; messages will not be delivered");
            Ok(Arc::new(LogEmailSender))
        }
        EmailProvider::Resend => {
            let api_key = config
                .resend_api_key
                .clone()
                .ok_or(ValidationError::MissingRequired("EMAIL__RESEND_API_KEY"))?;
            Ok(Arc::new(ResendEmailSender::new(ResendConfig {
                api_key,
                from: config.from_header(),
                api_base_url: config.api_base_url.clone(),
            })))
        }
    }
}

fn image_storage(config: &StorageConfig) -> Result<Arc<dyn ImageStorage>, ValidationError> {
    match config.provider {
        StorageProvider::Local => Ok(Arc::new(LocalImageStorage::new(
            &config.local_dir,
            config.public_base_url.clone(),
        ))),
        StorageProvider::Cloudinary => {
            let cloud_name = config
                .cloudinary_cloud_name
                .clone()
                .ok_or(ValidationError::MissingRequired("STORAGE__CLOUDINARY_CLOUD_NAME"))?;
            let api_key = config
                .cloudinary_api_key
                .clone()
                .ok_or(ValidationError::MissingRequired("STORAGE__CLOUDINARY_API_KEY"))?;
            let api_secret: SecretString = config
                .cloudinary_api_secret
                .clone()
                .ok_or(ValidationError::MissingRequired("STORAGE__CLOUDINARY_API_SECRET"))?;
            Ok(Arc::new(CloudinaryImageStorage::new(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
                folder: config.cloudinary_folder.clone(),
                api_base_url: config.cloudinary_api_base_url.clone(),
            })))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
