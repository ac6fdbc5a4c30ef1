//! Fixtures shared by handler tests.

use std::sync::Arc;

use secrecy::SecretString;

use crate::adapters::auth::{JwtConfig, JwtTokenService};
use crate::adapters::crypto::{AesCbcCipher, Argon2PasswordHasher};
use crate::adapters::memory::{InMemoryImageStorage, InMemoryStore, RecordingEmailSender};
use crate::domain::foundation::{AuthenticatedUser, LevelId, Role};
use crate::domain::level::Level;
use crate::domain::question::{NewQuestion, Question, QuestionKind};
use crate::domain::user::{Email, User};
use crate::ports::{LevelRepository, PasswordHasher, QuestionRepository, UserRepository};

pub const PASSWORD: &str = "correct horse battery";

pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub hasher: Arc<Argon2PasswordHasher>,
    pub tokens: Arc<JwtTokenService>,
    pub cipher: Arc<AesCbcCipher>,
    pub emails: Arc<RecordingEmailSender>,
    pub images: Arc<InMemoryImageStorage>,
}

impl Fixture {
    pub fn new() -> Self {
        let tokens = JwtTokenService::new(JwtConfig {
            access_secret: SecretString::new("access-secret-for-handler-tests-0001".into()),
            refresh_secret: SecretString::new("refresh-secret-for-handler-tests-001".into()),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 7200,
            issuer: "dolphin-streak-test".to_string(),
        });
        Self {
            store: Arc::new(InMemoryStore::new()),
            hasher: Arc::new(Argon2PasswordHasher::with_params(8, 1, 1).unwrap()),
            tokens: Arc::new(tokens),
            cipher: Arc::new(AesCbcCipher::new(&SecretString::new(
                "handler-test-aes-key".into(),
            ))),
            emails: Arc::new(RecordingEmailSender::new()),
            images: Arc::new(InMemoryImageStorage::new()),
        }
    }

    /// Stores a user whose password is [`PASSWORD`].
    pub async fn user(&self, email: &str, role: Role) -> User {
        let hash = self.hasher.hash(PASSWORD).unwrap();
        let user = User::register(
            Email::parse(email).unwrap(),
            "Ana".to_string(),
            "Lopez".to_string(),
            hash,
        )
        .with_role(role);
        UserRepository::create(self.store.as_ref(), &user).await.unwrap();
        user
    }

    /// Reloads `user` from the store.
    pub async fn store_user(&self, user: &User) -> User {
        UserRepository::find_by_id(self.store.as_ref(), &user.id)
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn caller(&self, email: &str, role: Role) -> AuthenticatedUser {
        let user = self.user(email, role).await;
        AuthenticatedUser::new(user.id, user.email.as_str(), role)
    }

    pub async fn level(&self, language: &str) -> Level {
        let level = Level::new(language, "Basics", "First steps", 1).unwrap();
        LevelRepository::create(self.store.as_ref(), &level).await.unwrap();
        level
    }

    /// Stores a fill-in-the-blank question answered by `answer`.
    pub async fn question(&self, level_id: LevelId, answer: &str, daily: bool) -> Question {
        let question = Question::new(NewQuestion {
            level_id,
            kind: Some(QuestionKind::FillInTheBlank),
            prompt: format!("Translate: {}", answer),
            answer: answer.to_string(),
            daily_challenge: daily,
            ..Default::default()
        })
        .unwrap();
        QuestionRepository::create(self.store.as_ref(), &question)
            .await
            .unwrap();
        question
    }
}
