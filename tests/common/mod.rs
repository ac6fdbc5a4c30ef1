//! Shared harness for HTTP integration tests.
//!
//! Builds the real router over in-memory adapters and drives it with
//! `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::Router;
use http::{header, Method, Request, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use dolphin_streak::adapters::auth::{JwtConfig, JwtTokenService};
use dolphin_streak::adapters::crypto::{AesCbcCipher, Argon2PasswordHasher};
use dolphin_streak::adapters::http::{api_router, AppState};
use dolphin_streak::adapters::memory::{InMemoryImageStorage, InMemoryStore, RecordingEmailSender};
use dolphin_streak::application::handlers::auth::ResetLinkSettings;
use dolphin_streak::domain::foundation::Role;
use dolphin_streak::domain::user::{Email, User};
use dolphin_streak::ports::{PasswordHasher, UserRepository};

pub const PASSWORD: &str = "correct horse battery";
pub const FRONTEND_URL: &str = "https://app.dolphinstreak.test";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub emails: Arc<RecordingEmailSender>,
    pub images: Arc<InMemoryImageStorage>,
    hasher: Arc<Argon2PasswordHasher>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    pub fn messages(&self) -> &Value {
        &self.body["messages"]
    }
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        let emails = Arc::new(RecordingEmailSender::new());
        let images = Arc::new(InMemoryImageStorage::new());
        let hasher = Arc::new(Argon2PasswordHasher::with_params(8, 1, 1).unwrap());
        let tokens = Arc::new(JwtTokenService::new(JwtConfig {
            access_secret: SecretString::new("integration-access-secret-0000000001".into()),
            refresh_secret: SecretString::new("integration-refresh-secret-000000001".into()),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 7200,
            issuer: "dolphin-streak-test".to_string(),
        }));

        let state = AppState {
            users: store.clone(),
            levels: store.clone(),
            level_sessions: store.clone(),
            questions: store.clone(),
            subscriptions: store.clone(),
            forum: store.clone(),
            feedback: store.clone(),
            voice_attempts: store.clone(),
            session_validator: tokens.clone(),
            token_issuer: tokens,
            password_hasher: hasher.clone(),
            payload_cipher: Arc::new(AesCbcCipher::new(&SecretString::new(
                "integration-aes-key".into(),
            ))),
            email_sender: emails.clone(),
            image_storage: images.clone(),
            reset_link: ResetLinkSettings {
                frontend_url: FRONTEND_URL.to_string(),
                ttl_secs: 3600,
            },
        };

        Self {
            router: api_router(state),
            store,
            emails,
            images,
            hasher,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, token, None)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, token, None)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::POST, uri, token, Some(body))).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::PATCH, uri, token, Some(body))).await
    }

    /// Signs up through the API and returns the access token.
    pub async fn signup(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/auth/signup",
                None,
                json!({
                    "email": email,
                    "first_name": "Ana",
                    "last_name": "Lopez",
                    "password": PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        access_token(&response)
    }

    /// Stores an admin directly, then logs in through the API.
    pub async fn admin(&self, email: &str) -> String {
        let hash = self.hasher.hash(PASSWORD).unwrap();
        let admin = User::register(
            Email::parse(email).unwrap(),
            "Ada".to_string(),
            "Admin".to_string(),
            hash,
        )
        .with_role(Role::Admin);
        UserRepository::create(self.store.as_ref(), &admin)
            .await
            .unwrap();
        self.login(email, PASSWORD).await
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        access_token(&response)
    }

    /// Creates a level as admin and returns its id.
    pub async fn level(&self, admin_token: &str, language: &str) -> String {
        let response = self
            .post(
                "/api/levels",
                Some(admin_token),
                json!({ "language": language, "title": "Basics", "position": 1 }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }

    /// Creates a fill-in-the-blank question and returns its id.
    pub async fn question(
        &self,
        admin_token: &str,
        level_id: &str,
        answer: &str,
        daily: bool,
    ) -> String {
        let response = self
            .post(
                "/api/questions",
                Some(admin_token),
                json!({
                    "level_id": level_id,
                    "kind": "fill_in_the_blank",
                    "prompt": "Yo ___ estudiante",
                    "answer": answer,
                    "explanation": "Ser describes identity",
                    "daily_challenge": daily,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.data()["id"].as_str().unwrap().to_string()
    }
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn access_token(response: &TestResponse) -> String {
    response.data()["access_token"]
        .as_str()
        .expect("access_token in auth response")
        .to_string()
}

/// Pulls `(encrypted_data, iv)` out of a reset e-mail's plain-text body.
pub fn reset_link_parts(text: &str) -> (String, String) {
    let prefix = format!("{}/auth/change-password/", FRONTEND_URL);
    let start = text.find(&prefix).expect("reset link in e-mail") + prefix.len();
    let link: String = text[start..]
        .chars()
        .take_while(|c| !c.is_whitespace())
        .collect();
    let (encrypted_data, iv) = link.split_once("?iv=").expect("iv query parameter");
    (encrypted_data.to_string(), iv.to_string())
}

/// A multipart body with a single `file` field.
pub fn multipart_upload(uri: &str, token: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    const BOUNDARY: &str = "dolphin-streak-boundary";
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"avatar\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn png(len: usize) -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.resize(len.max(bytes.len()), 0);
    bytes
}
