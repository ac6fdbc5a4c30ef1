//! Integration tests for signup, login, token refresh and password reset.

mod common;

use http::StatusCode;
use serde_json::json;

use common::{reset_link_parts, TestApp, PASSWORD};

#[tokio::test]
async fn signup_returns_profile_and_tokens() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "email": "Ana@Example.com",
                "first_name": "Ana",
                "last_name": "Lopez",
                "password": PASSWORD,
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.messages(), "Account created");
    let data = response.data();
    assert_eq!(data["user"]["email"], "ana@example.com");
    assert_eq!(data["user"]["role"], "user");
    assert!(data["user"].get("password_hash").is_none());
    assert!(data["access_token"].is_string());
    assert!(data["refresh_token"].is_string());
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "Again",
                "password": PASSWORD,
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.data().is_null());
}

#[tokio::test]
async fn signup_reports_every_invalid_field() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "email": "not-an-email",
                "first_name": "",
                "last_name": "Lopez",
                "password": "short",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.messages().as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();

    let response = app
        .post("/api/auth/login", None, json!({ "email": "ana@example.com" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.messages().is_string());
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;

    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ana@example.com", "password": "wrong password" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_issues_a_new_pair() {
    let app = TestApp::new();
    let signup = app
        .post(
            "/api/auth/signup",
            None,
            json!({
                "email": "ana@example.com",
                "first_name": "Ana",
                "last_name": "Lopez",
                "password": PASSWORD,
            }),
        )
        .await;
    let refresh = signup.data()["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            json!({ "refresh_token": refresh }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.data()["access_token"].as_str().unwrap().to_string();

    let me = app.get("/api/users/me", Some(&access)).await;
    assert_eq!(me.status, StatusCode::OK);
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = TestApp::new();
    let access = app.signup("ana@example.com").await;

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            json!({ "refresh_token": access }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn forgot_password_for_unknown_email_is_not_found() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/forgot-password",
            None,
            json!({ "email": "nobody@example.com" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.emails.sent().await.is_empty());
}

#[tokio::test]
async fn password_reset_round_trip() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;

    let response = app
        .post(
            "/api/auth/forgot-password",
            None,
            json!({ "email": "ana@example.com" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.messages(), "Password reset link sent");

    let email = app.emails.last().await.unwrap();
    assert_eq!(email.to, "ana@example.com");
    let (encrypted_data, iv) = reset_link_parts(&email.text);

    let reset = json!({
        "encrypted_data": encrypted_data,
        "iv": iv,
        "new_password": "a brand new passphrase",
    });
    let response = app.post("/api/auth/reset-password", None, reset.clone()).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);

    app.login("ana@example.com", "a brand new passphrase").await;
    let old = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ana@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    // The link is single use.
    let reused = app.post("/api/auth/reset-password", None, reset).await;
    assert_eq!(reused.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tampered_reset_link_is_rejected() {
    let app = TestApp::new();
    app.signup("ana@example.com").await;
    app.post(
        "/api/auth/forgot-password",
        None,
        json!({ "email": "ana@example.com" }),
    )
    .await;
    let (_, iv) = reset_link_parts(&app.emails.last().await.unwrap().text);

    let response = app
        .post(
            "/api/auth/reset-password",
            None,
            json!({
                "encrypted_data": "AAAAAAAAAAAAAAAAAAAAAA",
                "iv": iv,
                "new_password": "a brand new passphrase",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.messages(), "Invalid or expired reset link");
}

#[tokio::test]
async fn protected_route_needs_a_valid_token() {
    let app = TestApp::new();

    let anonymous = app.get("/api/users/me", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.messages(), "Authentication required");

    let forged = app.get("/api/users/me", Some("not.a.jwt")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.messages(), "Invalid token");
}
