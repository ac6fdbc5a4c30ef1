//! Integration tests for levels, sessions, questions and the daily challenge.

mod common;

use http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn only_admins_manage_levels() {
    let app = TestApp::new();
    let learner = app.signup("ana@example.com").await;
    let admin = app.admin("admin@example.com").await;

    let forbidden = app
        .post(
            "/api/levels",
            Some(&learner),
            json!({ "language": "es", "title": "Basics", "position": 1 }),
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let spanish = app.level(&admin, "ES").await;
    app.level(&admin, "fr").await;

    let listing = app.get("/api/levels?language=es", None).await;
    assert_eq!(listing.status, StatusCode::OK);
    let levels = listing.data().as_array().unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0]["id"], spanish.as_str());
    assert_eq!(levels[0]["language"], "es");

    let deleted = app
        .delete(&format!("/api/levels/{}", spanish), Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let gone = app.get(&format!("/api/levels/{}", spanish), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completing_a_session_starts_a_streak() {
    let app = TestApp::new();
    let admin = app.admin("admin@example.com").await;
    let learner = app.signup("ana@example.com").await;
    let level = app.level(&admin, "es").await;

    let started = app
        .post(
            &format!("/api/levels/{}/sessions", level),
            Some(&learner),
            json!({}),
        )
        .await;
    assert_eq!(started.status, StatusCode::CREATED, "{}", started.body);
    assert_eq!(started.data()["status"], "in_progress");
    let session = started.data()["id"].as_str().unwrap().to_string();

    let completed = app
        .post(
            &format!("/api/sessions/{}/complete", session),
            Some(&learner),
            json!({ "score": 80 }),
        )
        .await;
    assert_eq!(completed.status, StatusCode::OK, "{}", completed.body);
    assert_eq!(completed.data()["session"]["status"], "completed");
    assert_eq!(completed.data()["session"]["score"], 80);
    assert_eq!(completed.data()["streak"]["current"], 1);

    let again = app
        .post(
            &format!("/api/sessions/{}/complete", session),
            Some(&learner),
            json!({ "score": 90 }),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let mine = app.get("/api/sessions/me", Some(&learner)).await;
    assert_eq!(mine.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn session_rules_are_enforced() {
    let app = TestApp::new();
    let admin = app.admin("admin@example.com").await;
    let owner = app.signup("ana@example.com").await;
    let other = app.signup("ben@example.com").await;
    let level = app.level(&admin, "es").await;

    let started = app
        .post(
            &format!("/api/levels/{}/sessions", level),
            Some(&owner),
            json!({}),
        )
        .await;
    let session = started.data()["id"].as_str().unwrap().to_string();
    let uri = format!("/api/sessions/{}/complete", session);

    let stranger = app.post(&uri, Some(&other), json!({ "score": 50 })).await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);

    let out_of_range = app.post(&uri, Some(&owner), json!({ "score": 150 })).await;
    assert_eq!(out_of_range.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn answer_is_hidden_until_attempted() {
    let app = TestApp::new();
    let admin = app.admin("admin@example.com").await;
    let learner = app.signup("ana@example.com").await;
    let level = app.level(&admin, "es").await;
    let question = app.question(&admin, &level, "soy", false).await;

    let fetched = app.get(&format!("/api/questions/{}", question), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert!(fetched.data().get("answer").is_none());
    assert!(fetched.data().get("explanation").is_none());

    let listed = app
        .get(&format!("/api/levels/{}/questions", level), None)
        .await;
    assert_eq!(listed.data().as_array().unwrap().len(), 1);

    let wrong = app
        .post(
            &format!("/api/questions/{}/answer", question),
            Some(&learner),
            json!({ "answer": "eres" }),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::OK);
    assert_eq!(wrong.data()["correct"], false);
    assert_eq!(wrong.data()["answer"], "soy");

    let right = app
        .post(
            &format!("/api/questions/{}/answer", question),
            Some(&learner),
            json!({ "answer": "  SOY " }),
        )
        .await;
    assert_eq!(right.data()["correct"], true);
}

#[tokio::test]
async fn daily_challenge_extends_streak_once_per_day() {
    let app = TestApp::new();
    let admin = app.admin("admin@example.com").await;
    let learner = app.signup("ana@example.com").await;
    let level = app.level(&admin, "es").await;

    let none = app.get("/api/daily-challenge", Some(&learner)).await;
    assert_eq!(none.status, StatusCode::NOT_FOUND);

    let question = app.question(&admin, &level, "soy", true).await;

    let challenge = app.get("/api/daily-challenge", Some(&learner)).await;
    assert_eq!(challenge.status, StatusCode::OK);
    assert_eq!(challenge.data()["id"], question.as_str());
    assert!(challenge.data().get("answer").is_none());

    let wrong = app
        .post(
            "/api/daily-challenge/answer",
            Some(&learner),
            json!({ "answer": "es" }),
        )
        .await;
    assert_eq!(wrong.data()["correct"], false);
    assert_eq!(wrong.data()["streak"]["current"], 0);

    for _ in 0..2 {
        let right = app
            .post(
                "/api/daily-challenge/answer",
                Some(&learner),
                json!({ "answer": "soy" }),
            )
            .await;
        assert_eq!(right.status, StatusCode::OK);
        assert_eq!(right.data()["correct"], true);
        assert_eq!(right.data()["streak"]["current"], 1);
    }
}

#[tokio::test]
async fn invalid_question_is_rejected_before_storage() {
    let app = TestApp::new();
    let admin = app.admin("admin@example.com").await;
    let level = app.level(&admin, "es").await;

    let response = app
        .post(
            "/api/questions",
            Some(&admin),
            json!({
                "level_id": level,
                "kind": "multiple_choice",
                "prompt": "Pick the greeting",
                "options": ["Hola"],
                "answer": "Adiós",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let listed = app
        .get(&format!("/api/levels/{}/questions", level), None)
        .await;
    assert!(listed.data().as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_path_id_is_a_bad_request() {
    let app = TestApp::new();

    let response = app.get("/api/levels/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.messages(), "Invalid path parameter");
}

#[tokio::test]
async fn unknown_route_uses_the_envelope() {
    let app = TestApp::new();

    let response = app.get("/api/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.messages(), "Route not found");
    assert!(response.data().is_null());

    let health = app.get("/health", None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.data()["status"], "ok");
}
