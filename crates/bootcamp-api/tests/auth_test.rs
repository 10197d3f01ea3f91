mod helpers;

use axum::body::Bytes;
use axum::http::StatusCode;
use bootcamp_core::models::ProfileFields;
use helpers::{create_user, setup_test_app, TEST_PASSWORD};
use serde_json::{json, Value};

#[tokio::test]
async fn test_login_issues_bearer_token() {
    let app = setup_test_app().await;
    create_user(&app, "alice", ProfileFields::default()).await;

    let response = app
        .client()
        .post("/login/")
        .json(&json!({ "username": "alice", "password": TEST_PASSWORD }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    let token = body["token"].as_str().unwrap();

    app.client()
        .get("/settings/")
        .authorization_bearer(token)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = setup_test_app().await;
    create_user(&app, "alice", ProfileFields::default()).await;

    for (username, password) in [("alice", "wrong"), ("nobody", TEST_PASSWORD)] {
        let response = app
            .client()
            .post("/login/")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: Value = response.json();
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_login_malformed_body_is_json_error() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/login/")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"username\": \"alice\""))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert_eq!(body["recoverable"], false);

    let response = app
        .client()
        .post("/login/")
        .text("username=alice&password=x")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_inactive_user_cannot_log_in() {
    let app = setup_test_app().await;
    create_user(&app, "mallory", ProfileFields::default()).await;
    app.users.set_active("mallory", false).await.unwrap();

    app.client()
        .post("/login/")
        .json(&json!({ "username": "mallory", "password": TEST_PASSWORD }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/settings/")
        .authorization_bearer("not-a-token")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;
    let body: Value = app.client().get("/health").await.json();
    assert_eq!(body["status"], "ok");
}
