mod helpers;

use axum::http::StatusCode;
use bootcamp_core::models::ProfileFields;
use helpers::{create_user, setup_test_app};
use serde_json::Value;

fn named(first: &str, last: &str) -> ProfileFields {
    ProfileFields {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_unknown_profile_is_404() {
    let app = setup_test_app().await;
    app.client()
        .get("/profile/nobody/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_with_feed() {
    let app = setup_test_app().await;
    create_user(&app, "alice", named("Alice", "Liddell")).await;
    create_user(&app, "bob", ProfileFields::default()).await;

    let first = app.feeds.insert("alice", "first post", None).await;
    app.feeds.insert("bob", "not alice", None).await;
    app.feeds.insert("alice", "a reply", Some(first.id)).await;
    let newest = app.feeds.insert("alice", "second post", None).await;

    let body: Value = app.client().get("/profile/alice/").await.json();

    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["display_name"], "Alice Liddell");
    assert_eq!(body["user"]["picture_url"], "/static/img/user.png");
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["page"], 1);
    assert_eq!(body["from_feed"], newest.id);

    let posts: Vec<&str> = body["feeds"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["post"].as_str().unwrap())
        .collect();
    assert_eq!(posts, vec!["second post", "first post"]);
}

#[tokio::test]
async fn test_profile_without_feed() {
    let app = setup_test_app().await;
    create_user(&app, "carol", ProfileFields::default()).await;

    let body: Value = app.client().get("/profile/carol/").await.json();
    assert_eq!(body["from_feed"], -1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["feeds"].as_array().unwrap().len(), 0);
    assert_eq!(body["user"]["display_name"], "carol");
}

#[tokio::test]
async fn test_network_lists_active_users_by_username() {
    let app = setup_test_app().await;
    for name in ["mallory", "bob", "alice", "trent"] {
        create_user(&app, name, ProfileFields::default()).await;
    }
    app.users.set_active("mallory", false).await.unwrap();

    let body: Value = app.client().get("/network/").await.json();
    let names: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "bob", "trent"]);
}

#[tokio::test]
async fn test_home_feed() {
    let app = setup_test_app().await;
    create_user(&app, "alice", ProfileFields::default()).await;

    let empty: Value = app.client().get("/").await.json();
    assert_eq!(empty["from_feed"], -1);

    app.feeds.insert("alice", "hello", None).await;
    let latest = app.feeds.insert("alice", "again", None).await;

    let body: Value = app.client().get("/").await.json();
    assert_eq!(body["from_feed"], latest.id);
    assert_eq!(body["feeds"][0]["post"], "again");
}
