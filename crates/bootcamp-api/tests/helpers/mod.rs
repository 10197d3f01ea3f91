#![allow(dead_code)]

use axum_test::TestServer;
use bootcamp_api::auth::password::hash_password;
use bootcamp_api::services::AvatarService;
use bootcamp_api::setup::routes::setup_routes;
use bootcamp_api::AppState;
use bootcamp_core::models::{NewUser, ProfileFields};
use bootcamp_core::Config;
use bootcamp_db::{InMemoryFeedStore, InMemoryUserStore, UserStore};
use bootcamp_storage::LocalStorage;
use image::{ImageFormat, Rgb, RgbImage};
use serde_json::json;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_PASSWORD: &str = "correct-horse";

/// Test application backed by in-memory stores and a temporary media root.
pub struct TestApp {
    pub server: TestServer,
    pub users: InMemoryUserStore,
    pub feeds: InMemoryFeedStore,
    pub media: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn media_path(&self, key: &str) -> PathBuf {
        self.media.path().join(key)
    }
}

pub fn test_config(media_root: &Path) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        media_root: media_root.to_path_buf(),
        media_url: "/media/".to_string(),
        default_avatar_url: "/static/img/user.png".to_string(),
        database_url: None,
        db_max_connections: 1,
        db_timeout_seconds: 1,
        jwt_secret: "test-jwt-secret-at-least-32-characters-long".to_string(),
        jwt_expiry_hours: 1,
        max_picture_size_bytes: 2 * 1024 * 1024,
        seed_account: None,
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Like [`setup_test_app`], with a chance to adjust the config first.
pub async fn setup_test_app_with(configure: impl FnOnce(&mut Config)) -> TestApp {
    let media = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = test_config(media.path());
    configure(&mut config);

    let storage = LocalStorage::new(media.path())
        .await
        .expect("Failed to create local storage");
    let users = InMemoryUserStore::new();
    let feeds = InMemoryFeedStore::new();
    let avatars = AvatarService::new(Arc::new(storage), &config);

    let state = Arc::new(AppState::new(
        config.clone(),
        Arc::new(users.clone()),
        Arc::new(feeds.clone()),
        avatars,
    ));
    let router = setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        users,
        feeds,
        media,
    }
}

pub async fn create_user(app: &TestApp, username: &str, profile: ProfileFields) {
    app.users
        .create(NewUser {
            username: username.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            profile,
        })
        .await
        .expect("Failed to create test user");
}

/// Log in through the API and return the bearer token.
pub async fn login(app: &TestApp, username: &str, password: &str) -> String {
    let response = app
        .client()
        .post("/login/")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("token in response").to_string()
}

/// Create a user and log them in.
pub async fn signed_in_user(app: &TestApp, username: &str) -> String {
    create_user(app, username, ProfileFields::default()).await;
    login(app, username, TEST_PASSWORD).await
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 90]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

/// Dimensions of a stored picture, sniffing the format from its content.
pub fn dimensions(path: &Path) -> (u32, u32) {
    image::ImageReader::open(path)
        .expect("picture exists")
        .with_guessed_format()
        .expect("readable picture")
        .into_dimensions()
        .expect("decodable picture")
}
