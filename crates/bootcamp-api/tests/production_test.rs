mod helpers;

use axum::http::StatusCode;
use helpers::setup_test_app_with;
use serde_json::Value;

#[tokio::test]
async fn test_production_config_hides_error_details() {
    let app = setup_test_app_with(|config| {
        config.environment = "production".to_string();
        config.cors_origins = vec!["https://bootcamp.example".to_string()];
    })
    .await;

    let response = app.client().get("/profile/nobody/").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}
