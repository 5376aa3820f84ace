//! Integration tests for the health endpoints.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/health").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_detailed_health_reports_cache_and_planets() {
    let app = helpers::TestApp::new().await;

    let response = app.get("/api/health/detailed").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["cache"]["backend"], "file");
    assert_eq!(body["cache"]["reachable"], true);
    assert_eq!(body["planets"], serde_json::json!(["earth", "mars", "moon"]));
}

#[tokio::test]
async fn test_detailed_health_with_cache_disabled() {
    let app = helpers::TestApp::with_config(|config| config.cache.enabled = false).await;

    let response = app.get("/api/health/detailed").await;

    assert_eq!(response.json()["cache"]["backend"], "noop");
}

#[tokio::test]
async fn test_unreachable_redis_falls_back_to_file_cache() {
    let app = helpers::TestApp::with_config(|config| {
        config.cache.redis_url = Some("redis://127.0.0.1:1".to_string());
        config.cache.redis_connect_timeout_seconds = 2;
    })
    .await;

    let response = app.get("/api/health/detailed").await;

    assert_eq!(response.json()["cache"]["backend"], "file");
}
