//! Liveness endpoint tests
//!
//! Run with: cargo test -p integration-tests --test liveness_tests

use integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_index_reports_running() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/").await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Bot is running...");
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}
