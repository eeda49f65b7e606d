//! Common test utilities and helpers
//!
//! Every test server runs on its own in-memory database with a fast bcrypt
//! cost, so tests never share accounts or items.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::json;
use stockroom::backend::server::build_app;
use stockroom::backend::server::config::in_memory_database;
use stockroom::shared::{AppConfig, DeploymentMode};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Configuration used by every integration test
pub fn test_config(deployment: DeploymentMode) -> AppConfig {
    AppConfig::builder()
        .deployment(deployment)
        .jwt_secret(TEST_SECRET)
        .bcrypt_cost(4)
        .build()
        .expect("Failed to build test configuration")
}

/// Test server in development mode
pub async fn create_test_server() -> TestServer {
    create_test_server_in(DeploymentMode::Development).await
}

/// Test server for the given deployment mode
pub async fn create_test_server_in(deployment: DeploymentMode) -> TestServer {
    let pool = in_memory_database()
        .await
        .expect("Failed to open in-memory database");
    let app = build_app(test_config(deployment), pool);
    TestServer::new(app).expect("Failed to start test server")
}

/// Sign up `username` and assert it succeeded
pub async fn signup(server: &TestServer, username: &str, password: &str) {
    server
        .post("/api/auth/signup")
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}
