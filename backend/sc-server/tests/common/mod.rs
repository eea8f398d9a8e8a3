#![allow(dead_code)]

//! Test infrastructure for sc-server API tests

use sc_config::AuthConfig;
use sc_server::{AppState, build_router};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-secret-at-least-32-bytes";

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test database");

    sc_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create AppState for testing, with a cheap hashing work factor
pub async fn create_test_app_state() -> AppState {
    let auth = AuthConfig {
        jwt_secret: Some(TEST_SECRET.to_string()),
        hash_memory_kib: 1024,
        hash_iterations: 1,
        hash_parallelism: 1,
        ..AuthConfig::default()
    };

    AppState::build(create_test_pool().await, &auth).expect("Failed to build app state")
}

pub async fn create_test_app() -> Router {
    build_router(create_test_app_state().await)
}

/// Send one request through the router and decode the JSON body (Null if empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}

/// Send a raw body with the given content type and decode the JSON reply
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("Content-Type", content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Register a local user and return its session token and id
pub async fn register(app: &Router, username: &str, password: &str) -> (String, String) {
    let (status, json) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", json);

    (
        json["token"].as_str().unwrap().to_string(),
        json["user"]["id"].as_str().unwrap().to_string(),
    )
}

/// Submit an article as the holder of `token` and return its id
pub async fn submit_article(app: &Router, token: &str, title: &str, url: &str) -> String {
    let (status, json) = send(
        app,
        "POST",
        "/api/articles",
        Some(token),
        Some(json!({ "title": title, "url": url })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "submit failed: {}", json);

    json["article"]["id"].as_str().unwrap().to_string()
}
