//! End-to-end smoke checks for the axum surface: envelope shape, status
//! mapping and session-backed auth over a real in-memory store.

use std::sync::Arc;

use api_adapters::web::{router, AppState};
use auth_adapters::Argon2PasswordHasher;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domains::ports::PasswordHasher;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use services::SuperAdminCredentials;
use storage_adapters::MemoryStore;
use tokio::sync::broadcast;
use tower::ServiceExt;

fn test_router() -> Router {
    let store = Arc::new(MemoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let super_hash = hasher.hash("admin123").unwrap();
    let creds = SuperAdminCredentials::new("admin", super_hash);
    let (changes, _) = broadcast::channel(16);
    router(AppState::new(store, hasher, creds, changes))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_ok() {
    let router = test_router();
    let (status, body) = send(&router, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_project_list_requires_super_admin() {
    let router = test_router();
    let (status, body) = send(&router, get("/api/projects")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_project_is_not_found() {
    let router = test_router();
    let (status, body) = send(&router, get("/api/projects/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_super_login_round_trip() {
    let router = test_router();

    // No session yet.
    let (status, body) = send(&router, get("/api/auth/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].is_null());

    let (status, body) = send(
        &router,
        post_json(
            "/api/auth/login",
            json!({ "username": "admin", "password": "admin123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");

    // The session is store-backed, so a fresh request sees it.
    let (status, body) = send(&router, get("/api/auth/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");

    // And the registry list is open now (healed to the samples).
    let (status, body) = send(&router, get("/api/projects")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    // Views carry no hash material.
    assert!(body["data"][0].get("adminPasswordHash").is_none());
}

#[tokio::test]
async fn test_bad_super_credentials_are_unauthorized() {
    let router = test_router();
    let (status, body) = send(
        &router,
        post_json(
            "/api/auth/login",
            json!({ "username": "admin", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_public_tabs_for_healed_project() {
    let router = test_router();
    let (status, body) = send(&router, get("/api/projects/sample_project_1/tabs")).await;
    assert_eq!(status, StatusCode::OK);
    let tabs = body["data"].as_array().unwrap().clone();
    assert_eq!(tabs[0]["id"], "home");
    assert_eq!(tabs[0]["type"], "home");
    // Default navigation: Home + four seeded categories.
    assert_eq!(tabs.len(), 5);
}
