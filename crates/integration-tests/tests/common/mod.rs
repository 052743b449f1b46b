//! Shared wiring for the integration tests: every service bound to one
//! in-memory store and a real argon2 hasher, the same way the binary
//! assembles them.

#![allow(dead_code)]

use std::sync::Arc;

use auth_adapters::Argon2PasswordHasher;
use domains::models::User;
use domains::ports::{KeyValueStore, PasswordHasher};
use services::{
    AuthService, CategoryService, CommentService, FileService, LoginRequest, PermissionService,
    PostService, ProjectService, StatsService, SuperAdminCredentials, UserService,
};
use storage_adapters::MemoryStore;

pub const SUPER_USERNAME: &str = "admin";
pub const SUPER_PASSWORD: &str = "admin123";

/// The first sample project and its registry credentials.
pub const SAMPLE_PROJECT: &str = "sample_project_1";
pub const SAMPLE_ADMIN: &str = "company_admin";
pub const SAMPLE_ADMIN_PASSWORD: &str = "company123";

/// Demo account seeded into every project's user list.
pub const SAMPLE_USER: &str = "test_user";
pub const SAMPLE_USER_PASSWORD: &str = "test123";

pub struct TestEnv {
    pub store: Arc<dyn KeyValueStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub permissions: Arc<PermissionService>,
    pub auth: AuthService,
    pub projects: ProjectService,
    pub categories: CategoryService,
    pub posts: PostService,
    pub comments: CommentService,
    pub files: FileService,
    pub users: UserService,
    pub stats: StatsService,
}

impl TestEnv {
    pub fn new() -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
        let permissions = Arc::new(PermissionService::new(store.clone()));
        let super_hash = hasher.hash(SUPER_PASSWORD).unwrap();
        Self {
            auth: AuthService::new(
                store.clone(),
                hasher.clone(),
                SuperAdminCredentials::new(SUPER_USERNAME, super_hash),
            ),
            projects: ProjectService::new(store.clone(), hasher.clone(), permissions.clone()),
            categories: CategoryService::new(store.clone(), permissions.clone()),
            posts: PostService::new(store.clone(), permissions.clone()),
            comments: CommentService::new(store.clone(), permissions.clone()),
            files: FileService::new(store.clone(), permissions.clone()),
            users: UserService::new(store.clone(), hasher.clone(), permissions.clone()),
            stats: StatsService::new(store.clone(), hasher.clone(), permissions.clone()),
            permissions,
            store,
            hasher,
        }
    }

    pub async fn super_login(&self) {
        self.auth
            .super_login(&login(SUPER_USERNAME, SUPER_PASSWORD))
            .await
            .unwrap();
    }

    pub async fn login(&self, project_id: &str, username: &str, password: &str) -> User {
        self.auth
            .login(project_id, &login(username, password))
            .await
            .unwrap()
    }

    pub async fn logout(&self, project_id: &str) {
        self.auth.logout(project_id).await.unwrap();
    }

    /// Logs the sample project's registry admin into the sample project.
    pub async fn login_sample_admin(&self) -> User {
        self.login(SAMPLE_PROJECT, SAMPLE_ADMIN, SAMPLE_ADMIN_PASSWORD)
            .await
    }

    /// Logs the seeded demo user into the sample project. The users list
    /// heals on the first login read, so no setup is needed.
    pub async fn login_sample_user(&self) -> User {
        self.login(SAMPLE_PROJECT, SAMPLE_USER, SAMPLE_USER_PASSWORD)
            .await
    }
}

pub fn login(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.into(),
        password: password.into(),
    }
}

#[cfg(feature = "web-axum")]
pub mod web {
    use api_adapters::web::{router, AppState};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tokio::sync::broadcast;
    use tower::ServiceExt;

    use super::*;

    /// Full router over a fresh in-memory store.
    pub fn test_router() -> Router {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
        let super_hash = hasher.hash(SUPER_PASSWORD).unwrap();
        let creds = SuperAdminCredentials::new(SUPER_USERNAME, super_hash);
        let (changes, _) = broadcast::channel(64);
        router(AppState::new(store, hasher, creds, changes))
    }

    /// Sends one request and returns status plus the parsed JSON body.
    pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn delete(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        json_request(Method::POST, uri, body)
    }

    pub fn put_json(uri: &str, body: Value) -> Request<Body> {
        json_request(Method::PUT, uri, body)
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Super login over the API itself.
    pub async fn api_super_login(router: &Router) {
        let (status, _) = send(
            router,
            post_json(
                "/api/auth/login",
                serde_json::json!({ "username": SUPER_USERNAME, "password": SUPER_PASSWORD }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    /// Project login over the API itself.
    pub async fn api_login(router: &Router, project_id: &str, username: &str, password: &str) {
        let (status, _) = send(
            router,
            post_json(
                &format!("/api/projects/{project_id}/auth/login"),
                serde_json::json!({ "username": username, "password": password }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
