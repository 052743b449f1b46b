//! # Web adapter
//!
//! Axum router over the project services. Every route answers with the
//! `{success, data, error}` envelope from [`response`], and `/events`
//! streams store changes as SSE for live views.

pub mod auth;
pub mod categories;
pub mod comments;
pub mod error;
pub mod events;
pub mod files;
pub mod posts;
pub mod projects;
pub mod response;
pub mod users;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Json, Router};
use domains::ports::{KeyValueStore, PasswordHasher};
use services::{
    AuthService, CategoryService, CommentService, FileService, PermissionService, PostService,
    ProjectService, StatsService, SuperAdminCredentials, UserService,
};
use storage_adapters::ChangeSender;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use self::response::ApiResponse;

/// Shared handler state. Cloned per request, so everything inside is
/// reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub projects: Arc<ProjectService>,
    pub categories: Arc<CategoryService>,
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub files: Arc<FileService>,
    pub users: Arc<UserService>,
    pub stats: Arc<StatsService>,
    pub permissions: Arc<PermissionService>,
    pub changes: ChangeSender,
}

impl AppState {
    /// Wires every service to the same store and hasher.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        hasher: Arc<dyn PasswordHasher>,
        super_creds: SuperAdminCredentials,
        changes: ChangeSender,
    ) -> Self {
        let permissions = Arc::new(PermissionService::new(store.clone()));
        Self {
            auth: Arc::new(AuthService::new(
                store.clone(),
                hasher.clone(),
                super_creds,
            )),
            projects: Arc::new(ProjectService::new(
                store.clone(),
                hasher.clone(),
                permissions.clone(),
            )),
            categories: Arc::new(CategoryService::new(store.clone(), permissions.clone())),
            posts: Arc::new(PostService::new(store.clone(), permissions.clone())),
            comments: Arc::new(CommentService::new(store.clone(), permissions.clone())),
            files: Arc::new(FileService::new(store.clone(), permissions.clone())),
            users: Arc::new(UserService::new(
                store.clone(),
                hasher.clone(),
                permissions.clone(),
            )),
            stats: Arc::new(StatsService::new(store, hasher, permissions.clone())),
            permissions,
            changes,
        }
    }
}

/// The full `/api` surface with tracing and permissive CORS attached.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(auth::super_login))
        .route("/api/auth/logout", post(auth::super_logout))
        .route("/api/auth/session", get(auth::super_session))
        .route(
            "/api/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/api/projects/{project_id}",
            get(projects::show)
                .put(projects::update_settings)
                .delete(projects::remove),
        )
        .route("/api/projects/{project_id}/stats", get(projects::stats))
        .route("/api/projects/{project_id}/tabs", get(projects::tabs))
        .route("/api/projects/{project_id}/auth/login", post(auth::login))
        .route("/api/projects/{project_id}/auth/signup", post(auth::signup))
        .route("/api/projects/{project_id}/auth/logout", post(auth::logout))
        .route("/api/projects/{project_id}/auth/session", get(auth::session))
        .route(
            "/api/projects/{project_id}/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/projects/{project_id}/categories/{category_id}",
            put(categories::update).delete(categories::remove),
        )
        .route(
            "/api/projects/{project_id}/categories/{category_id}/move",
            post(categories::move_category),
        )
        .route(
            "/api/projects/{project_id}/boards/{board_type}/posts",
            get(posts::list).post(posts::create),
        )
        .route(
            "/api/projects/{project_id}/boards/{board_type}/posts/{post_id}",
            get(posts::show).put(posts::update).delete(posts::remove),
        )
        .route("/api/projects/{project_id}/posts/recent", get(posts::recent))
        .route("/api/projects/{project_id}/posts/search", get(posts::search))
        .route(
            "/api/projects/{project_id}/posts/{post_id}/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/api/projects/{project_id}/posts/{post_id}/comments/{comment_id}",
            put(comments::update).delete(comments::remove),
        )
        .route(
            "/api/projects/{project_id}/files",
            get(files::list).post(files::register),
        )
        .route(
            "/api/projects/{project_id}/files/{file_id}",
            axum::routing::delete(files::remove),
        )
        .route(
            "/api/projects/{project_id}/users",
            get(users::list).post(users::create),
        )
        .route(
            "/api/projects/{project_id}/users/{user_id}",
            put(users::update).delete(users::remove),
        )
        .route("/api/projects/{project_id}/profile", put(users::update_profile))
        .route(
            "/api/projects/{project_id}/profile/password",
            put(users::change_password),
        )
        .route("/api/projects/{project_id}/events", get(events::subscribe))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({ "status": "ok", "service": "sitekit" }),
    ))
}
