//! Auth endpoints end to end: envelopes, status codes and what the
//! session bodies expose.

mod common;

use axum::http::StatusCode;
use common::web::*;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_super_session_round_trip() {
    let app = test_router();

    let (status, body) = send(&app, get("/api/auth/session")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["data"].is_null());

    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({ "username": SUPER_USERNAME, "password": SUPER_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], json!(SUPER_USERNAME));
    assert!(body["data"]["loginTime"].is_string());

    let (_, body) = send(&app, get("/api/auth/session")).await;
    assert_eq!(body["data"]["username"], json!(SUPER_USERNAME));

    let (status, body) = send(&app, post_json("/api/auth/logout", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!("logged out"));

    let (_, body) = send(&app, get("/api/auth/session")).await;
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_super_login_rejects_bad_credentials() {
    let app = test_router();
    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/login",
            json!({ "username": SUPER_USERNAME, "password": "nope" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("unauthorized: invalid username or password"));
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_project_session_shows_the_user_without_secrets() {
    let app = test_router();
    api_login(&app, SAMPLE_PROJECT, SAMPLE_USER, SAMPLE_USER_PASSWORD).await;

    let uri = format!("/api/projects/{SAMPLE_PROJECT}/auth/session");
    let (status, body) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], json!(SAMPLE_USER));
    assert_eq!(body["data"]["role"], json!("user"));
    assert!(body["data"].get("passwordHash").is_none());

    let (status, _) = send(
        &app,
        post_json(
            &format!("/api/projects/{SAMPLE_PROJECT}/auth/logout"),
            json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get(&uri)).await;
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_signup_creates_and_signs_in() {
    let app = test_router();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/projects/{SAMPLE_PROJECT}/auth/signup"),
            json!({ "username": "newbie", "password": "pw12345", "email": "newbie@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], json!("newbie"));

    let (_, body) = send(
        &app,
        get(&format!("/api/projects/{SAMPLE_PROJECT}/auth/session")),
    )
    .await;
    assert_eq!(body["data"]["username"], json!("newbie"));

    // Signup is validated before anything is written.
    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/projects/{SAMPLE_PROJECT}/auth/signup"),
            json!({ "username": "  ", "password": "pw12345", "email": "x@example.com" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_login_does_not_reveal_which_projects_exist() {
    let app = test_router();

    let (real_status, real_body) = send(
        &app,
        post_json(
            &format!("/api/projects/{SAMPLE_PROJECT}/auth/login"),
            json!({ "username": "ghost", "password": "nope" }),
        ),
    )
    .await;
    let (fake_status, fake_body) = send(
        &app,
        post_json(
            "/api/projects/no_such_project/auth/login",
            json!({ "username": "ghost", "password": "nope" }),
        ),
    )
    .await;

    assert_eq!(real_status, StatusCode::UNAUTHORIZED);
    assert_eq!(fake_status, StatusCode::UNAUTHORIZED);
    assert_eq!(real_body["error"], fake_body["error"]);
}

#[tokio::test]
async fn test_super_credentials_pass_through_project_login() {
    let app = test_router();

    let (status, body) = send(
        &app,
        post_json(
            &format!("/api/projects/{SAMPLE_PROJECT}/auth/login"),
            json!({ "username": SUPER_USERNAME, "password": SUPER_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], json!("super_admin"));

    // The console session came along with the project one.
    let (_, body) = send(&app, get("/api/auth/session")).await;
    assert_eq!(body["data"]["username"], json!(SUPER_USERNAME));
}
