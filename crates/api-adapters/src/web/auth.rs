//! Session handlers: the global super-admin console login plus the
//! per-project login cascade, signup and logout.

use axum::extract::{Path, State};
use axum::Json;
use domains::models::SuperAdminSession;
use services::{LoginRequest, SignupRequest};

use super::error::ApiResult;
use super::response::{ApiResponse, UserView};
use super::AppState;

pub async fn super_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<SuperAdminSession>>> {
    let session = state.auth.super_login(&request).await?;
    Ok(Json(ApiResponse::success(session)))
}

pub async fn super_logout(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.auth.super_logout().await?;
    Ok(Json(ApiResponse::success("logged out")))
}

pub async fn super_session(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Option<SuperAdminSession>>>> {
    let session = state.permissions.super_admin_session().await?;
    Ok(Json(ApiResponse::success(session)))
}

pub async fn login(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let user = state.auth.login(&project_id, &request).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn signup(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let user = state.auth.signup(&project_id, &request).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn logout(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.auth.logout(&project_id).await?;
    Ok(Json(ApiResponse::success("logged out")))
}

/// Current session user for the project, super admin included. `null`
/// when nobody is logged in.
pub async fn session(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Option<UserView>>>> {
    let user = state.permissions.current_user(&project_id).await?;
    Ok(Json(ApiResponse::success(user.map(UserView::from))))
}
