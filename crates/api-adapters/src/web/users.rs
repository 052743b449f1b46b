//! Account management handlers plus the self-service profile routes.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use services::{NewUser, PasswordChange, ProfileUpdate, UserUpdate};

use super::error::ApiResult;
use super::response::{ApiResponse, UserView};
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub q: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<UserListParams>,
) -> ApiResult<Json<ApiResponse<Vec<UserView>>>> {
    let users = state.users.list(&project_id, params.q.as_deref()).await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserView::from).collect(),
    )))
}

pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<NewUser>,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let user = state.users.add(&project_id, &request).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn update(
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(String, String)>,
    Json(request): Json<UserUpdate>,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let user = state.users.update(&project_id, &user_id, &request).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((project_id, user_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.users.remove(&project_id, &user_id).await?;
    Ok(Json(ApiResponse::success("user deleted")))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<ProfileUpdate>,
) -> ApiResult<Json<ApiResponse<UserView>>> {
    let user = state.users.update_profile(&project_id, &request).await?;
    Ok(Json(ApiResponse::success(user.into())))
}

pub async fn change_password(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<PasswordChange>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.users.change_password(&project_id, &request).await?;
    Ok(Json(ApiResponse::success("password changed")))
}
