//! Post handlers: per-board CRUD plus the cross-board search and
//! recent-post listings.

use axum::extract::{Path, Query, State};
use axum::Json;
use domains::models::{BoardPost, Post};
use serde::Deserialize;
use services::PostDraft;

use super::error::ApiResult;
use super::response::ApiResponse;
use super::AppState;

const DEFAULT_RECENT_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentParams {
    pub limit: Option<usize>,
}

pub async fn list(
    State(state): State<AppState>,
    Path((project_id, board_type)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Vec<Post>>>> {
    let posts = state.posts.list(&project_id, &board_type).await?;
    Ok(Json(ApiResponse::success(posts)))
}

pub async fn create(
    State(state): State<AppState>,
    Path((project_id, board_type)): Path<(String, String)>,
    Json(draft): Json<PostDraft>,
) -> ApiResult<Json<ApiResponse<Post>>> {
    let post = state.posts.create(&project_id, &board_type, &draft).await?;
    Ok(Json(ApiResponse::success(post)))
}

pub async fn show(
    State(state): State<AppState>,
    Path((project_id, board_type, post_id)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<Post>>> {
    let post = state.posts.get(&project_id, &board_type, &post_id).await?;
    Ok(Json(ApiResponse::success(post)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((project_id, board_type, post_id)): Path<(String, String, String)>,
    Json(draft): Json<PostDraft>,
) -> ApiResult<Json<ApiResponse<Post>>> {
    let post = state
        .posts
        .update(&project_id, &board_type, &post_id, &draft)
        .await?;
    Ok(Json(ApiResponse::success(post)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((project_id, board_type, post_id)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.posts.delete(&project_id, &board_type, &post_id).await?;
    Ok(Json(ApiResponse::success("post deleted")))
}

pub async fn recent(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<RecentParams>,
) -> ApiResult<Json<ApiResponse<Vec<BoardPost>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let posts = state.posts.recent(&project_id, limit).await?;
    Ok(Json(ApiResponse::success(posts)))
}

pub async fn search(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<ApiResponse<Vec<BoardPost>>>> {
    let posts = state.posts.search(&project_id, &params.q).await?;
    Ok(Json(ApiResponse::success(posts)))
}
