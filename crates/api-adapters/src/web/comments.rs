//! Comment thread handlers.

use axum::extract::{Path, State};
use axum::Json;
use domains::models::Comment;
use serde::Deserialize;

use super::error::ApiResult;
use super::response::ApiResponse;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub content: String,
}

pub async fn list(
    State(state): State<AppState>,
    Path((project_id, post_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Vec<Comment>>>> {
    let comments = state.comments.list(&project_id, &post_id).await?;
    Ok(Json(ApiResponse::success(comments)))
}

pub async fn create(
    State(state): State<AppState>,
    Path((project_id, post_id)): Path<(String, String)>,
    Json(body): Json<CommentBody>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    let comment = state
        .comments
        .add(&project_id, &post_id, &body.content)
        .await?;
    Ok(Json(ApiResponse::success(comment)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((project_id, post_id, comment_id)): Path<(String, String, String)>,
    Json(body): Json<CommentBody>,
) -> ApiResult<Json<ApiResponse<Comment>>> {
    let comment = state
        .comments
        .update(&project_id, &post_id, &comment_id, &body.content)
        .await?;
    Ok(Json(ApiResponse::success(comment)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((project_id, post_id, comment_id)): Path<(String, String, String)>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state
        .comments
        .delete(&project_id, &post_id, &comment_id)
        .await?;
    Ok(Json(ApiResponse::success("comment deleted")))
}
