//! File bookkeeping handlers. Only metadata moves through this surface;
//! validation and limits live in the service.

use axum::extract::{Path, State};
use axum::Json;
use domains::models::FileMeta;
use services::FileUploadRequest;

use super::error::ApiResult;
use super::response::ApiResponse;
use super::AppState;

pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<FileMeta>>>> {
    let files = state.files.list(&project_id).await?;
    Ok(Json(ApiResponse::success(files)))
}

/// Registers a batch of upload descriptors. All-or-nothing: one invalid
/// entry rejects the whole batch.
pub async fn register(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(uploads): Json<Vec<FileUploadRequest>>,
) -> ApiResult<Json<ApiResponse<Vec<FileMeta>>>> {
    let created = state.files.register(&project_id, &uploads).await?;
    Ok(Json(ApiResponse::success(created)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((project_id, file_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.files.remove(&project_id, &file_id).await?;
    Ok(Json(ApiResponse::success("file deleted")))
}
