//! Category handlers. Creating, editing and reordering the navigation
//! structure is a management operation; listing is public.

use axum::extract::{Path, State};
use axum::Json;
use domains::models::Category;
use serde::Deserialize;
use services::{CategoryUpdate, MoveDirection, NewCategory};

use super::error::ApiResult;
use super::response::ApiResponse;
use super::AppState;

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub direction: MoveDirection,
}

pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state.categories.list(&project_id).await?;
    Ok(Json(ApiResponse::success(categories)))
}

pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<NewCategory>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state.categories.create(&project_id, &request).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((project_id, category_id)): Path<(String, String)>,
    Json(request): Json<CategoryUpdate>,
) -> ApiResult<Json<ApiResponse<Category>>> {
    let category = state
        .categories
        .update(&project_id, &category_id, &request)
        .await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((project_id, category_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.categories.delete(&project_id, &category_id).await?;
    Ok(Json(ApiResponse::success("category deleted")))
}

/// Swaps the category with its neighbor and returns the new ordering.
pub async fn move_category(
    State(state): State<AppState>,
    Path((project_id, category_id)): Path<(String, String)>,
    Json(request): Json<MoveRequest>,
) -> ApiResult<Json<ApiResponse<Vec<Category>>>> {
    let categories = state
        .categories
        .move_category(&project_id, &category_id, request.direction)
        .await?;
    Ok(Json(ApiResponse::success(categories)))
}
