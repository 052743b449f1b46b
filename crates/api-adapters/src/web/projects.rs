//! Project registry handlers plus the per-project dashboard stats and
//! navigation tab projection.

use axum::extract::{Path, State};
use axum::Json;
use domains::models::{ProjectStats, Tab};
use services::{NewProject, ProjectSettings};

use super::error::ApiResult;
use super::response::{ApiResponse, ProjectView};
use super::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<ProjectView>>>> {
    let projects = state.projects.list().await?;
    Ok(Json(ApiResponse::success(
        projects.into_iter().map(ProjectView::from).collect(),
    )))
}

pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<NewProject>,
) -> ApiResult<Json<ApiResponse<ProjectView>>> {
    let project = state.projects.create(&request).await?;
    Ok(Json(ApiResponse::success(project.into())))
}

pub async fn show(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<ProjectView>>> {
    let project = state.projects.get(&project_id).await?;
    Ok(Json(ApiResponse::success(project.into())))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<ProjectSettings>,
) -> ApiResult<Json<ApiResponse<ProjectView>>> {
    let project = state.projects.update_settings(&project_id, &request).await?;
    Ok(Json(ApiResponse::success(project.into())))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<&'static str>>> {
    state.projects.delete(&project_id).await?;
    Ok(Json(ApiResponse::success("project deleted")))
}

pub async fn stats(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<ProjectStats>>> {
    let stats = state.stats.project_stats(&project_id).await?;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn tabs(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<Tab>>>> {
    let tabs = state.categories.tabs(&project_id).await?;
    Ok(Json(ApiResponse::success(tabs)))
}
