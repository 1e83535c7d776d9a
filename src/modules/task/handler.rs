use crate::common::response::{ApiError, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use super::model::TaskRecord;

#[utoipa::path(
    get,
    path = "/media-tasks",
    responses(
        (status = 200, description = "List task records", body = ApiResponse<Vec<TaskRecord>>),
        (status = 500, description = "Internal Server Error")
    ),
    tag = "Tasks"
)]
pub async fn list_tasks(State(state): State<AppState>) -> impl IntoResponse {
    match state.tasks.list().await {
        Ok(tasks) => ApiSuccess(
            ApiResponse::success(tasks, "Tasks retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/media-tasks/{id}",
    params(("id" = Uuid, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Get task record", body = ApiResponse<TaskRecord>),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn get_task(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.tasks.get(id).await {
        Ok(Some(task)) => ApiSuccess(
            ApiResponse::success(task, "Task retrieved successfully"),
            StatusCode::OK,
        )
        .into_response(),
        Ok(None) => {
            ApiError(format!("Task {} not found", id), StatusCode::NOT_FOUND).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}
