use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::{get, post}};

use crate::domain::{
    repository::TaskRepository,
    task::{Task, TaskDraft, TaskId},
};
use crate::http::types::ApiError;

#[derive(Clone)]
pub struct AppState<R: TaskRepository> { pub repo: R }

pub fn router<R: TaskRepository + Clone>(state: AppState<R>) -> Router {
    Router::new()
        .route("/tasks", post(create_task::<R>).get(list_tasks::<R>))
        .route("/tasks/:id", get(get_task::<R>).put(update_task::<R>).delete(delete_task::<R>))
        .with_state(state)
}

/// Decodes the body regardless of its declared content type.
fn validated(body: &[u8]) -> Result<TaskDraft, ApiError> {
    let draft: TaskDraft = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        ApiError::bad_request("invalid payload json")
    })?;
    if draft.title.is_empty() {
        return Err(ApiError::bad_request("title is required"));
    }
    Ok(draft)
}

async fn create_task<R: TaskRepository>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let draft = validated(&body)?;
    let task = state.repo.create(draft).await?;
    tracing::info!(id = %task.id, "created task");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks<R: TaskRepository>(State(state): State<AppState<R>>) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(state.repo.list().await?))
}

async fn get_task<R: TaskRepository>(State(state): State<AppState<R>>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.repo.get(&TaskId(id)).await?))
}

async fn update_task<R: TaskRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Task>, ApiError> {
    let draft = validated(&body)?;
    let task = state.repo.update(&TaskId(id), draft).await?;
    tracing::info!(id = %task.id, status = %task.status, "updated task");
    Ok(Json(task))
}

async fn delete_task<R: TaskRepository>(State(state): State<AppState<R>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let id = TaskId(id);
    state.repo.delete(&id).await?;
    tracing::info!(%id, "deleted task");
    Ok(StatusCode::NO_CONTENT)
}
