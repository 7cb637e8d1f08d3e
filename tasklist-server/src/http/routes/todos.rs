//! Todo endpoints
//!
//! Each handler: store present (503) -> input valid (400) -> one statement
//! -> row or generic 500.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};

use crate::http::error::ApiError;
use crate::http::extractors::JsonFields;
use crate::http::AppState;
use crate::models::{truthy, Todo, TodoId, TodoTitle};

/// GET /todos - all todos, newest first
async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, ApiError> {
    let store = state.store()?;
    let todos = store
        .list_todos()
        .await
        .map_err(ApiError::db("Failed to fetch todos"))?;
    Ok(Json(todos))
}

/// POST /todos - body `{title}`
async fn create_todo(
    State(state): State<Arc<AppState>>,
    body: JsonFields,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let store = state.store()?;
    let title = TodoTitle::from_json(body.get("title"))?;

    let todo = store
        .create_todo(&title)
        .await
        .map_err(ApiError::db("Failed to create todo"))?;
    tracing::debug!(id = todo.id, "Created todo");

    Ok((StatusCode::CREATED, Json(todo)))
}

/// PATCH /todos/{id} - body `{completed}`, coerced to a boolean
async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: JsonFields,
) -> Result<Json<Todo>, ApiError> {
    let store = state.store()?;
    let id = TodoId::parse(&raw_id)?;
    let completed = truthy(body.get("completed"));

    let todo = store
        .set_todo_completed(id, completed)
        .await
        .map_err(ApiError::db("Failed to update todo"))?;
    Ok(Json(todo))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let store = state.store()?;
    let id = TodoId::parse(&raw_id)?;

    store
        .delete_todo(id)
        .await
        .map_err(ApiError::db("Failed to delete todo"))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
}
