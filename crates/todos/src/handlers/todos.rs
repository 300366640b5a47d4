//! Todo CRUD handlers.
//!
//! These handlers use the repository trait object held in `AppState`.
//! Bodies are parsed as `Result<Json<_>, JsonRejection>` so that malformed
//! input is answered with the JSON error envelope instead of axum's plain text.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use todos_core::todo::{CreateTodoRequest, Todo, TodoId, UpdateTodoRequest};

use crate::{handlers::ApiError, state::AppState};

// ============================================================================
// List Todos
// ============================================================================

/// List incomplete todos (GET {prefix}/).
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state
        .todo_repo
        .list_incomplete()
        .await
        .map_err(|e| ApiError::store("Failed to fetch todos", e))?;

    tracing::debug!(count = todos.len(), "Listed incomplete todos");

    Ok(Json(todos))
}

// ============================================================================
// Get Todo
// ============================================================================

/// Get a single todo by ID (GET {prefix}/{id}).
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = TodoId::from(id);

    state
        .todo_repo
        .get_todo(&id)
        .await
        .map_err(|e| ApiError::store("Failed to fetch todo", e))?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

// ============================================================================
// Create Todo
// ============================================================================

/// Create a new todo (POST {prefix}/).
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(payload) = payload?;
    tracing::debug!(payload = ?payload, "Received create todo request");

    let todo = payload.into_todo(Utc::now())?;

    state
        .todo_repo
        .create_todo(&todo)
        .await
        .map_err(|e| ApiError::store("Failed to create todo", e))?;

    tracing::info!(todo_id = %todo.id, title = %todo.title, "Created new todo");

    Ok(Json(todo))
}

// ============================================================================
// Update Todo
// ============================================================================

/// Partially update a todo (PATCH {prefix}/{id}).
///
/// Unknown ids are answered with 404; the todo is never created.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = TodoId::from(id);
    let Json(changes) = payload?;
    changes.validate()?;

    let todo = state
        .todo_repo
        .update_todo(&id, &changes)
        .await
        .map_err(|e| ApiError::store("Failed to update todo", e))?;

    tracing::info!(todo_id = %id, fields = ?changes.field_names(), "Updated todo");

    Ok(Json(todo))
}

// ============================================================================
// Delete Todo
// ============================================================================

/// Delete a todo by ID (DELETE {prefix}/{id}).
///
/// Deleting an id that does not exist still answers 204.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = TodoId::from(id);

    let existed = state
        .todo_repo
        .delete_todo(&id)
        .await
        .map_err(|e| ApiError::store("Failed to delete todo", e))?;

    tracing::info!(todo_id = %id, existed, "Deleted todo");

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Fallbacks
// ============================================================================

/// Answer unknown routes with the JSON error envelope.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Answer known routes called with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Replace the empty body `TimeoutLayer` produces with the JSON error envelope.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ApiError::Timeout.into_response()
    } else {
        response
    }
}
