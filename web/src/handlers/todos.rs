//! Todo endpoints, all nested under their list.
//!
//! - `POST /lists/:id/todos` - Add a todo
//! - `POST /lists/:id/todos/:todo_id` - Mark a todo done or not done
//! - `POST /lists/:id/todos/:todo_id/destroy` - Delete a todo
//! - `POST /lists/:id/complete_all` - Mark every todo done

use super::{load_list, CreatedResponse, MessageResponse};
use crate::error::{AppError, LIST_NOT_FOUND, TODO_NOT_FOUND};
use crate::extractors::CallerStore;
use axum::{extract::Path, http::StatusCode, Json};
use serde::Deserialize;
use todo_lists_core::validation::todo_name_error;
use todo_lists_core::{ListId, TodoId};

/// Request to add a todo.
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    /// Todo name; surrounding whitespace is ignored
    pub todo: String,
}

/// Request to change a todo's status.
#[derive(Debug, Deserialize)]
pub struct TodoStatusRequest {
    /// New status
    pub completed: bool,
}

/// `POST /lists/:id/todos`
///
/// # Errors
///
/// Returns 404 for an unknown list, 422 for an invalid name, 500 if the
/// store fails.
pub async fn create_todo(
    store: CallerStore,
    Path(list_id): Path<ListId>,
    Json(request): Json<TodoRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    load_list(&*store, list_id).await?;

    let name = request.todo.trim();
    if let Some(error) = todo_name_error(name) {
        return Err(AppError::validation(error));
    }

    // The list can disappear between the check and the insert.
    let todo_id = store
        .create_todo(list_id, name.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(LIST_NOT_FOUND))?;
    tracing::info!(list_id = %list_id, todo_id = %todo_id, "Todo added");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: todo_id.get(),
            message: "The todo was added.".to_string(),
        }),
    ))
}

/// `POST /lists/:id/todos/:todo_id`
///
/// # Errors
///
/// Returns 404 for an unknown list, 500 if the store fails.
pub async fn update_todo(
    store: CallerStore,
    Path((list_id, todo_id)): Path<(ListId, TodoId)>,
    Json(request): Json<TodoStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    load_list(&*store, list_id).await?;

    store
        .set_todo_status(list_id, todo_id, request.completed)
        .await?;
    tracing::debug!(
        list_id = %list_id,
        todo_id = %todo_id,
        completed = request.completed,
        "Todo status set"
    );

    Ok(Json(MessageResponse::new("The todo has been updated.")))
}

/// `POST /lists/:id/todos/:todo_id/destroy`
///
/// # Errors
///
/// Returns 404 for an unknown list or todo, 500 if the store fails.
pub async fn destroy_todo(
    store: CallerStore,
    Path((list_id, todo_id)): Path<(ListId, TodoId)>,
) -> Result<Json<MessageResponse>, AppError> {
    load_list(&*store, list_id).await?;

    let name = store
        .todo_name(list_id, todo_id)
        .await?
        .ok_or_else(|| AppError::not_found(TODO_NOT_FOUND))?;

    store.delete_todo(list_id, todo_id).await?;
    tracing::info!(list_id = %list_id, todo_id = %todo_id, "Todo deleted");

    Ok(Json(MessageResponse::new(format!(
        "The todo '{name}' has been deleted."
    ))))
}

/// `POST /lists/:id/complete_all`
///
/// # Errors
///
/// Returns 404 for an unknown list, 500 if the store fails.
pub async fn complete_all(
    store: CallerStore,
    Path(list_id): Path<ListId>,
) -> Result<Json<MessageResponse>, AppError> {
    load_list(&*store, list_id).await?;

    store.complete_all(list_id).await?;
    tracing::info!(list_id = %list_id, "All todos completed");

    Ok(Json(MessageResponse::new("All todos have been completed.")))
}
