//! List endpoints.
//!
//! - `GET /lists` - All lists with their todo counts
//! - `POST /lists` - Create a list
//! - `GET /lists/:id` - One list with its todos
//! - `POST /lists/:id` - Rename a list
//! - `POST /lists/:id/destroy` - Delete a list and its todos

use super::{load_list, CreatedResponse, MessageResponse};
use crate::error::AppError;
use crate::extractors::CallerStore;
use axum::{extract::Path, http::StatusCode, response::Redirect, Json};
use serde::{Deserialize, Serialize};
use todo_lists_core::validation::list_name_error;
use todo_lists_core::{List, ListId, ListSummary};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request carrying a list name, for create and rename.
#[derive(Debug, Deserialize)]
pub struct ListNameRequest {
    /// New name; surrounding whitespace is ignored
    pub list_name: String,
}

/// One entry of `GET /lists`.
#[derive(Debug, Serialize)]
pub struct ListSummaryResponse {
    /// Id, name and counts
    #[serde(flatten)]
    pub summary: ListSummary,
    /// Whether the list has todos and all of them are done
    pub complete: bool,
}

impl From<ListSummary> for ListSummaryResponse {
    fn from(summary: ListSummary) -> Self {
        Self {
            complete: summary.is_complete(),
            summary,
        }
    }
}

/// Body of `GET /lists/:id`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// The list and its todos
    #[serde(flatten)]
    pub list: List,
    /// Number of todos
    pub todos_count: usize,
    /// Number of todos not completed yet
    pub todos_remaining_count: usize,
    /// Whether the list has todos and all of them are done
    pub complete: bool,
}

impl From<List> for ListResponse {
    fn from(list: List) -> Self {
        Self {
            todos_count: list.todos_count(),
            todos_remaining_count: list.todos_remaining_count(),
            complete: list.is_complete(),
            list,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /` sends the caller to their lists.
#[allow(clippy::unused_async)]
pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

/// `GET /lists`
///
/// # Errors
///
/// Returns 500 if the store fails.
pub async fn list_lists(store: CallerStore) -> Result<Json<Vec<ListSummaryResponse>>, AppError> {
    let lists = store.all_lists().await?;
    Ok(Json(lists.into_iter().map(ListSummaryResponse::from).collect()))
}

/// `POST /lists`
///
/// # Errors
///
/// Returns 422 for an invalid or taken name, 500 if the store fails.
pub async fn create_list(
    store: CallerStore,
    Json(request): Json<ListNameRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let name = request.list_name.trim();
    let existing = store.all_lists().await?;

    if let Some(error) = list_name_error(name, existing.iter().map(|list| list.name.as_str())) {
        return Err(AppError::validation(error));
    }

    let list_id = store.create_list(name.to_string()).await?;
    tracing::info!(list_id = %list_id, "List created");
    metrics::counter!("todo_lists.lists.created").increment(1);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: list_id.get(),
            message: "The list has been created.".to_string(),
        }),
    ))
}

/// `GET /lists/:id`
///
/// # Errors
///
/// Returns 404 for an unknown list, 500 if the store fails.
pub async fn show_list(
    store: CallerStore,
    Path(list_id): Path<ListId>,
) -> Result<Json<ListResponse>, AppError> {
    let list = load_list(&*store, list_id).await?;
    Ok(Json(ListResponse::from(list)))
}

/// `POST /lists/:id`
///
/// Keeping the current name is allowed.
///
/// # Errors
///
/// Returns 404 for an unknown list, 422 for an invalid or taken name, 500 if
/// the store fails.
pub async fn rename_list(
    store: CallerStore,
    Path(list_id): Path<ListId>,
    Json(request): Json<ListNameRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    load_list(&*store, list_id).await?;

    let name = request.list_name.trim();
    let others = store.all_lists().await?;
    let taken = others
        .iter()
        .filter(|list| list.id != list_id)
        .map(|list| list.name.as_str());

    if let Some(error) = list_name_error(name, taken) {
        return Err(AppError::validation(error));
    }

    store.rename_list(list_id, name.to_string()).await?;
    tracing::info!(list_id = %list_id, "List renamed");

    Ok(Json(MessageResponse::new("The list has been updated.")))
}

/// `POST /lists/:id/destroy`
///
/// # Errors
///
/// Returns 404 for an unknown list, 500 if the store fails.
pub async fn destroy_list(
    store: CallerStore,
    Path(list_id): Path<ListId>,
) -> Result<Json<MessageResponse>, AppError> {
    load_list(&*store, list_id).await?;

    store.delete_list(list_id).await?;
    tracing::info!(list_id = %list_id, "List deleted");
    metrics::counter!("todo_lists.lists.deleted").increment(1);

    Ok(Json(MessageResponse::new("The list has been deleted.")))
}
