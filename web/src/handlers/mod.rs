//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by resource.

pub mod health;
pub mod lists;
pub mod todos;

use crate::error::{AppError, LIST_NOT_FOUND};
use serde::Serialize;
use todo_lists_core::{List, ListId, ListStore};

// Re-export common handler utilities
pub use health::health_check;

/// Body of every successful mutation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// What happened, for display to the user
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned when a list or todo was created.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Id of the new record
    pub id: i32,
    /// What happened, for display to the user
    pub message: String,
}

/// Load the list every `/lists/:id` route operates on.
pub(crate) async fn load_list(store: &dyn ListStore, list_id: ListId) -> Result<List, AppError> {
    store
        .find_list(list_id)
        .await?
        .ok_or_else(|| AppError::not_found(LIST_NOT_FOUND))
}
