//! The persistence contract shared by every todo-list backend.
//!
//! # Design
//!
//! `ListStore` is the whole surface the controller layer talks to. Every
//! write is scoped by `(list_id[, todo_id])` so a SQL backend can express it
//! as a single parameterized statement without reading first, while the
//! session backend performs the same operation as find-then-mutate on its
//! in-memory lists. Both must be observably equivalent to callers.
//!
//! # Implementations
//!
//! - [`SessionStore`](crate::session::SessionStore): lists live in the caller's session
//! - `PostgresListStore` (in `todo-lists-postgres`): lists live in `PostgreSQL`
//!
//! # Absence is not an error
//!
//! Missing lists or todos are reported as `None` by reads and silently ignored
//! by writes. Errors are reserved for failures of the storage engine itself.
//!
//! # Validation
//!
//! Stores do not validate anything. Names are checked with
//! [`validation`](crate::validation) by the caller before a mutation is issued.
//!
//! # Example
//!
//! ```no_run
//! use todo_lists_core::store::{ListStore, StoreError};
//!
//! async fn example<S: ListStore + ?Sized>(store: &S) -> Result<(), StoreError> {
//!     let list_id = store.create_list("Groceries".to_string()).await?;
//!     let todo_id = store.create_todo(list_id, "Milk".to_string()).await?;
//!
//!     if let Some(todo_id) = todo_id {
//!         store.set_todo_status(list_id, todo_id, true).await?;
//!     }
//!
//!     let list = store.find_list(list_id).await?;
//!     Ok(())
//! }
//! ```

use crate::model::{List, ListId, ListSummary, TodoId};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by every [`ListStore`] operation.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors that can occur while talking to a backend.
///
/// Not-found conditions are never errors; see the module documentation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage engine rejected or failed a statement.
    #[error("Database error: {0}")]
    Database(String),

    /// The schema could not be inspected or bootstrapped.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A value coming back from the storage engine could not be normalized.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The backend's own state is unusable (for example a poisoned lock).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Persistence operations for todo lists.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a store can be shared as
/// `Arc<dyn ListStore>` across request handlers.
///
/// # Dyn Compatibility
///
/// Methods return [`StoreFuture`] instead of using `async fn` so the backend
/// can be chosen at runtime and handed around as a trait object.
pub trait ListStore: Send + Sync {
    /// Create a list and return its newly assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn create_list(&self, name: String) -> StoreFuture<'_, ListId>;

    /// Delete a list together with all of its todos.
    ///
    /// Deleting a missing list is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn delete_list(&self, list_id: ListId) -> StoreFuture<'_, ()>;

    /// Load a list with its todos, or `None` when no such list exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn find_list(&self, list_id: ListId) -> StoreFuture<'_, Option<List>>;

    /// Summaries of every list, each with its todo counts.
    ///
    /// The session backend keeps creation order; the `PostgreSQL` backend
    /// orders by name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn all_lists(&self) -> StoreFuture<'_, Vec<ListSummary>>;

    /// Rename a list. Renaming a missing list is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn rename_list(&self, list_id: ListId, name: String) -> StoreFuture<'_, ()>;

    /// Append a todo to a list.
    ///
    /// Returns the new todo's id, or `None` when the list does not exist (in
    /// which case nothing is written).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn create_todo(&self, list_id: ListId, name: String) -> StoreFuture<'_, Option<TodoId>>;

    /// Mark a todo as completed or not completed. No-op when not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn set_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreFuture<'_, ()>;

    /// Mark every todo of a list as completed. No-op when the list is missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn complete_all(&self, list_id: ListId) -> StoreFuture<'_, ()>;

    /// Name of a todo, or `None` when not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn todo_name(&self, list_id: ListId, todo_id: TodoId) -> StoreFuture<'_, Option<String>>;

    /// Delete a todo. No-op when not found.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails.
    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreFuture<'_, ()>;
}
