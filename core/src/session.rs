//! Session-scoped, in-memory list storage.
//!
//! The lists of one caller session live in a [`SessionLists`] handle. Whoever
//! owns the session (the web layer's session registry) keeps the handle alive
//! for as long as the session exists and builds a [`SessionStore`] over it
//! for each request. Nothing is persisted: dropping the last handle drops the
//! lists.
//!
//! Ids are assigned as `max(existing ids) + 1`, starting at 1. Deleting the
//! item with the highest id therefore frees that id for the next item.

use crate::model::{List, ListId, ListSummary, Todo, TodoId};
use crate::store::{ListStore, StoreError, StoreFuture};
use std::future;
use std::sync::{Arc, Mutex};

/// Shared handle to the lists of one session.
///
/// Cloning the handle shares the same lists.
#[derive(Debug, Clone, Default)]
pub struct SessionLists {
    lists: Arc<Mutex<Vec<List>>>,
}

impl SessionLists {
    /// Creates an empty collection, as seen on first access within a session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a collection, for example from a serialized session.
    #[must_use]
    pub fn from_lists(lists: Vec<List>) -> Self {
        Self {
            lists: Arc::new(Mutex::new(lists)),
        }
    }

    /// Copy of the current lists, suitable for serializing the session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<List>, StoreError> {
        self.with_lists(|lists| lists.clone())
    }

    /// Run `f` with exclusive access to the lists.
    ///
    /// A mutation either completes inside `f` or does not happen at all.
    fn with_lists<T>(&self, f: impl FnOnce(&mut Vec<List>) -> T) -> Result<T, StoreError> {
        let mut guard = self
            .lists
            .lock()
            .map_err(|_| StoreError::Internal("Session lock poisoned".to_string()))?;
        Ok(f(&mut guard))
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> Result<i32, StoreError> {
    match ids.max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| StoreError::Internal(format!("No id left after {max}"))),
    }
}

fn find_list_mut(lists: &mut [List], list_id: ListId) -> Option<&mut List> {
    lists.iter_mut().find(|list| list.id == list_id)
}

fn find_todo_mut(lists: &mut [List], list_id: ListId, todo_id: TodoId) -> Option<&mut Todo> {
    find_list_mut(lists, list_id)?
        .todos
        .iter_mut()
        .find(|todo| todo.id == todo_id)
}

/// [`ListStore`] over the lists of a single session.
///
/// # Example
///
/// ```
/// use todo_lists_core::session::{SessionLists, SessionStore};
///
/// let lists = SessionLists::new();
/// let store = SessionStore::new(lists.clone());
/// // Every store built over `lists` sees the same data.
/// assert!(store.lists().snapshot().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    lists: SessionLists,
}

impl SessionStore {
    /// Creates a store over the given session lists.
    #[must_use]
    pub const fn new(lists: SessionLists) -> Self {
        Self { lists }
    }

    /// The session lists this store reads and writes.
    #[must_use]
    pub const fn lists(&self) -> &SessionLists {
        &self.lists
    }

    fn run<T: Send + 'static>(
        &self,
        f: impl FnOnce(&mut Vec<List>) -> T,
    ) -> StoreFuture<'_, T> {
        Box::pin(future::ready(self.lists.with_lists(f)))
    }

    fn try_run<T: Send + 'static>(
        &self,
        f: impl FnOnce(&mut Vec<List>) -> Result<T, StoreError>,
    ) -> StoreFuture<'_, T> {
        Box::pin(future::ready(
            self.lists.with_lists(f).and_then(std::convert::identity),
        ))
    }
}

impl ListStore for SessionStore {
    fn create_list(&self, name: String) -> StoreFuture<'_, ListId> {
        self.try_run(move |lists| {
            let id = ListId::new(next_id(lists.iter().map(|list| list.id.get()))?);
            lists.push(List::new(id, name));
            Ok(id)
        })
    }

    fn delete_list(&self, list_id: ListId) -> StoreFuture<'_, ()> {
        self.run(move |lists| lists.retain(|list| list.id != list_id))
    }

    fn find_list(&self, list_id: ListId) -> StoreFuture<'_, Option<List>> {
        self.run(move |lists| lists.iter().find(|list| list.id == list_id).cloned())
    }

    fn all_lists(&self) -> StoreFuture<'_, Vec<ListSummary>> {
        self.run(|lists| lists.iter().map(List::summary).collect())
    }

    fn rename_list(&self, list_id: ListId, name: String) -> StoreFuture<'_, ()> {
        self.run(move |lists| {
            if let Some(list) = find_list_mut(lists, list_id) {
                list.name = name;
            }
        })
    }

    fn create_todo(&self, list_id: ListId, name: String) -> StoreFuture<'_, Option<TodoId>> {
        self.try_run(move |lists| {
            let Some(list) = find_list_mut(lists, list_id) else {
                return Ok(None);
            };
            let id = TodoId::new(next_id(list.todos.iter().map(|todo| todo.id.get()))?);
            list.todos.push(Todo::new(id, name));
            Ok(Some(id))
        })
    }

    fn set_todo_status(
        &self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> StoreFuture<'_, ()> {
        self.run(move |lists| {
            if let Some(todo) = find_todo_mut(lists, list_id, todo_id) {
                todo.completed = completed;
            }
        })
    }

    fn complete_all(&self, list_id: ListId) -> StoreFuture<'_, ()> {
        self.run(move |lists| {
            if let Some(list) = find_list_mut(lists, list_id) {
                for todo in &mut list.todos {
                    todo.completed = true;
                }
            }
        })
    }

    fn todo_name(&self, list_id: ListId, todo_id: TodoId) -> StoreFuture<'_, Option<String>> {
        self.run(move |lists| {
            find_todo_mut(lists, list_id, todo_id).map(|todo| todo.name.clone())
        })
    }

    fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> StoreFuture<'_, ()> {
        self.run(move |lists| {
            if let Some(list) = find_list_mut(lists, list_id) {
                list.todos.retain(|todo| todo.id != todo_id);
            }
        })
    }
}
