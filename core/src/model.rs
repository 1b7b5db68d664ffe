//! Lists, todos and their identifiers.
//!
//! These are the plain records every [`ListStore`](crate::store::ListStore)
//! hands back to its callers. Backends normalize whatever their storage engine
//! produces into these types before returning, so callers never see
//! backend-native representations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a todo list.
///
/// Assigned by the store when the list is created and stable for the lifetime
/// of the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(i32);

impl ListId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ListId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// Identifier of a todo.
///
/// Only meaningful together with the [`ListId`] of the owning list: every
/// lookup is scoped by `(list_id, todo_id)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i32);

impl TodoId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TodoId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// A single todo item owned by exactly one list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Identifier, unique within the owning list
    pub id: TodoId,
    /// Text of the todo
    pub name: String,
    /// Whether the todo is done
    pub completed: bool,
}

impl Todo {
    /// Creates a new, not yet completed todo.
    #[must_use]
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }
}

/// A named list of todos.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Identifier, unique across the store
    pub id: ListId,
    /// Display name, unique among lists
    pub name: String,
    /// Todos in insertion order
    pub todos: Vec<Todo>,
}

impl List {
    /// Creates a new list without todos.
    #[must_use]
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
        }
    }

    /// Number of todos in the list.
    #[must_use]
    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    /// Number of todos not yet completed.
    #[must_use]
    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// A list is complete once it has todos and all of them are done.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }

    /// Looks up a todo of this list.
    #[must_use]
    pub fn todo(&self, todo_id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == todo_id)
    }

    /// Summarizes the list without its todos.
    #[must_use]
    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            name: self.name.clone(),
            todos_count: self.todos_count(),
            todos_remaining_count: self.todos_remaining_count(),
        }
    }
}

/// A list together with its derived todo counts, as returned by
/// [`ListStore::all_lists`](crate::store::ListStore::all_lists).
///
/// The counts are computed when the summary is read and are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    /// Identifier of the list
    pub id: ListId,
    /// Display name of the list
    pub name: String,
    /// Number of todos in the list
    pub todos_count: usize,
    /// Number of todos not yet completed
    pub todos_remaining_count: usize,
}

impl ListSummary {
    /// A list is complete once it has todos and all of them are done.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.todos_count > 0 && self.todos_remaining_count == 0
    }
}
