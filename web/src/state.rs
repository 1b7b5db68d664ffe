//! Application state for Axum handlers.
//!
//! Handlers never see a concrete backend. They ask [`AppState::store_for`]
//! for the caller's `ListStore` and work through the trait.

use crate::session::{SessionId, SessionRegistry};
use std::sync::Arc;
use todo_lists_core::{ListStore, SessionStore};
use todo_lists_postgres::PostgresListStore;

/// The backend lists are kept in.
#[derive(Debug, Clone)]
pub enum Persistence {
    /// Every session owns its own in-memory lists.
    Session(SessionRegistry),
    /// All sessions share one database.
    Postgres(Arc<PostgresListStore>),
}

impl Persistence {
    /// The store serving `session_id`.
    #[must_use]
    pub fn store_for(&self, session_id: SessionId) -> Arc<dyn ListStore> {
        match self {
            Self::Session(registry) => Arc::new(SessionStore::new(registry.lists_for(session_id))),
            Self::Postgres(store) => Arc::clone(store) as Arc<dyn ListStore>,
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Session(_) => "session",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// Application state shared across all HTTP handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    persistence: Persistence,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub const fn new(persistence: Persistence) -> Self {
        Self { persistence }
    }

    /// State keeping lists in per-session memory.
    #[must_use]
    pub fn with_sessions() -> Self {
        Self::new(Persistence::Session(SessionRegistry::new()))
    }

    /// The configured backend.
    #[must_use]
    pub const fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// The store serving `session_id`.
    #[must_use]
    pub fn store_for(&self, session_id: SessionId) -> Arc<dyn ListStore> {
        self.persistence.store_for(session_id)
    }
}
