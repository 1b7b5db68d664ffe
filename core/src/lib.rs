//! # Todo Lists Core
//!
//! Data model, persistence contract and validation rules for the todo-lists
//! application.
//!
//! ## Components
//!
//! - [`model`]: lists, todos and their ids, as handed to callers
//! - [`store`]: the [`ListStore`] trait every backend implements
//! - [`session`]: the session-scoped, in-memory backend
//! - [`validation`]: name checks run by the caller before any mutation
//! - [`statement_log`]: hook through which SQL backends report statements
//!
//! ## Request flow
//!
//! ```text
//! request ──► validation ──ok──► ListStore operation ──► plain records ──► response
//!                 │
//!                 └──error message──► response
//! ```
//!
//! The store never validates and never depends on the request layer; the
//! caller is the only place where the two meet.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod session;
pub mod statement_log;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use model::{List, ListId, ListSummary, Todo, TodoId};
pub use session::{SessionLists, SessionStore};
pub use statement_log::{SharedStatementLogger, StatementLogger, TracingStatementLogger};
pub use store::{ListStore, StoreError, StoreFuture};
