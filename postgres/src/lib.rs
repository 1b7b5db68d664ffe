//! `PostgreSQL` list store for todo lists.
//!
//! This crate provides the durable implementation of the `ListStore` trait
//! from `todo-lists-core`. It uses sqlx and supports:
//!
//! - Lazy schema bootstrap from a caller-supplied script
//! - Statement logging through an injected `StatementLogger`
//! - Todo counts computed by a single aggregate query
//! - Connection retry with exponential backoff
//!
//! # Example
//!
//! ```ignore
//! use todo_lists_postgres::{PostgresConfig, PostgresListStore, SchemaScript};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresListStore::connect(
//!         &PostgresConfig::new("postgres://localhost/todos"),
//!         SchemaScript::from_file("schema.sql")?,
//!         std::sync::Arc::new(todo_lists_core::TracingStatementLogger),
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod retry;
pub mod schema;
pub mod store;

mod rows;
mod statement;

pub use retry::ConnectRetry;
pub use schema::SchemaScript;
pub use store::{PostgresConfig, PostgresListStore};
