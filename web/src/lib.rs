//! HTTP controller layer for todo lists.
//!
//! This crate turns HTTP requests into `ListStore` calls. It owns everything
//! around the store that a running server needs:
//!
//! - Configuration from the environment ([`config`])
//! - Cookie-identified sessions and their in-memory lists ([`session`])
//! - Backend selection ([`state`])
//! - Name validation before every mutation and JSON responses ([`handlers`])
//! - Mapping of store failures to HTTP errors ([`error`])
//!
//! # Request Flow
//!
//! 1. **Session layer** resolves the caller's session from its cookie
//! 2. **`CallerStore` extractor** picks the store serving that session
//! 3. **Handler** loads the addressed list (404 when absent), validates input
//!    (422 when invalid) and calls the store
//! 4. **Response** is a JSON document with a user-facing message
//!
//! # Example
//!
//! ```ignore
//! use todo_lists_web::{build_router, AppState};
//!
//! let app = build_router(AppState::with_sessions());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4567").await?;
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod session;
pub mod state;

// Re-export key types for convenience
pub use config::{Config, ConfigError, StoreBackend};
pub use error::AppError;
pub use extractors::CallerStore;
pub use router::build_router;
pub use session::{
    session_layer, SessionId, SessionRegistry, DEFAULT_IDLE_TIMEOUT, SESSION_COOKIE,
};
pub use state::{AppState, Persistence};
