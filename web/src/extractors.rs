//! Custom Axum extractors.
//!
//! - `CallerStore`: the `ListStore` serving the caller's session
//!
//! # Examples
//!
//! ```ignore
//! use todo_lists_web::extractors::CallerStore;
//!
//! async fn handler(CallerStore(store): CallerStore) -> Result<Json<Vec<ListSummary>>, AppError> {
//!     Ok(Json(store.all_lists().await?))
//! }
//! ```

use crate::error::AppError;
use crate::session::SessionId;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use todo_lists_core::ListStore;

/// The store serving the caller's session.
///
/// Requires the session layer; without it the request fails with 500.
#[derive(Clone)]
pub struct CallerStore(pub Arc<dyn ListStore>);

#[async_trait]
impl FromRequestParts<AppState> for CallerStore {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session_id = parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| AppError::internal("Session middleware not installed"))?;

        Ok(Self(state.store_for(session_id)))
    }
}

impl std::ops::Deref for CallerStore {
    type Target = dyn ListStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}
