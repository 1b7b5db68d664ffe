//! Router configuration for the todo-lists server.
//!
//! Builds the complete Axum router with all endpoints.

use crate::handlers::{health::health_check, lists, todos};
use crate::session::session_layer;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Every route runs behind the session layer, so handlers always find the
/// caller's session id in the request extensions.
pub fn build_router(state: AppState) -> Router {
    let list_routes = Router::new()
        .route("/", get(lists::list_lists).post(lists::create_list))
        .route("/:id", get(lists::show_list).post(lists::rename_list))
        .route("/:id/destroy", post(lists::destroy_list))
        .route("/:id/complete_all", post(todos::complete_all))
        .route("/:id/todos", post(todos::create_todo))
        .route("/:id/todos/:todo_id", post(todos::update_todo))
        .route("/:id/todos/:todo_id/destroy", post(todos::destroy_todo));

    Router::new()
        .route("/", get(lists::index))
        .route("/health", get(health_check))
        .nest("/lists", list_routes)
        .layer(session_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
