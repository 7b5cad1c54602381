//! HTTP server for automem.
//!
//! Exposes the filter hooks to a host that lives in another process: the host
//! posts the chat body and user to `/filter/inlet` before the model call and to
//! `/filter/outlet` after it. The turn record between the two is kept here,
//! keyed by user and chat.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod api_types;
mod handlers;
mod pending;


use std::sync::Arc;

use automem_service::{MemoryFilter, MemoryService};
use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use api_types::{AddMemoryResponse, HookRequest, HookResponse};
pub use pending::PendingTurns;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// The memory filter behind the hook endpoints
    pub filter: Arc<MemoryFilter>,
    /// Direct memory listing
    pub memory_service: Arc<MemoryService>,
    /// Turn records between an inlet and its outlet
    pub pending: PendingTurns,
}

impl AppState {
    #[must_use]
    pub fn new(filter: Arc<MemoryFilter>) -> Self {
        let memory_service = Arc::new(MemoryService::new(Arc::clone(filter.store())));
        Self { filter, memory_service, pending: PendingTurns::default() }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/filter/inlet", post(handlers::filter::inlet))
        .route("/filter/outlet", post(handlers::filter::outlet))
        .route("/action/add-memory", post(handlers::action::add_memory))
        .route("/memories/{user_id}", get(handlers::memories::list_memories))
        .route("/config", get(handlers::admin::get_config).post(handlers::admin::update_config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
