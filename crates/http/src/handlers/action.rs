use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use super::{drain_events, hook_context};
use crate::AppState;
use crate::api_types::{AddMemoryResponse, HookRequest};

pub async fn add_memory(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HookRequest>,
) -> Json<AddMemoryResponse> {
    let (ctx, rx) = hook_context(&req.user);
    let memory = state.filter.add_exchange(&ctx, &req.body).await;
    drop(ctx);
    Json(AddMemoryResponse { stored: memory.is_some(), memory, events: drain_events(rx) })
}
