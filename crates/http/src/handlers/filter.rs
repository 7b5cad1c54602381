use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use super::{drain_events, hook_context};
use crate::AppState;
use crate::api_types::{HookRequest, HookResponse};

pub async fn inlet(State(state): State<Arc<AppState>>, Json(req): Json<HookRequest>) -> Json<HookResponse> {
    let (ctx, rx) = hook_context(&req.user);
    let outcome = state.filter.inlet(&ctx, req.body).await;

    if let Some(user) = ctx.current_user() {
        if !outcome.turn.is_empty() {
            state.pending.insert(&user.id, req.chat_id.as_deref().unwrap_or_default(), outcome.turn).await;
        }
    }
    drop(ctx);
    Json(HookResponse { body: outcome.body, events: drain_events(rx) })
}

pub async fn outlet(State(state): State<Arc<AppState>>, Json(req): Json<HookRequest>) -> Json<HookResponse> {
    let (ctx, rx) = hook_context(&req.user);
    let turn = match ctx.current_user() {
        Some(user) => state.pending.take(&user.id, req.chat_id.as_deref().unwrap_or_default()).await,
        None => automem_service::TurnRecord::default(),
    };
    let body = state.filter.outlet(&ctx, req.body, turn).await;
    drop(ctx);
    Json(HookResponse { body, events: drain_events(rx) })
}
