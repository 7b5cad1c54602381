use std::sync::Arc;

use automem_core::TaggedMemory;
use axum::Json;
use axum::extract::{Path, State};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn list_memories(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<TaggedMemory>>, ApiError> {
    Ok(Json(state.memory_service.list_tagged(&user_id).await?))
}
