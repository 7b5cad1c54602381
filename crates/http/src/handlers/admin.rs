use std::sync::Arc;

use automem_core::{FilterConfig, REDACTED_API_KEY};
use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::api_error::ApiError;

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<FilterConfig> {
    Json(state.filter.config().await.redacted())
}

/// Replace the filter configuration. Omitted fields take their defaults; a
/// blank or redacted `api_key` keeps the current key.
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    Json(mut config): Json<FilterConfig>,
) -> Result<Json<FilterConfig>, ApiError> {
    if config.api_url.trim().is_empty() {
        return Err(ApiError::BadRequest("api_url must not be empty".to_owned()));
    }
    if config.model.trim().is_empty() {
        return Err(ApiError::BadRequest("model must not be empty".to_owned()));
    }
    if config.api_key.is_empty() || config.api_key == REDACTED_API_KEY {
        config.api_key = state.filter.config().await.api_key;
    }
    state.filter.replace_config(config.clone()).await;
    Ok(Json(config.redacted()))
}
