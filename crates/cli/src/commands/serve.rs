use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use automem_core::FilterConfig;
use automem_http::{AppState, create_router};
use automem_service::MemoryFilter;

use super::open_store;

pub(crate) async fn run(db_path: &Path, port: u16, host: &str) -> Result<()> {
    let store = open_store(db_path)?;
    let config = FilterConfig::from_env();
    if config.api_key.is_empty() {
        tracing::warn!("AUTOMEM_API_KEY is not set; completion calls will likely be rejected");
    }
    tracing::info!(config = ?config, "Filter configuration loaded");

    let filter = Arc::new(MemoryFilter::new(config, store)?);
    let router = create_router(Arc::new(AppState::new(filter)));

    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
