use std::path::Path;

use anyhow::Result;
use automem_service::MemoryService;

use super::open_store;

pub(crate) async fn list(db_path: &Path, user: &str) -> Result<()> {
    let service = MemoryService::new(open_store(db_path)?);
    let memories = service.list_tagged(user).await?;
    println!("{}", serde_json::to_string_pretty(&memories)?);
    Ok(())
}

pub(crate) async fn add(db_path: &Path, user: &str, content: &str, tags: &[String]) -> Result<()> {
    let service = MemoryService::new(open_store(db_path)?);
    let record = service.add(user, content, tags).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
