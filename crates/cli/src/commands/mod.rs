pub(crate) mod inlet;
pub(crate) mod memories;
pub(crate) mod serve;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use automem_storage::{MemoryStore, Storage};

use crate::ensure_db_dir;

pub(crate) fn open_store(db_path: &Path) -> Result<Arc<dyn MemoryStore>> {
    ensure_db_dir(db_path)?;
    Ok(Arc::new(Storage::new(db_path)?))
}
