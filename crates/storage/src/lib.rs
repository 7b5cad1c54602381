//! Storage layer for automem
//!
//! The host owns memory persistence; this crate defines the narrow API the
//! filter needs (`MemoryStore`) plus two stand-in backends: an in-process map
//! for tests and embedding, and a SQLite file for the CLI and HTTP server.

mod error;
mod in_memory;
#[cfg(feature = "sqlite")]
mod migrations;
#[cfg(feature = "sqlite")]
mod sqlite_async;
#[cfg(feature = "sqlite")]
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use in_memory::InMemoryStore;
#[cfg(feature = "sqlite")]
pub use storage::Storage;
pub use traits::MemoryStore;
