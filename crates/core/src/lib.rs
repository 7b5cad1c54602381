//! Core types for automem
//!
//! Domain types shared across all other crates: memory operations, the
//! `[Tags: ...]` content encoding, chat body helpers, host events and config.

mod chat;
mod config;
mod constants;
mod env_config;
mod error;
mod event;
mod json_utils;
mod memory;
mod operation;
mod tags;
mod user;

pub use chat::*;
pub use config::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use event::*;
pub use json_utils::*;
pub use memory::*;
pub use operation::*;
pub use tags::*;
pub use user::*;
