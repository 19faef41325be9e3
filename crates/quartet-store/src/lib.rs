//! Quartet Store - Command Persistence
//!
//! SQLite-backed storage for completed conversation turns:
//! - `CommandStore`: save, recency listing, relevance search
//! - `CommandRecord` / `AgentMessage`: the persisted turn shape
//!
//! Records are immutable once written. Ids and timestamps are assigned by
//! the store at write time; caller-supplied values are never trusted.

#![forbid(unsafe_code)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use store::CommandStore;
pub use types::{AgentMessage, CommandRecord};
