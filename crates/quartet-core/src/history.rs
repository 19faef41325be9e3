//! Command history seam
//!
//! The orchestrator only needs two read operations from the command store,
//! expressed as a trait so tests can fail either path on demand.

use async_trait::async_trait;

use quartet_store::{CommandRecord, CommandStore};

/// Read access to past commands.
#[async_trait]
pub trait CommandHistory: Send + Sync {
    /// Past commands ranked by relevance to `query`
    async fn search_relevant(
        &self,
        query: &str,
        limit: u32,
    ) -> quartet_store::Result<Vec<CommandRecord>>;

    /// Past commands, most recent first
    async fn list_recent(&self, limit: u32) -> quartet_store::Result<Vec<CommandRecord>>;
}

#[async_trait]
impl CommandHistory for CommandStore {
    async fn search_relevant(
        &self,
        query: &str,
        limit: u32,
    ) -> quartet_store::Result<Vec<CommandRecord>> {
        CommandStore::search_relevant(self, query, limit).await
    }

    async fn list_recent(&self, limit: u32) -> quartet_store::Result<Vec<CommandRecord>> {
        CommandStore::list_recent(self, limit).await
    }
}
