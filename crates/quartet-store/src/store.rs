//! CommandStore — SQLite persistence for completed turns.
//!
//! Single `commands` table; agent responses are stored as a JSON column
//! since they are only ever read back whole.

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{AgentMessage, CommandRecord};

/// SQLite-backed command store.
#[derive(Clone)]
pub struct CommandStore {
    pool: SqlitePool,
}

impl CommandStore {
    /// Open (or create) a store at the given path.
    pub async fn from_path(db_path: &std::path::Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Internal(format!("mkdir: {e}")))?;
        }
        let url = format!("sqlite:{}?mode=rwc", db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // Enable WAL for read/write concurrency
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&pool)
            .await?;

        let store = Self { pool };
        store.run_migrations().await?;
        info!("Command store initialized at {}", db_path.display());
        Ok(store)
    }

    /// In-memory store (for tests).
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.run_migrations().await?;
        debug!("In-memory command store initialized");
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS commands (
                id              TEXT PRIMARY KEY,
                transcript      TEXT NOT NULL,
                created_at      TEXT NOT NULL,
                agent_responses TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_commands_created
             ON commands(created_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a completed turn.
    ///
    /// The id and timestamp are assigned here; any timestamp the caller may
    /// have carried is discarded.
    pub async fn save(
        &self,
        transcript: &str,
        agent_responses: &[AgentMessage],
    ) -> Result<CommandRecord> {
        let record = CommandRecord {
            id: Uuid::new_v4(),
            transcript: transcript.to_string(),
            timestamp: Utc::now(),
            agent_responses: agent_responses.to_vec(),
        };
        let responses_json = serde_json::to_string(&record.agent_responses)?;

        sqlx::query(
            "INSERT INTO commands (id, transcript, created_at, agent_responses)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(record.id.to_string())
        .bind(&record.transcript)
        .bind(record.timestamp.to_rfc3339())
        .bind(responses_json)
        .execute(&self.pool)
        .await?;

        debug!(id = %record.id, "command saved");
        Ok(record)
    }

    /// List stored turns, most recent first.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<CommandRecord>> {
        let rows = sqlx::query(
            "SELECT id, transcript, created_at, agent_responses
             FROM commands
             ORDER BY created_at DESC
             LIMIT ?1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_record).collect()
    }

    /// Search stored turns ranked by term overlap with the transcript.
    ///
    /// Recent rows are prefetched and scored in memory by the number of
    /// query terms they contain; ties break toward newer rows. Callers
    /// should fall back to [`list_recent`](Self::list_recent) when this
    /// fails.
    pub async fn search_relevant(&self, query: &str, limit: u32) -> Result<Vec<CommandRecord>> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(str::to_lowercase)
            .filter(|t| t.len() > 2)
            .collect();
        if terms.is_empty() {
            return self.list_recent(limit).await;
        }

        // Score over a bounded window of recent rows, not the whole table
        let candidates = self.list_recent(200).await?;

        let mut scored: Vec<(usize, CommandRecord)> = candidates
            .into_iter()
            .filter_map(|record| {
                let transcript = record.transcript.to_lowercase();
                let score = terms.iter().filter(|t| transcript.contains(t.as_str())).count();
                (score > 0).then_some((score, record))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.timestamp.cmp(&a.1.timestamp)));
        Ok(scored
            .into_iter()
            .take(limit as usize)
            .map(|(_, record)| record)
            .collect())
    }

    /// Number of stored turns.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM commands")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<CommandRecord> {
    let id: String = row.try_get("id")?;
    let transcript: String = row.try_get("transcript")?;
    let created_at: String = row.try_get("created_at")?;
    let responses_json: String = row.try_get("agent_responses")?;

    Ok(CommandRecord {
        id: Uuid::parse_str(&id).map_err(|e| Error::Internal(format!("bad id: {e}")))?,
        transcript,
        timestamp: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| Error::Internal(format!("bad timestamp: {e}")))?
            .with_timezone(&Utc),
        agent_responses: serde_json::from_str(&responses_json)?,
    })
}
