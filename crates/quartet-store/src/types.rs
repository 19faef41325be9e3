//! Persisted turn types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One agent's contribution to a completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Agent role label (free text, e.g. "Architect")
    pub role: String,
    /// Full response text
    pub message: String,
}

impl AgentMessage {
    /// Create an agent message
    #[must_use]
    pub fn new(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            message: message.into(),
        }
    }
}

/// A completed, persisted conversation turn.
///
/// `id` and `timestamp` are assigned by the store at write time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRecord {
    /// Store-assigned id
    pub id: Uuid,
    /// The user transcript that started the turn
    pub transcript: String,
    /// Store-assigned write timestamp
    pub timestamp: DateTime<Utc>,
    /// Agent responses in the order the agents ran
    pub agent_responses: Vec<AgentMessage>,
}
