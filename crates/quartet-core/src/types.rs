//! Orchestrator request and response types

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use quartet_llm::FinishReason;

use crate::research::ResearchData;

/// An earlier agent's contribution within the current turn.
///
/// The role is a free-text label (e.g. "Architect"), not necessarily an
/// `AgentRole` name. Entries are append-only and never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Role label of the agent that produced the message
    pub role: String,
    /// Full text of that agent's response
    pub message: String,
}

impl ContextEntry {
    /// Create a context entry
    #[must_use]
    pub fn new(role: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            message: message.into(),
        }
    }
}

/// Token diagnostics for one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Estimated prompt tokens
    pub prompt_tokens: u32,
    /// Output tokens requested from the model
    pub allocated_output_tokens: u32,
    /// The model's finish reason; absent when no model call was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

impl TokenInfo {
    /// Token info for a research-only short-circuit (no model call).
    #[must_use]
    pub fn research_only() -> Self {
        Self {
            prompt_tokens: 0,
            allocated_output_tokens: 0,
            finish_reason: None,
        }
    }
}

/// One agent invocation request.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    /// The raw user transcript
    pub transcript: String,
    /// Requested agent role name; validated by the orchestrator
    pub role: String,
    /// Accumulated context from earlier agents in this turn
    pub context: Vec<ContextEntry>,
    /// Trade depth for speed: fast model, concise prompts
    pub demo_mode: bool,
    /// Research carried over from an earlier research-only turn
    pub previous_research: Option<ResearchData>,
}

impl AgentRequest {
    /// Create a request with empty context and default flags
    #[must_use]
    pub fn new(transcript: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            role: role.into(),
            context: Vec::new(),
            demo_mode: false,
            previous_research: None,
        }
    }

    /// Set the accumulated context
    #[must_use]
    pub fn with_context(mut self, context: Vec<ContextEntry>) -> Self {
        self.context = context;
        self
    }

    /// Set demo mode
    #[must_use]
    pub fn with_demo_mode(mut self, demo_mode: bool) -> Self {
        self.demo_mode = demo_mode;
        self
    }

    /// Attach carried-over research
    #[must_use]
    pub fn with_previous_research(mut self, research: Option<ResearchData>) -> Self {
        self.previous_research = research;
        self
    }
}

/// One agent invocation result.
///
/// Constructed fresh per call and returned to the caller; the orchestrator
/// never stores it. Persistence is the command store's job, driven by the
/// caller.
#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// The agent's reply, trimmed
    pub message: String,
    /// Human-readable caution (truncation or complexity), if any
    pub warning: Option<String>,
    /// Whether the model's output hit the length cap
    pub truncated: bool,
    /// Research attached to this response, if any
    pub research: Option<ResearchData>,
    /// Synthesized speech for the reply, when available
    pub audio: Option<Bytes>,
    /// Token diagnostics
    pub token_info: TokenInfo,
}

impl AgentResponse {
    /// Whether this response is a research-only short-circuit (research
    /// present, no model call made).
    #[must_use]
    pub fn is_research_only(&self) -> bool {
        self.research.is_some() && self.token_info.finish_reason.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = AgentRequest::new("build it", "architect")
            .with_demo_mode(true)
            .with_context(vec![ContextEntry::new("Architect", "plan")]);

        assert!(request.demo_mode);
        assert_eq!(request.context.len(), 1);
        assert!(request.previous_research.is_none());
    }

    #[test]
    fn test_token_info_serialization_skips_absent_finish_reason() {
        let info = TokenInfo::research_only();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"promptTokens\""));
        assert!(!json.contains("finishReason"));
    }
}
