//! Completion request and response types

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Why the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural end of output
    Stop,
    /// Output was cut off by the output-token cap
    MaxTokens,
    /// Output was stopped by a safety filter
    Safety,
    /// Any other provider-specific reason
    Other,
}

impl FinishReason {
    /// Map a provider `stop_reason` string to a finish reason.
    ///
    /// A missing stop reason maps to `Other` so callers never mistake an
    /// unreported stop for a clean one.
    #[must_use]
    pub fn from_api(stop_reason: Option<&str>) -> Self {
        match stop_reason {
            Some("end_turn") | Some("stop_sequence") => Self::Stop,
            Some("max_tokens") => Self::MaxTokens,
            Some("refusal") => Self::Safety,
            _ => Self::Other,
        }
    }

    /// Whether the output hit the length cap
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::MaxTokens)
    }
}

/// Completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Model to use (provider-specific)
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 1.0)
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a new completion request
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Set max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// All message contents joined, for logging and sizing
    #[must_use]
    pub fn flattened_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,
    /// Token usage, when the provider reports it
    pub usage: Option<TokenUsage>,
    /// Why generation stopped
    pub finish_reason: FinishReason,
    /// Model used
    pub model: String,
}
