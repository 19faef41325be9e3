//! Quartet LLM - Language-Model Provider Abstraction
//!
//! This crate provides the language-model client used by the agent
//! orchestrator:
//! - `LlmProvider`: the provider trait (dependency-injected, never a hidden
//!   singleton)
//! - `AnthropicProvider`: Claude Messages API client
//! - `MockProvider`: queue-based test double with call counting
//! - `ModelTier`: fast vs. high-quality model selection
//! - `estimate_tokens`: character-based token approximation for sizing

#![forbid(unsafe_code)]

pub mod anthropic;
pub mod completion;
pub mod error;
pub mod message;
pub mod mock;
pub mod provider;
pub mod tier;
pub mod token;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use completion::{CompletionRequest, CompletionResponse, FinishReason, TokenUsage};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use provider::LlmProvider;
pub use tier::ModelTier;
pub use token::estimate_tokens;
