//! Quartet Core - Agent Orchestration Pipeline
//!
//! The orchestration logic behind a conversation turn:
//! - `AgentRole`: the four fixed specializations (architect, backend,
//!   frontend, qa)
//! - `summarize`: sentence-aware digest of prior agent output
//! - `should_research` / `ResearchData`: the architect-only research gate
//! - `allocate_output_budget`: prompt-size-aware output token allocation
//! - `AgentOrchestrator`: one agent invocation (prompt assembly, optional
//!   research, model call, best-effort speech)
//! - `run_turn`: the four-stage pipeline driver
//!
//! The orchestrator is stateless per call: conversation history and research
//! data are passed in and returned, never retained internally. All external
//! collaborators are injected as `Arc<dyn …>` handles constructed once per
//! process.

#![forbid(unsafe_code)]

pub mod budget;
pub mod error;
pub mod history;
pub mod orchestrator;
pub mod pipeline;
mod prompt;
pub mod prompts;
pub mod research;
pub mod role;
pub mod summarize;
pub mod types;

pub use budget::{allocate_output_budget, OutputBudget};
pub use error::{Error, Result};
pub use history::CommandHistory;
pub use orchestrator::AgentOrchestrator;
pub use pipeline::{TurnOutcome, TurnStage};
pub use research::{should_research, ResearchData};
pub use role::AgentRole;
pub use summarize::summarize;
pub use types::{AgentRequest, AgentResponse, ContextEntry, TokenInfo};
