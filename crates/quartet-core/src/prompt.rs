//! Prompt assembly
//!
//! One prompt per agent invocation, assembled in a fixed order: role
//! instructions, the raw transcript, summarized history, the research block,
//! summarized prior context, and a closing instruction. Every variable-size
//! section is bounded by summarization so four sequential calls cannot blow
//! up the context window.

use quartet_llm::{estimate_tokens, Message};
use quartet_store::CommandRecord;

use crate::prompts;
use crate::research::ResearchData;
use crate::role::AgentRole;
use crate::summarize::summarize;
use crate::types::ContextEntry;

/// History entries included per prompt
pub(crate) const MAX_HISTORY_ENTRIES: usize = 3;

/// Character bound per summarized history entry
const HISTORY_SUMMARY_LEN: usize = 150;

/// Character bound per summarized context entry
const CONTEXT_SUMMARY_LEN: usize = 250;

/// Everything that goes into one agent prompt.
pub(crate) struct PromptParts<'a> {
    pub role: AgentRole,
    pub demo_mode: bool,
    pub transcript: &'a str,
    pub history: &'a [CommandRecord],
    pub research: Option<&'a ResearchData>,
    pub context: &'a [ContextEntry],
}

/// Assemble the system and user messages for one agent invocation.
pub(crate) fn build_messages(parts: &PromptParts<'_>) -> Vec<Message> {
    let mut body = String::new();

    body.push_str("User request:\n");
    body.push_str(parts.transcript.trim());

    if !parts.history.is_empty() {
        body.push_str("\n\nRelated past requests:\n");
        for record in parts.history.iter().take(MAX_HISTORY_ENTRIES) {
            body.push_str("- ");
            body.push_str(&summarize(&record.transcript, HISTORY_SUMMARY_LEN));
            body.push('\n');
        }
    }

    if let Some(research) = parts.research {
        body.push_str("\n\n");
        body.push_str(&research.prompt_block());
    }

    if !parts.context.is_empty() {
        body.push_str("\n\nTeam discussion so far:\n");
        for entry in parts.context {
            body.push_str(&entry.role);
            body.push_str(": ");
            body.push_str(&summarize(&entry.message, CONTEXT_SUMMARY_LEN));
            body.push('\n');
        }
    }

    body.push_str("\n\n");
    body.push_str(&prompts::closing_instruction(parts.role, parts.demo_mode));

    vec![
        Message::system(prompts::instructions(parts.role, parts.demo_mode)),
        Message::user(body),
    ]
}

/// Estimated token count of the whole prompt.
pub(crate) fn estimate_prompt_tokens(messages: &[Message]) -> u32 {
    messages.iter().map(|m| estimate_tokens(&m.content)).sum()
}
