//! Agent orchestrator — one agent invocation per call.
//!
//! Each invocation walks a fixed set of stages:
//!
//! ```text
//! Idle → PromptBuilding → ResearchGate? → ModelInvocation
//!      → SpeechSynthesis? → ResultReady
//! ```
//!
//! The research gate (architect only) may exit early at
//! `ResultReady-ResearchOnly`, returning findings without a model call so
//! the caller must explicitly ask to continue into implementation.
//! Validation and model-call failures land in `Failed`; history, research,
//! and speech failures degrade to absent data and the turn continues.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, instrument, warn};

use quartet_llm::{CompletionRequest, LlmProvider, ModelTier};
use quartet_search::SearchClient;
use quartet_speech::{TtsBackend, VoiceProfile};

use crate::budget::allocate_output_budget;
use crate::error::{Error, Result};
use crate::history::CommandHistory;
use crate::prompt::{build_messages, estimate_prompt_tokens, PromptParts};
use crate::research::{should_research, ResearchData};
use crate::role::AgentRole;
use crate::types::{AgentRequest, AgentResponse, TokenInfo};

/// Fixed sampling temperature for all agent calls
const TEMPERATURE: f32 = 0.7;

/// Results requested from the search client during the research gate
const RESEARCH_RESULT_COUNT: usize = 5;

/// Past commands considered for prompt history
const HISTORY_LIMIT: u32 = 3;

/// Character budget for the spoken clip of a reply
const SPEECH_CLIP_CHARS: usize = 450;

/// Fraction of the speech budget (from the end) where a sentence boundary
/// is preferred over a hard cut
const SPEECH_BOUNDARY_WINDOW: f64 = 0.3;

/// Substitute reply when the model returns no text at all
const EMPTY_RESPONSE_MESSAGE: &str =
    "Sorry, I couldn't put together a useful answer for that. Could you rephrase the request?";

/// Warning attached when the output hit the length cap
const TRUNCATION_WARNING: &str =
    "The response hit the output length limit and was cut off. Ask a follow-up to continue.";

/// Warning attached when the prompt crossed the complexity threshold
const COMPLEXITY_WARNING: &str =
    "This is a complex request; the response may be slower and less detailed than usual.";

/// Orchestrates a single agent invocation against the injected collaborators.
///
/// Stateless per call; safe to share across concurrent requests.
pub struct AgentOrchestrator {
    llm: Arc<dyn LlmProvider>,
    search: Arc<dyn SearchClient>,
    tts: Arc<dyn TtsBackend>,
    history: Arc<dyn CommandHistory>,
}

impl AgentOrchestrator {
    /// Create an orchestrator over the given collaborator handles.
    ///
    /// Handles are expected to be constructed once per process and shared.
    #[must_use]
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchClient>,
        tts: Arc<dyn TtsBackend>,
        history: Arc<dyn CommandHistory>,
    ) -> Self {
        Self {
            llm,
            search,
            tts,
            history,
        }
    }

    /// Run one agent invocation.
    ///
    /// Fatal failures: invalid input, model-call errors. Everything else
    /// degrades: missing history, failed research, failed speech synthesis
    /// all produce a response with the corresponding data absent.
    #[instrument(skip(self, request), fields(role = %request.role, demo = request.demo_mode))]
    pub async fn run_agent(&self, request: AgentRequest) -> Result<AgentResponse> {
        if request.transcript.trim().is_empty() {
            return Err(Error::InvalidInput(
                "transcript must not be empty".to_string(),
            ));
        }
        let role: AgentRole = request.role.parse()?;

        let history = self.fetch_history(&request.transcript).await;

        if role == AgentRole::Architect
            && request.previous_research.is_none()
            && should_research(&request.transcript)
        {
            if let Some(research) = self.run_research(&request.transcript).await {
                debug!("research gate short-circuited the turn");
                return Ok(research_only_response(research));
            }
        }

        // Fresh research with data always short-circuits above, so the only
        // research that reaches a prompt is carried over by the caller.
        let research = request.previous_research.clone();

        let messages = build_messages(&PromptParts {
            role,
            demo_mode: request.demo_mode,
            transcript: &request.transcript,
            history: &history,
            research: research.as_ref(),
            context: &request.context,
        });
        let prompt_tokens = estimate_prompt_tokens(&messages);

        let tier = ModelTier::for_demo_mode(request.demo_mode);
        let budget = allocate_output_budget(prompt_tokens, tier);
        debug!(
            prompt_tokens,
            max_output_tokens = budget.max_output_tokens,
            "prompt assembled"
        );

        let mut completion_request = CompletionRequest::new(tier.model_id())
            .with_max_tokens(budget.max_output_tokens)
            .with_temperature(TEMPERATURE);
        completion_request.messages = messages;

        let completion = self.llm.complete(completion_request).await?;

        let truncated = completion.finish_reason.is_truncated();
        let warning = if truncated {
            Some(TRUNCATION_WARNING.to_string())
        } else if budget.over_warning_threshold {
            Some(COMPLEXITY_WARNING.to_string())
        } else {
            None
        };

        let mut message = completion.content.trim().to_string();
        if message.is_empty() {
            warn!("model returned no text; substituting apology message");
            message = EMPTY_RESPONSE_MESSAGE.to_string();
        }

        let audio = self.run_speech(&message, role).await;

        Ok(AgentResponse {
            message,
            warning,
            truncated,
            research,
            audio,
            token_info: TokenInfo {
                prompt_tokens,
                allocated_output_tokens: budget.max_output_tokens,
                finish_reason: Some(completion.finish_reason),
            },
        })
    }

    /// Best-effort history lookup: relevance search, then recency listing,
    /// then nothing. Never aborts the turn.
    async fn fetch_history(&self, transcript: &str) -> Vec<quartet_store::CommandRecord> {
        match self.history.search_relevant(transcript, HISTORY_LIMIT).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "relevance search failed; falling back to recency listing");
                match self.history.list_recent(HISTORY_LIMIT).await {
                    Ok(records) => records,
                    Err(e) => {
                        warn!(error = %e, "history lookup unavailable; continuing without history");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Best-effort research pass. `None` on failure or when the search
    /// returned nothing.
    async fn run_research(&self, transcript: &str) -> Option<ResearchData> {
        match self.search.search(transcript, RESEARCH_RESULT_COUNT).await {
            Ok(results) => ResearchData::from_results(transcript, results),
            Err(e) => {
                warn!(error = %e, "research lookup failed; continuing without research");
                None
            }
        }
    }

    /// Best-effort speech synthesis. `None` on any failure.
    async fn run_speech(&self, message: &str, role: AgentRole) -> Option<Bytes> {
        let clip = clip_for_speech(message, SPEECH_CLIP_CHARS);
        match self.tts.synthesize(&clip, &voice_for(role)).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(error = %e, "speech synthesis failed; returning text only");
                None
            }
        }
    }
}

fn research_only_response(research: ResearchData) -> AgentResponse {
    AgentResponse {
        message: research.short_circuit_message(),
        warning: None,
        truncated: false,
        research: Some(research),
        audio: None,
        token_info: TokenInfo::research_only(),
    }
}

/// Voice used for each role.
fn voice_for(role: AgentRole) -> VoiceProfile {
    match role {
        AgentRole::Architect => VoiceProfile::new("21m00Tcm4TlvDq8ikWAM"), // Rachel
        AgentRole::Backend => VoiceProfile::new("TxGEqnHWrfWFTfGW9XjX"),   // Josh
        AgentRole::Frontend => VoiceProfile::new("EXAVITQu4vr4xnSDxMaL"),  // Sarah
        AgentRole::Qa => VoiceProfile::new("pNInz6obpgDQGcFmaJgB"),        // Adam
    }
}

/// Clip a reply for speech synthesis.
///
/// Prefers to cut at a sentence boundary when one falls in the trailing
/// window of the budget; otherwise hard-cuts with an ellipsis.
fn clip_for_speech(text: &str, max_chars: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return text.to_string();
    }

    let window_start = (max_chars as f64 * (1.0 - SPEECH_BOUNDARY_WINDOW)) as usize;
    let boundary = chars[..max_chars]
        .iter()
        .enumerate()
        .rev()
        .find(|&(i, &c)| i >= window_start && matches!(c, '.' | '!' | '?'))
        .map(|(i, _)| i);

    match boundary {
        Some(i) => chars[..=i].iter().collect(),
        None => {
            let mut cut: String = chars[..max_chars].iter().collect();
            cut.truncate(cut.trim_end().len());
            cut.push('…');
            cut
        }
    }
}
