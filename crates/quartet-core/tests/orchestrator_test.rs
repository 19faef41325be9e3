//! Orchestrator behavior tests
//!
//! All collaborators are test doubles with call counters, so every test can
//! assert not only on the response but on which external calls were (or
//! were not) made.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use quartet_core::{AgentOrchestrator, AgentRequest, CommandHistory, ContextEntry, Error};
use quartet_llm::{FinishReason, MockProvider, ModelTier};
use quartet_search::MockSearch;
use quartet_speech::MockTts;
use quartet_store::{AgentMessage, CommandRecord};

// ---------------------------------------------------------------------------
// Test doubles and harness
// ---------------------------------------------------------------------------

/// History that has nothing and never fails.
struct EmptyHistory;

#[async_trait::async_trait]
impl CommandHistory for EmptyHistory {
    async fn search_relevant(
        &self,
        _query: &str,
        _limit: u32,
    ) -> quartet_store::Result<Vec<CommandRecord>> {
        Ok(Vec::new())
    }

    async fn list_recent(&self, _limit: u32) -> quartet_store::Result<Vec<CommandRecord>> {
        Ok(Vec::new())
    }
}

/// History whose relevance search always fails, while recency listing works.
struct FailingSearchHistory {
    records: Vec<CommandRecord>,
    search_calls: AtomicUsize,
    recent_calls: AtomicUsize,
}

impl FailingSearchHistory {
    fn new(records: Vec<CommandRecord>) -> Self {
        Self {
            records,
            search_calls: AtomicUsize::new(0),
            recent_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl CommandHistory for FailingSearchHistory {
    async fn search_relevant(
        &self,
        _query: &str,
        _limit: u32,
    ) -> quartet_store::Result<Vec<CommandRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Err(quartet_store::Error::Internal("index offline".to_string()))
    }

    async fn list_recent(&self, _limit: u32) -> quartet_store::Result<Vec<CommandRecord>> {
        self.recent_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

struct Harness {
    llm: Arc<MockProvider>,
    search: Arc<MockSearch>,
    tts: Arc<MockTts>,
    orchestrator: AgentOrchestrator,
}

fn harness() -> Harness {
    harness_with_history(Arc::new(EmptyHistory))
}

fn harness_with_history(history: Arc<dyn CommandHistory>) -> Harness {
    let llm = Arc::new(MockProvider::new());
    let search = Arc::new(MockSearch::new());
    let tts = Arc::new(MockTts::new());
    let orchestrator = AgentOrchestrator::new(
        llm.clone(),
        search.clone(),
        tts.clone(),
        history,
    );
    Harness {
        llm,
        search,
        tts,
        orchestrator,
    }
}

fn past_command(transcript: &str) -> CommandRecord {
    CommandRecord {
        id: uuid::Uuid::new_v4(),
        transcript: transcript.to_string(),
        timestamp: chrono::Utc::now(),
        agent_responses: vec![AgentMessage::new("Architect", "an earlier plan")],
    }
}

const BUILD_REQUEST: &str = "Build a todo list app";
const RESEARCH_REQUEST: &str = "What is the best way to do authentication?";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_role_fails_without_external_calls() {
    let h = harness();
    let result = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "designer"))
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.to_string().contains("architect"));
    assert_eq!(h.llm.call_count(), 0);
    assert_eq!(h.search.call_count(), 0);
    assert_eq!(h.tts.call_count(), 0);
}

#[tokio::test]
async fn empty_transcript_fails_without_external_calls() {
    let h = harness();
    let result = h
        .orchestrator
        .run_agent(AgentRequest::new("   ", "architect"))
        .await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(h.llm.call_count(), 0);
    assert_eq!(h.search.call_count(), 0);
}

// ---------------------------------------------------------------------------
// Scenario A: direct build request, no research
// ---------------------------------------------------------------------------

#[tokio::test]
async fn build_request_goes_straight_to_the_model() {
    let h = harness();
    h.llm.push_text("Here is a three-tier plan.");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(h.search.call_count(), 0);
    assert_eq!(h.llm.call_count(), 1);
    assert!(response.research.is_none());
    assert!(!response.is_research_only());
    assert_eq!(response.message, "Here is a three-tier plan.");

    let prompt = h.llm.last_prompt().unwrap();
    assert!(prompt.contains(BUILD_REQUEST));
    assert!(!prompt.contains("Research findings"));
}

// ---------------------------------------------------------------------------
// Scenario B: research question short-circuits
// ---------------------------------------------------------------------------

#[tokio::test]
async fn research_question_short_circuits_before_the_model() {
    let h = harness();
    h.search.push_generated(5);

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(RESEARCH_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(h.search.call_count(), 1);
    assert_eq!(h.llm.call_count(), 0);
    assert_eq!(h.tts.call_count(), 0);

    let research = response.research.as_ref().unwrap();
    assert_eq!(research.results.len(), 1);
    assert_eq!(research.total_available, 5);
    assert!(response.audio.is_none());
    assert!(response.is_research_only());
    assert!(response.token_info.finish_reason.is_none());
}

#[tokio::test]
async fn research_gate_is_architect_only() {
    let h = harness();
    h.search.push_generated(5);
    h.llm.push_text("backend take");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(RESEARCH_REQUEST, "backend"))
        .await
        .unwrap();

    assert_eq!(h.search.call_count(), 0);
    assert_eq!(h.llm.call_count(), 1);
    assert!(response.research.is_none());
}

#[tokio::test]
async fn failed_research_degrades_to_a_normal_model_call() {
    let h = harness();
    h.search
        .push_error(quartet_search::Error::Network("dns".to_string()));
    h.llm.push_text("proceeding without research");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(RESEARCH_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(h.search.call_count(), 1);
    assert_eq!(h.llm.call_count(), 1);
    assert!(response.research.is_none());
}

#[tokio::test]
async fn empty_research_results_degrade_to_a_normal_model_call() {
    let h = harness();
    h.search.push_results(Vec::new());
    h.llm.push_text("proceeding without research");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(RESEARCH_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(h.llm.call_count(), 1);
    assert!(response.research.is_none());
}

// ---------------------------------------------------------------------------
// Scenario C: carried-over research feeds the prompt
// ---------------------------------------------------------------------------

#[tokio::test]
async fn previous_research_skips_search_and_feeds_the_prompt() {
    // First call: produce research via the short-circuit
    let h = harness();
    h.search.push_generated(5);
    let first = h
        .orchestrator
        .run_agent(AgentRequest::new(RESEARCH_REQUEST, "architect"))
        .await
        .unwrap();
    let research = first.research.unwrap();

    // Second call: carry it over
    h.llm.push_text("design informed by research");
    let second = h
        .orchestrator
        .run_agent(
            AgentRequest::new(RESEARCH_REQUEST, "architect")
                .with_previous_research(Some(research.clone())),
        )
        .await
        .unwrap();

    // No new search despite the trigger phrase still matching
    assert_eq!(h.search.call_count(), 1);
    assert_eq!(h.llm.call_count(), 1);

    let prompt = h.llm.last_prompt().unwrap();
    assert!(prompt.contains(&research.summary));
    assert!(prompt.contains("Research findings"));

    // The carried research is passed through on the response
    assert_eq!(second.research.as_ref(), Some(&research));
    assert_eq!(
        second.token_info.finish_reason,
        Some(FinishReason::Stop)
    );
    assert!(!second.is_research_only());
}

// ---------------------------------------------------------------------------
// Truncation and warnings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn max_tokens_finish_sets_truncated_and_warning() {
    let h = harness();
    h.llm.push_truncated("partial answer that was cut");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap();

    assert!(response.truncated);
    let warning = response.warning.unwrap();
    assert!(!warning.is_empty());
    assert_eq!(
        response.token_info.finish_reason,
        Some(FinishReason::MaxTokens)
    );
    assert_eq!(response.message, "partial answer that was cut");
}

#[tokio::test]
async fn oversized_prompt_gets_a_complexity_warning() {
    let h = harness();
    h.llm.push_text("fine");

    // ~40k chars -> ~10k estimated tokens, past the quality-tier threshold
    let transcript = "add a feature ".repeat(3_000);
    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(transcript, "architect"))
        .await
        .unwrap();

    assert!(!response.truncated);
    assert!(response.warning.unwrap().contains("complex"));
}

#[tokio::test]
async fn empty_model_output_becomes_an_apology_not_an_error() {
    let h = harness();
    h.llm.push_text("   ");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap();

    assert!(!response.message.is_empty());
    assert!(response.message.contains("rephrase"));
}

#[tokio::test]
async fn model_failure_is_fatal_with_provider_detail() {
    let h = harness();
    h.llm
        .push_error(quartet_llm::Error::Api("overloaded_error".to_string()));

    let err = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ModelInvocation(_)));
    assert!(err.to_string().contains("overloaded_error"));
}

// ---------------------------------------------------------------------------
// Degraded auxiliaries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn speech_failure_keeps_the_text_response() {
    let h = harness();
    h.llm.push_text("spoken reply");
    h.tts.fail_all();

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(response.message, "spoken reply");
    assert!(response.audio.is_none());
    assert_eq!(h.tts.call_count(), 1);
}

#[tokio::test]
async fn successful_speech_is_attached() {
    let h = harness();
    h.llm.push_text("spoken reply");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(response.audio.unwrap().as_ref(), b"mock-audio");
}

#[tokio::test]
async fn history_search_failure_falls_back_to_recency() {
    let history = Arc::new(FailingSearchHistory::new(vec![past_command(
        "an earlier build request about todo lists",
    )]));
    let h = harness_with_history(history.clone());
    h.llm.push_text("plan");

    let response = h
        .orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect"))
        .await
        .unwrap();

    assert_eq!(history.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(history.recent_calls.load(Ordering::SeqCst), 1);
    assert!(!response.message.is_empty());

    let prompt = h.llm.last_prompt().unwrap();
    assert!(prompt.contains("Related past requests"));
    assert!(prompt.contains("earlier build request"));
}

// ---------------------------------------------------------------------------
// Demo mode
// ---------------------------------------------------------------------------

#[tokio::test]
async fn demo_mode_uses_the_fast_tier() {
    let h = harness();
    h.llm.push_text("quick plan");

    h.orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "architect").with_demo_mode(true))
        .await
        .unwrap();

    let request = &h.llm.requests()[0];
    assert_eq!(request.model, ModelTier::Fast.model_id());
    assert!(request.max_tokens.unwrap() <= ModelTier::Fast.output_ceiling());
}

#[tokio::test]
async fn demo_mode_still_includes_carried_research() {
    let h = harness();
    h.search.push_generated(3);
    let research = h
        .orchestrator
        .run_agent(AgentRequest::new(RESEARCH_REQUEST, "architect"))
        .await
        .unwrap()
        .research
        .unwrap();

    h.llm.push_text("concise, research-aware plan");
    h.orchestrator
        .run_agent(
            AgentRequest::new(RESEARCH_REQUEST, "architect")
                .with_demo_mode(true)
                .with_previous_research(Some(research.clone())),
        )
        .await
        .unwrap();

    let prompt = h.llm.last_prompt().unwrap();
    assert!(prompt.contains(&research.summary));
}

// ---------------------------------------------------------------------------
// Pipeline driver
// ---------------------------------------------------------------------------

#[tokio::test]
async fn full_turn_runs_all_four_roles_in_order() {
    let h = harness();
    for text in ["plan", "api design", "ui design", "test strategy"] {
        h.llm.push_text(text);
    }

    let outcome = h
        .orchestrator
        .run_turn(BUILD_REQUEST, false, None)
        .await
        .unwrap();

    assert!(!outcome.research_only);
    assert_eq!(outcome.stages.len(), 4);
    let roles: Vec<&str> = outcome.stages.iter().map(|s| s.role.as_str()).collect();
    assert_eq!(roles, ["architect", "backend", "frontend", "qa"]);
    assert_eq!(h.llm.call_count(), 4);

    // qa saw all three earlier entries, in fixed insertion order
    let qa_prompt = h.llm.requests()[3].flattened_text();
    let architect_at = qa_prompt.find("Architect:").unwrap();
    let backend_at = qa_prompt.find("Backend:").unwrap();
    let frontend_at = qa_prompt.find("Frontend:").unwrap();
    assert!(architect_at < backend_at);
    assert!(backend_at < frontend_at);

    let messages = outcome.agent_messages();
    assert_eq!(messages[0].role, "Architect");
    assert_eq!(messages[3].message, "test strategy");
}

#[tokio::test]
async fn backend_and_frontend_share_the_architect_only_context() {
    let h = harness();
    for text in ["plan", "api design", "ui design", "test strategy"] {
        h.llm.push_text(text);
    }

    h.orchestrator
        .run_turn(BUILD_REQUEST, false, None)
        .await
        .unwrap();

    let requests = h.llm.requests();
    for stage in [1, 2] {
        let prompt = requests[stage].flattened_text();
        assert!(prompt.contains("Architect:"));
        assert!(!prompt.contains("Backend:"));
        assert!(!prompt.contains("Frontend:"));
    }
}

#[tokio::test]
async fn research_short_circuit_ends_the_turn() {
    let h = harness();
    h.search.push_generated(5);

    let outcome = h
        .orchestrator
        .run_turn(RESEARCH_REQUEST, false, None)
        .await
        .unwrap();

    assert!(outcome.research_only);
    assert_eq!(outcome.stages.len(), 1);
    assert_eq!(h.llm.call_count(), 0);
    assert!(outcome.stages[0].response.research.is_some());
}

#[tokio::test]
async fn carried_research_lets_the_turn_run_to_completion() {
    let h = harness();
    h.search.push_generated(5);
    let research = h
        .orchestrator
        .run_turn(RESEARCH_REQUEST, false, None)
        .await
        .unwrap()
        .stages
        .remove(0)
        .response
        .research
        .unwrap();

    for text in ["plan", "api design", "ui design", "test strategy"] {
        h.llm.push_text(text);
    }
    let outcome = h
        .orchestrator
        .run_turn(RESEARCH_REQUEST, false, Some(research))
        .await
        .unwrap();

    assert!(!outcome.research_only);
    assert_eq!(outcome.stages.len(), 4);
    // Still only the original research search; no second pass
    assert_eq!(h.search.call_count(), 1);
}

#[tokio::test]
async fn context_entries_survive_untouched_in_requests() {
    let h = harness();
    h.llm.push_text("qa take");

    let context = vec![
        ContextEntry::new("Architect", "first"),
        ContextEntry::new("Backend", "second"),
    ];
    h.orchestrator
        .run_agent(AgentRequest::new(BUILD_REQUEST, "qa").with_context(context))
        .await
        .unwrap();

    let prompt = h.llm.last_prompt().unwrap();
    let first_at = prompt.find("Architect: first").unwrap();
    let second_at = prompt.find("Backend: second").unwrap();
    assert!(first_at < second_at);
}
