//! Research gate
//!
//! A keyword heuristic decides whether a request is a *question about
//! approach* (trigger research) or a *direct build request* (skip it). This
//! enables the three-step workflow: plain build request → no research;
//! explicit question → research-only response; explicit follow-up carrying
//! the research → implementation informed by it.

use serde::{Deserialize, Serialize};

use quartet_search::SearchResult;

use crate::summarize::summarize;

/// Question-pattern phrases that trigger the research gate.
///
/// This is a fixed substring table, not a semantic classifier; tests verify
/// exact membership.
pub const RESEARCH_PATTERNS: &[&str] = &[
    "what is the best",
    "what's the best",
    "what are the best",
    "how should i",
    "what should i use",
    "which is better",
    "compare",
    "pros and cons",
    "recommend",
    "alternatives to",
    "what are the options",
    "research",
];

/// Maximum results kept in `all_results`
const MAX_KEPT_RESULTS: usize = 5;

/// Character bound on the flattened top-result summary
const SUMMARY_MAX_LEN: usize = 600;

/// Whether the user's request should trigger a research pass.
///
/// Case-insensitive substring match against [`RESEARCH_PATTERNS`]. Pure and
/// deterministic.
#[must_use]
pub fn should_research(user_text: &str) -> bool {
    let lower = user_text.to_lowercase();
    RESEARCH_PATTERNS.iter().any(|p| lower.contains(p))
}

/// Web research attached to a turn.
///
/// Produced at most once per turn and immutable afterwards; a caller may
/// thread it into exactly one follow-up turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchData {
    /// The query that was searched (the raw transcript)
    pub query: String,
    /// The top result, kept alone for display
    pub results: Vec<SearchResult>,
    /// Up to five results, metadata for the result list
    pub all_results: Vec<SearchResult>,
    /// How many results the search returned in total
    pub total_available: usize,
    /// Flattened text of the top result, sized for prompt inclusion
    pub summary: String,
}

impl ResearchData {
    /// Shape raw search results into research data.
    ///
    /// Returns `None` when there are no results; an empty search never
    /// produces a research block.
    #[must_use]
    pub fn from_results(query: &str, results: Vec<SearchResult>) -> Option<Self> {
        let top = results.first()?.clone();
        let total_available = results.len();
        let summary = summarize(
            &format!("{}: {} ({})", top.title, top.description, top.url),
            SUMMARY_MAX_LEN,
        );

        Some(Self {
            query: query.to_string(),
            results: vec![top],
            all_results: results.into_iter().take(MAX_KEPT_RESULTS).collect(),
            total_available,
            summary,
        })
    }

    /// The message returned when the research gate short-circuits a turn.
    ///
    /// The caller must make an explicit second request to continue into
    /// implementation; this message says so.
    #[must_use]
    pub fn short_circuit_message(&self) -> String {
        format!(
            "I looked into \"{}\" before designing anything.\n\nTop finding: {}\n\n{} result(s) available. When you're ready, ask me to apply this research and build.",
            self.query, self.summary, self.total_available
        )
    }

    /// Labeled findings block for prompt inclusion, bounded in size.
    #[must_use]
    pub fn prompt_block(&self) -> String {
        format!(
            "Research findings for \"{}\":\n{}",
            self.query,
            summarize(&self.summary, SUMMARY_MAX_LEN)
        )
    }
}
