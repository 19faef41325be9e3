//! Search client trait and result types

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Placeholder title for results missing one
const FALLBACK_TITLE: &str = "Untitled result";

/// Placeholder description for results missing one
const FALLBACK_DESCRIPTION: &str = "No description available";

/// A single web search result.
///
/// All fields are plain text sourced externally; no validation beyond
/// presence checks with placeholder fallbacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result URL
    pub url: String,
    /// Result snippet/description
    pub description: String,
}

impl SearchResult {
    /// Build a result, substituting placeholders for missing fields.
    #[must_use]
    pub fn from_parts(
        title: Option<String>,
        url: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            title: non_empty_or(title, FALLBACK_TITLE),
            url: url.unwrap_or_default(),
            description: non_empty_or(description, FALLBACK_DESCRIPTION),
        }
    }
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => fallback.to_string(),
    }
}

/// Trait for web-search clients
#[async_trait::async_trait]
pub trait SearchClient: Send + Sync {
    /// Get the client name
    fn name(&self) -> &str;

    /// Search the web, returning up to `count` results.
    ///
    /// May return an empty list; errors must be catchable without crashing
    /// the caller.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>>;
}
