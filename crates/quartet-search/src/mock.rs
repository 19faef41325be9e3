//! Mock search client for testing

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::client::{SearchClient, SearchResult};
use crate::error::{Error, Result};

/// A mock search client with a FIFO result queue and call counting.
///
/// An empty queue yields an empty result list, mirroring an engine that
/// found nothing.
pub struct MockSearch {
    responses: Mutex<VecDeque<Result<Vec<SearchResult>>>>,
    calls: AtomicUsize,
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearch {
    /// Create a new mock with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a successful result set.
    pub fn push_results(&self, results: Vec<SearchResult>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(results));
    }

    /// Queue `n` generated results titled `result-1..=n`.
    pub fn push_generated(&self, n: usize) {
        let results = (1..=n)
            .map(|i| SearchResult {
                title: format!("result-{i}"),
                url: format!("https://example.com/{i}"),
                description: format!("Description of result {i}"),
            })
            .collect();
        self.push_results(results);
    }

    /// Queue a failure.
    pub fn push_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Number of `search` calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SearchClient for MockSearch {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, _query: &str, _count: usize) -> Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generated_results_and_counting() {
        let mock = MockSearch::new();
        mock.push_generated(3);

        let results = mock.search("anything", 5).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "result-1");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_queue_returns_no_results() {
        let mock = MockSearch::new();
        assert!(mock.search("q", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockSearch::new();
        mock.push_error(Error::Network("down".to_string()));
        assert!(mock.search("q", 5).await.is_err());
    }
}
