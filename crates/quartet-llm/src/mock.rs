//! Mock LLM provider for testing
//!
//! Returns queued responses (or errors) in FIFO order and records every
//! request, so tests can assert on call counts and prompt contents.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::completion::{CompletionRequest, CompletionResponse, FinishReason};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

/// A mock LLM provider with a FIFO response queue and call counting.
pub struct MockProvider {
    responses: Mutex<VecDeque<Result<CompletionResponse>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider with an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Queue a full response.
    pub fn push_response(&self, response: CompletionResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(response));
    }

    /// Queue a plain text response with `finish_reason = Stop`.
    pub fn push_text(&self, content: impl Into<String>) {
        self.push_response(CompletionResponse {
            content: content.into(),
            usage: None,
            finish_reason: FinishReason::Stop,
            model: "mock-model".to_string(),
        });
    }

    /// Queue a response cut off by the output cap.
    pub fn push_truncated(&self, content: impl Into<String>) {
        self.push_response(CompletionResponse {
            content: content.into(),
            usage: None,
            finish_reason: FinishReason::MaxTokens,
            model: "mock-model".to_string(),
        });
    }

    /// Queue an error.
    pub fn push_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Number of `complete` calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Flattened prompt text of the most recent request.
    #[must_use]
    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(CompletionRequest::flattened_text)
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn available_models(&self) -> Vec<String> {
        vec!["mock-model".to_string()]
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let queued = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match queued {
            Some(result) => result,
            None => Ok(CompletionResponse {
                content: "mock response".to_string(),
                usage: None,
                finish_reason: FinishReason::Stop,
                model: "mock-model".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    #[tokio::test]
    async fn test_queue_order_and_counting() {
        let mock = MockProvider::new();
        mock.push_text("first");
        mock.push_truncated("second");

        let r1 = mock
            .complete(CompletionRequest::new("m").with_message(Message::user("a")))
            .await
            .unwrap();
        let r2 = mock
            .complete(CompletionRequest::new("m").with_message(Message::user("b")))
            .await
            .unwrap();

        assert_eq!(r1.content, "first");
        assert_eq!(r1.finish_reason, FinishReason::Stop);
        assert_eq!(r2.content, "second");
        assert_eq!(r2.finish_reason, FinishReason::MaxTokens);
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.last_prompt().unwrap(), "b");
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockProvider::new();
        mock.push_error(Error::Api("boom".to_string()));

        let result = mock.complete(CompletionRequest::new("m")).await;
        assert!(matches!(result, Err(Error::Api(_))));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_default_response_when_queue_empty() {
        let mock = MockProvider::new();
        let r = mock.complete(CompletionRequest::new("m")).await.unwrap();
        assert_eq!(r.content, "mock response");
    }
}
