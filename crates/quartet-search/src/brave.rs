//! Brave Web Search API client

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::client::{SearchClient, SearchResult};
use crate::error::{Error, Result};

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://api.search.brave.com/res/v1";

/// Hard cap on requested result count
const MAX_COUNT: usize = 10;

/// Brave Search configuration
#[derive(Debug)]
pub struct BraveConfig {
    /// API key (redacted in Debug output)
    pub api_key: SecretString,
    /// Base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl BraveConfig {
    /// Create a new configuration with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("BRAVE_API_KEY").map_err(|_| Error::ApiKeyMissing)?;
        let base_url =
            std::env::var("BRAVE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url,
            timeout: Duration::from_secs(15),
        })
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct BraveResponse {
    #[serde(default)]
    web: Option<BraveWebResults>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResults {
    #[serde(default)]
    results: Vec<BraveWebResult>,
}

#[derive(Debug, Deserialize)]
struct BraveWebResult {
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
}

/// Brave Web Search API client
#[derive(Debug)]
pub struct BraveSearch {
    client: Client,
    config: BraveConfig,
}

impl BraveSearch {
    /// Create a new Brave search client
    pub fn new(config: BraveConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(BraveConfig::from_env()?)
    }
}

#[async_trait::async_trait]
impl SearchClient for BraveSearch {
    fn name(&self) -> &str {
        "brave"
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query must not be empty".to_string()));
        }
        let count = count.clamp(1, MAX_COUNT);

        let url = format!("{}/web/search", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-Subscription-Token", self.config.api_key.expose_secret())
            .header("Accept", "application/json")
            .query(&[("q", query), ("count", &count.to_string())])
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: BraveResponse = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        let results: Vec<SearchResult> = body
            .web
            .map(|w| w.results)
            .unwrap_or_default()
            .into_iter()
            .take(count)
            .map(|r| SearchResult::from_parts(r.title, r.url, r.description))
            .collect();

        debug!(query = %query, returned = results.len(), "brave search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_masks_key() {
        let config = BraveConfig::new("BSA-secret-key");
        assert!(!format!("{config:?}").contains("BSA-secret-key"));
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let client = BraveSearch::new(BraveConfig::new("k")).unwrap();
        let result = client.search("   ", 5).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "web": {
                "results": [
                    {"title": "Rust", "url": "https://rust-lang.org", "description": "A language"},
                    {"url": "https://example.com"}
                ]
            }
        }"#;
        let parsed: BraveResponse = serde_json::from_str(body).unwrap();
        let results = parsed.web.unwrap().results;
        assert_eq!(results.len(), 2);
        assert!(results[1].title.is_none());
    }

    #[test]
    fn test_response_parsing_no_web_block() {
        let parsed: BraveResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.web.is_none());
    }
}
