//! ElevenLabs TTS backend

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::backend::TtsBackend;
use crate::error::{Error, Result};
use crate::voice::VoiceProfile;

/// Default API endpoint
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Default synthesis model
const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs configuration
#[derive(Debug)]
pub struct ElevenLabsConfig {
    /// API key, when configured (redacted in Debug output)
    pub api_key: Option<SecretString>,
    /// Synthesis model id
    pub model_id: String,
    /// Base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ElevenLabsConfig {
    /// Create configuration from environment variables.
    ///
    /// A missing key is not an error here; the backend reports itself
    /// unavailable and every synthesize call degrades instead.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("ELEVENLABS_API_KEY").ok().map(SecretString::from),
            model_id: std::env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
            base_url: std::env::var("ELEVENLABS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// ElevenLabs TTS backend
#[derive(Debug)]
pub struct ElevenLabsBackend {
    client: Client,
    config: ElevenLabsConfig,
}

impl ElevenLabsBackend {
    /// Create a new backend
    pub fn new(config: ElevenLabsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ElevenLabsConfig::from_env())
    }

    fn api_key(&self) -> Result<&SecretString> {
        self.config.api_key.as_ref().ok_or(Error::ApiKeyNotFound)
    }
}

#[async_trait]
impl TtsBackend for ElevenLabsBackend {
    fn name(&self) -> &str {
        "elevenlabs"
    }

    fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    #[instrument(skip(self, text), fields(voice = %profile.voice_id, chars = text.len()))]
    async fn synthesize(&self, text: &str, profile: &VoiceProfile) -> Result<Bytes> {
        if text.trim().is_empty() {
            return Err(Error::EmptyText);
        }
        let api_key = self.api_key()?;

        let url = format!(
            "{}/text-to-speech/{}",
            self.config.base_url, profile.voice_id
        );
        let body = TtsRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: profile.stability,
                similarity_boost: profile.similarity_boost,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "speech synthesized");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_without_key() {
        let backend = ElevenLabsBackend::new(ElevenLabsConfig::default()).unwrap();
        assert!(!backend.is_available());
    }

    #[test]
    fn test_available_with_key() {
        let config = ElevenLabsConfig::default().with_api_key("xi-key");
        let backend = ElevenLabsBackend::new(config).unwrap();
        assert!(backend.is_available());
    }

    #[test]
    fn test_config_debug_masks_key() {
        let config = ElevenLabsConfig::default().with_api_key("xi-secret");
        assert!(!format!("{config:?}").contains("xi-secret"));
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let config = ElevenLabsConfig::default().with_api_key("xi-key");
        let backend = ElevenLabsBackend::new(config).unwrap();
        let result = backend.synthesize("  ", &VoiceProfile::default()).await;
        assert!(matches!(result, Err(Error::EmptyText)));
    }

    #[tokio::test]
    async fn test_missing_key_is_catchable() {
        let backend = ElevenLabsBackend::new(ElevenLabsConfig::default()).unwrap();
        let result = backend.synthesize("hello", &VoiceProfile::default()).await;
        assert!(matches!(result, Err(Error::ApiKeyNotFound)));
    }
}
