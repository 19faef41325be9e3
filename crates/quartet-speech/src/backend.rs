//! TTS backend trait

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::voice::VoiceProfile;

/// Trait for text-to-speech backends
#[async_trait]
pub trait TtsBackend: Send + Sync {
    /// Get the backend name
    fn name(&self) -> &str;

    /// Whether the backend has what it needs to synthesize (e.g. an API key)
    fn is_available(&self) -> bool {
        true
    }

    /// Synthesize speech for the given text.
    ///
    /// Returns encoded audio bytes. Failures must not propagate as panics;
    /// callers treat any error as "no audio".
    async fn synthesize(&self, text: &str, profile: &VoiceProfile) -> Result<Bytes>;
}
