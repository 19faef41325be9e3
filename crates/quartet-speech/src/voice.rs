//! Voice profiles

use serde::{Deserialize, Serialize};

/// Voice settings applied to a synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Provider voice id
    pub voice_id: String,
    /// Voice stability, 0.0-1.0
    pub stability: f32,
    /// Similarity boost, 0.0-1.0
    pub similarity_boost: f32,
}

impl VoiceProfile {
    /// Create a profile with default settings for a voice id.
    #[must_use]
    pub fn new(voice_id: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            stability: 0.5,
            similarity_boost: 0.75,
        }
    }

    /// Set stability
    #[must_use]
    pub fn with_stability(mut self, stability: f32) -> Self {
        self.stability = stability;
        self
    }

    /// Set similarity boost
    #[must_use]
    pub fn with_similarity_boost(mut self, similarity_boost: f32) -> Self {
        self.similarity_boost = similarity_boost;
        self
    }
}

impl Default for VoiceProfile {
    fn default() -> Self {
        // Rachel
        Self::new("21m00Tcm4TlvDq8ikWAM")
    }
}
