//! Model tier selection
//!
//! The orchestrator runs against one of two tiers: a fast, cheap model for
//! demo mode and a high-quality model for full responses. The per-tier
//! constants here drive the output-token budgeting in quartet-core.

use serde::{Deserialize, Serialize};

/// Model tier for speed/quality trade-off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Fast, cheap model for demo mode
    Fast,
    /// High-quality model for full responses
    Quality,
}

impl ModelTier {
    /// Tier used for the given demo-mode flag
    #[must_use]
    pub fn for_demo_mode(demo_mode: bool) -> Self {
        if demo_mode {
            Self::Fast
        } else {
            Self::Quality
        }
    }

    /// Default model id for this tier
    #[must_use]
    pub fn model_id(&self) -> &'static str {
        match self {
            Self::Fast => "claude-haiku-4-5-20251001",
            Self::Quality => "claude-sonnet-4-5-20250929",
        }
    }

    /// Context ceiling the budgeter assumes for this tier, in tokens.
    ///
    /// Deliberately conservative for the fast tier: demo mode trades depth
    /// for latency, so prompts are kept small too.
    #[must_use]
    pub fn context_ceiling(&self) -> u32 {
        match self {
            Self::Fast => 16_384,
            Self::Quality => 200_000,
        }
    }

    /// Maximum output tokens ever requested at this tier
    #[must_use]
    pub fn output_ceiling(&self) -> u32 {
        match self {
            Self::Fast => 1_024,
            Self::Quality => 4_096,
        }
    }

    /// Guaranteed minimum output tokens requested at this tier
    #[must_use]
    pub fn output_floor(&self) -> u32 {
        match self {
            Self::Fast => 256,
            Self::Quality => 512,
        }
    }

    /// Prompt size above which a "complex request" warning is prepared
    #[must_use]
    pub fn prompt_warning_threshold(&self) -> u32 {
        match self {
            Self::Fast => 3_000,
            Self::Quality => 8_000,
        }
    }
}
