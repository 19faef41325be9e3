//! Error types for quartet-core
//!
//! Only two failures are fatal to a turn: invalid input and a failed model
//! call. History, research, and speech problems degrade inside the
//! orchestrator and never surface here.

use thiserror::Error;

use crate::role::ACCEPTED_ROLES;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or unrecognized input; maps to a client error
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The model call failed; fatal to the turn, maps to a server error
    #[error("model invocation failed: {0}")]
    ModelInvocation(#[from] quartet_llm::Error),
}

impl Error {
    /// Invalid-role error listing the accepted roles.
    #[must_use]
    pub fn unknown_role(given: &str) -> Self {
        Self::InvalidInput(format!(
            "unknown agent role '{}' (accepted: {})",
            given,
            ACCEPTED_ROLES.join(", ")
        ))
    }

    /// Whether this error maps to a client (400-class) response.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
