//! Error types for quartet-search

use thiserror::Error;

/// Search error type
#[derive(Debug, Error)]
pub enum Error {
    /// API key missing
    #[error("search api key not configured")]
    ApiKeyMissing,

    /// API error
    #[error("search api error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error detail
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Invalid response
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid input (empty query)
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
