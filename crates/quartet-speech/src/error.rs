//! Error types for quartet-speech

use thiserror::Error;

/// TTS error type
#[derive(Debug, Error)]
pub enum Error {
    /// API key not found
    #[error("api key not found")]
    ApiKeyNotFound,

    /// Empty text
    #[error("empty text")]
    EmptyText,

    /// API error
    #[error("api error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error detail
        message: String,
    },

    /// Request error
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
