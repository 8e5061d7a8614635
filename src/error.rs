//! Error types for the chat client.

use thiserror::Error;

/// Chat client error type.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid backend URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file or preference storage failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend returned a non-2xx response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },
}

/// Result type alias for chat client operations.
pub type Result<T> = std::result::Result<T, Error>;
