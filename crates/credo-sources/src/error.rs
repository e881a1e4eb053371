//! Knowledge source error types.

use thiserror::Error;

/// Errors a knowledge source can raise for one query.
///
/// The retriever never propagates these: each one is logged and the source is
/// treated as having returned no evidence.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the source.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The source returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The call did not finish within the retrieval timeout.
    #[error("timed out after {after_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds.
        after_ms: u64,
    },

    /// The source is enabled but lacks a required setting (e.g. an API key).
    #[error("source {source_name} is not configured: {reason}")]
    NotConfigured {
        /// Source identifier.
        source_name: String,
        /// What is missing.
        reason: String,
    },

    /// Failed to parse a source response or corpus file.
    #[error("parse error: {0}")]
    Parse(String),

    /// Failed to read a corpus file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
