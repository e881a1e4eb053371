//! Cross-cutting error types for Credo.
//!
//! Domain-specific errors (e.g., `SourceError`, `ExtractError`) are defined in
//! their respective crates. They converge in `credo-engine` and the CLI.

use thiserror::Error;

/// Errors that can be raised by any Credo crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A span does not describe a valid range of the document.
    #[error("Invalid span {start}..{end} for document of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
