//! Extraction error types.

use credo_core::CoreError;
use thiserror::Error;

/// Input-validation failures. Raised before any claim work begins.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The input is empty or whitespace only.
    #[error("input is empty")]
    EmptyInput,

    /// The input exceeds the configured maximum length.
    #[error("input is {chars} characters, maximum is {max}")]
    InputTooLarge { chars: usize, max: usize },

    /// A computed span did not fit the document.
    #[error(transparent)]
    Core(#[from] CoreError),
}
