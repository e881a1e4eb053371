//! Analysis error types.

use credo_config::ConfigError;
use credo_core::CoreError;
use credo_extract::ExtractError;
use credo_sources::SourceError;
use thiserror::Error;

/// Errors surfaced by [`crate::Analyzer`].
///
/// Only input validation, cancellation and setup problems abort an analysis.
/// Source outages and scoring failures are absorbed claim by claim.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("input is empty")]
    EmptyInput,

    #[error("input is {chars} characters, maximum is {max}")]
    InputTooLarge { chars: usize, max: usize },

    #[error("analysis was cancelled")]
    Cancelled,

    /// The blocking entry point could not start an async runtime.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A knowledge source could not be set up.
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<ExtractError> for AnalyzeError {
    fn from(error: ExtractError) -> Self {
        match error {
            ExtractError::EmptyInput => Self::EmptyInput,
            ExtractError::InputTooLarge { chars, max } => Self::InputTooLarge { chars, max },
            ExtractError::Core(e) => Self::Core(e),
        }
    }
}
