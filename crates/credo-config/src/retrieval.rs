//! Evidence retrieval tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_timeout_ms() -> u64 {
    5_000
}

const fn default_similarity_threshold() -> f64 {
    0.35
}

const fn default_max_candidates_per_source() -> usize {
    5
}

const fn default_context_sentences() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetrievalConfig {
    /// Per-source call timeout, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Keyword overlap a candidate must exceed to count as evidence, in `[0, 1)`.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Candidates requested from each source per claim.
    #[serde(default = "default_max_candidates_per_source")]
    pub max_candidates_per_source: usize,

    /// Preceding sentences consulted to resolve pronoun-led claims.
    #[serde(default = "default_context_sentences")]
    pub context_sentences: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            similarity_threshold: default_similarity_threshold(),
            max_candidates_per_source: default_max_candidates_per_source(),
            context_sentences: default_context_sentences(),
        }
    }
}

impl RetrievalConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero timeout, a threshold
    /// outside `[0, 1)`, or zero candidates per source.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if !(0.0..1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.similarity_threshold".into(),
                reason: format!("{} is outside [0, 1)", self.similarity_threshold),
            });
        }
        if self.max_candidates_per_source == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retrieval.max_candidates_per_source".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = RetrievalConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!((config.similarity_threshold - 0.35).abs() < f64::EPSILON);
        assert_eq!(config.max_candidates_per_source, 5);
        assert_eq!(config.context_sentences, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let config = RetrievalConfig {
            similarity_threshold: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = RetrievalConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
