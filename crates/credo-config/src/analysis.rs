//! Document analysis limits.

use credo_core::enums::MAX_UNVERIFIABLE_CONFIDENCE;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_input_chars() -> usize {
    50_000
}

const fn default_max_concurrent_claims() -> usize {
    8
}

const fn default_unverifiable_confidence() -> u8 {
    50
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Longest accepted input, in characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// How many claim pipelines (retrieve + verify) may run at once.
    #[serde(default = "default_max_concurrent_claims")]
    pub max_concurrent_claims: usize,

    /// Confidence assigned to claims for which no evidence was found.
    /// Must not exceed [`MAX_UNVERIFIABLE_CONFIDENCE`].
    #[serde(default = "default_unverifiable_confidence")]
    pub unverifiable_confidence: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            max_concurrent_claims: default_max_concurrent_claims(),
            unverifiable_confidence: default_unverifiable_confidence(),
        }
    }
}

impl AnalysisConfig {
    /// Reject values the pipeline cannot honor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero input limit, zero
    /// concurrency, or an unverifiable confidence above the cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_input_chars".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.max_concurrent_claims == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_concurrent_claims".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.unverifiable_confidence > MAX_UNVERIFIABLE_CONFIDENCE {
            return Err(ConfigError::InvalidValue {
                field: "analysis.unverifiable_confidence".into(),
                reason: format!("must be at most {MAX_UNVERIFIABLE_CONFIDENCE}"),
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
        let config = AnalysisConfig::default();
        assert_eq!(config.max_input_chars, 50_000);
        assert_eq!(config.max_concurrent_claims, 8);
        assert_eq!(config.unverifiable_confidence, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unverifiable_confidence_is_capped() {
        let config = AnalysisConfig {
            unverifiable_confidence: 61,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "analysis.unverifiable_confidence"
        ));
    }

    #[test]
    fn zero_concurrency_rejected() {
        let config = AnalysisConfig {
            max_concurrent_claims: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
