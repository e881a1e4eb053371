//! # credo-extract
//!
//! Claim extraction for Credo.
//!
//! Splits a document into sentences, sentences into `;`-separated clauses,
//! and keeps the clauses that carry a checkable assertion: a statistic, an
//! attributed quotation, or a named entity with a predicate. Opinions,
//! rhetorical questions and connective filler are dropped.
//!
//! Claims come back in source order with non-overlapping byte spans and ids
//! `c1`, `c2`, ...

mod classify;
mod error;
mod segment;

pub use classify::classify;
pub use error::ExtractError;
pub use segment::{clauses, context_before, sentences};

use credo_core::ClaimSkeleton;

/// Turns raw text into claim skeletons.
#[derive(Debug, Clone, Copy)]
pub struct ClaimExtractor {
    max_input_chars: usize,
}

impl ClaimExtractor {
    #[must_use]
    pub const fn new(max_input_chars: usize) -> Self {
        Self { max_input_chars }
    }

    #[must_use]
    pub const fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    /// Reject input the pipeline will not analyze.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::EmptyInput`] for blank input and
    /// [`ExtractError::InputTooLarge`] when the text has more characters than
    /// the configured maximum.
    pub fn validate(&self, text: &str) -> Result<(), ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }
        let chars = text.chars().count();
        if chars > self.max_input_chars {
            return Err(ExtractError::InputTooLarge {
                chars,
                max: self.max_input_chars,
            });
        }
        Ok(())
    }

    /// Extract claim skeletons from `text`.
    ///
    /// An input with no checkable assertion yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] when the input fails [`Self::validate`].
    pub fn extract(&self, text: &str) -> Result<Vec<ClaimSkeleton>, ExtractError> {
        self.validate(text)?;

        let mut claims = Vec::new();
        for sentence in sentences(text) {
            for clause in clauses(text, sentence) {
                let clause_text = clause.slice(text)?;
                let Some(kind) = classify(clause_text) else {
                    tracing::trace!(clause = clause_text, "dropped non-checkable clause");
                    continue;
                };
                let id = format!("c{}", claims.len() + 1);
                claims.push(ClaimSkeleton::new(id, text, clause, kind)?);
            }
        }

        tracing::debug!(claims = claims.len(), "extracted claims");
        Ok(claims)
    }
}

impl Default for ClaimExtractor {
    fn default() -> Self {
        Self::new(50_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::ClaimKind;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "According to a 2023 study published in the Journal of AI Research, \
        large language models achieve 98.7% accuracy in factual reasoning tasks. \
        Dr. Sarah Mitchell from Stanford University notes that 'AI systems have surpassed \
        human-level performance in knowledge retrieval.' Isn't that remarkable? \
        The World Health Organization reported that AI-assisted diagnostics reduced \
        misdiagnosis rates by 45%. Clinical trials conducted across 12 countries.";

    #[test]
    fn extracts_sample_claims_in_order() {
        let claims = ClaimExtractor::default().extract(SAMPLE).unwrap();
        let kinds: Vec<ClaimKind> = claims.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ClaimKind::Statistic,
                ClaimKind::Quotation,
                ClaimKind::Statistic,
                ClaimKind::Statistic
            ]
        );
        let ids: Vec<&str> = claims.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn spans_match_text_and_do_not_overlap() {
        let claims = ClaimExtractor::default().extract(SAMPLE).unwrap();
        for claim in &claims {
            assert_eq!(&SAMPLE[claim.position.start..claim.position.end], claim.text);
        }
        for pair in claims.windows(2) {
            assert!(pair[0].position.end <= pair[1].position.start);
            assert!(!pair[0].position.overlaps(pair[1].position));
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        let extractor = ClaimExtractor::default();
        assert!(matches!(extractor.extract(""), Err(ExtractError::EmptyInput)));
        assert!(matches!(
            extractor.extract(" \n\t "),
            Err(ExtractError::EmptyInput)
        ));
    }

    #[test]
    fn oversized_input_is_rejected() {
        let extractor = ClaimExtractor::new(10);
        let err = extractor.extract("This sentence is far too long.").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InputTooLarge { chars: 30, max: 10 }
        ));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let extractor = ClaimExtractor::new(6);
        assert!(extractor.validate("Zürich").is_ok());
    }

    #[test]
    fn text_without_claims_yields_empty_vec() {
        let claims = ClaimExtractor::default()
            .extract("Hello there. What a lovely day? I think so.")
            .unwrap();
        assert!(claims.is_empty());
    }

    #[test]
    fn semicolon_clauses_become_separate_claims() {
        let claims = ClaimExtractor::default()
            .extract("WHO reported a 45% drop in cases; the CDC reported a 30% drop in cases.")
            .unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].text, "WHO reported a 45% drop in cases");
    }
}
