//! Evidence records.
//!
//! Knowledge sources return [`EvidenceCandidate`]s. The retriever picks at
//! most one per claim and wraps it in an [`EvidenceMatch`], which carries the
//! text the verifier scores against. Only the [`Evidence`] part is kept on the
//! final claim.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Credibility;

/// The source a claim was checked against. Owned by value by its claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Evidence {
    pub source_name: String,
    pub source_url: String,
    pub credibility: Credibility,
}

/// A single hit returned by a knowledge source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EvidenceCandidate {
    /// Publisher shown to readers (e.g. `Wikipedia`, a journal, a fact-checker).
    pub source_name: String,
    /// Canonical URL of the document behind the hit.
    pub source_url: String,
    /// Title of the document, article, or reviewed claim.
    pub title: String,
    /// Text the claim is compared against.
    pub excerpt: String,
    pub credibility: Credibility,
    /// Publication or review date, when the source reports one.
    pub published_at: Option<DateTime<Utc>>,
    /// Fact-checker rating such as "False" or "Mostly true", when present.
    pub rating: Option<String>,
}

impl EvidenceCandidate {
    /// Title and excerpt joined, used for similarity and agreement scoring.
    #[must_use]
    pub fn content(&self) -> String {
        if self.title.is_empty() {
            self.excerpt.clone()
        } else if self.excerpt.is_empty() {
            self.title.clone()
        } else {
            format!("{}. {}", self.title, self.excerpt)
        }
    }

    /// Detach the evidence record kept on the claim.
    #[must_use]
    pub fn to_evidence(&self) -> Evidence {
        Evidence {
            source_name: self.source_name.clone(),
            source_url: self.source_url.clone(),
            credibility: self.credibility,
        }
    }
}

/// The candidate the retriever selected for a claim.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceMatch {
    pub candidate: EvidenceCandidate,
    /// Keyword overlap between claim and candidate, in `[0, 1]`.
    pub similarity: f64,
}

impl EvidenceMatch {
    #[must_use]
    pub const fn credibility(&self) -> Credibility {
        self.candidate.credibility
    }

    #[must_use]
    pub fn evidence(&self) -> Evidence {
        self.candidate.to_evidence()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, excerpt: &str) -> EvidenceCandidate {
        EvidenceCandidate {
            source_name: "corpus".into(),
            source_url: "https://example.org/a".into(),
            title: title.into(),
            excerpt: excerpt.into(),
            credibility: Credibility::Medium,
            published_at: None,
            rating: None,
        }
    }

    #[test]
    fn content_joins_title_and_excerpt() {
        assert_eq!(candidate("Title", "Body").content(), "Title. Body");
        assert_eq!(candidate("", "Body").content(), "Body");
        assert_eq!(candidate("Title", "").content(), "Title");
    }

    #[test]
    fn to_evidence_keeps_source_fields() {
        let evidence = candidate("t", "e").to_evidence();
        assert_eq!(evidence.source_name, "corpus");
        assert_eq!(evidence.source_url, "https://example.org/a");
        assert_eq!(evidence.credibility, Credibility::Medium);
    }
}
