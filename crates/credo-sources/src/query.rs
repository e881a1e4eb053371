//! Evidence queries built from a claim and its surrounding text.

use credo_core::text::{entities, keywords, normalize};

/// Openers that refer back to something named earlier in the document.
const ANAPHORIC_OPENERS: &[&str] = &[
    "it", "its", "they", "their", "this", "these", "that", "those", "he", "she", "his", "her",
    "the study", "the report", "the survey", "the paper", "the organization", "the company",
    "the researchers", "the team",
];

/// Most terms sent to a search API.
const MAX_SEARCH_TERMS: usize = 12;

/// What a knowledge source is asked about one claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceQuery {
    /// Id of the claim, for logging.
    pub claim_id: String,
    /// Exact claim text.
    pub claim: String,
    /// Entities named by the claim, plus entities borrowed from context when
    /// the claim opens with a pronoun.
    pub entities: Vec<String>,
    /// Significant keywords of the claim.
    pub keywords: Vec<String>,
    /// Candidates requested per source.
    pub limit: usize,
}

impl EvidenceQuery {
    /// Build a query for `claim`, resolving a leading pronoun against `context`.
    #[must_use]
    pub fn new(
        claim_id: impl Into<String>,
        claim: impl Into<String>,
        context: &str,
        limit: usize,
    ) -> Self {
        let claim = claim.into();
        let mut named = entities(&claim);
        if opens_with_reference(&claim) {
            for borrowed in entities(context) {
                if !named.contains(&borrowed) {
                    named.push(borrowed);
                }
            }
        }

        Self {
            claim_id: claim_id.into(),
            keywords: keywords(&claim),
            claim,
            entities: named,
            limit: limit.max(1),
        }
    }

    /// Free-text query for search APIs: entities first, then keywords.
    #[must_use]
    pub fn search_text(&self) -> String {
        let mut terms: Vec<String> = Vec::new();
        for entity in &self.entities {
            terms.push(entity.clone());
        }
        let entity_words = normalize(&self.entities.join(" "));
        let entity_words: Vec<&str> = entity_words.split_whitespace().collect();
        for keyword in &self.keywords {
            if !entity_words.contains(&keyword.as_str()) {
                terms.push(keyword.clone());
            }
        }
        terms.truncate(MAX_SEARCH_TERMS);
        terms.join(" ")
    }

    /// Claim text with borrowed entities appended, used for similarity scoring.
    #[must_use]
    pub fn scoring_text(&self) -> String {
        let borrowed: Vec<&str> = self
            .entities
            .iter()
            .filter(|e| !self.claim.contains(e.as_str()))
            .map(String::as_str)
            .collect();
        if borrowed.is_empty() {
            self.claim.clone()
        } else {
            format!("{} {}", self.claim, borrowed.join(" "))
        }
    }
}

fn opens_with_reference(claim: &str) -> bool {
    let opening = normalize(claim);
    ANAPHORIC_OPENERS.iter().any(|opener| {
        opening
            .strip_prefix(opener)
            .is_some_and(|rest| rest.starts_with(' '))
    })
}
