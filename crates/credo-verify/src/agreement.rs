//! Agreement between a claim and one piece of evidence.

use std::fmt;

use credo_core::{ClaimSkeleton, EvidenceCandidate};

use crate::error::VerifyError;

/// A specific way the evidence fails to back the claim.
///
/// Variants are declared from most to least severe; [`Agreement::primary`]
/// relies on that order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Discrepancy {
    /// A fact-checker rated the claim false or misleading.
    ContradictedBySource { rating: String },
    /// The claim states a figure the evidence contradicts with another one.
    FigureMismatch { claimed: String, found: String },
    /// A quotation whose speaker or wording the evidence does not carry.
    UnverifiableAttribution { speaker: Option<String> },
    /// A named entity the evidence never mentions.
    UnknownEntity { entity: String },
    /// The claim states a figure the evidence does not mention at all.
    UnconfirmedFigure { claimed: String },
    /// Claim keywords the evidence leaves out, in claim order.
    MissingTerms { terms: Vec<String> },
    /// The evidence shares few of the claim's keywords.
    WeakOverlap { overlap: u8 },
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContradictedBySource { rating } => write!(f, "rated \"{rating}\" by a fact-checker"),
            Self::FigureMismatch { claimed, found } => {
                write!(f, "figure mismatch ({claimed} vs {found})")
            }
            Self::UnverifiableAttribution { speaker: Some(speaker) } => {
                write!(f, "unverifiable attribution to {speaker}")
            }
            Self::UnverifiableAttribution { speaker: None } => f.write_str("unverifiable attribution"),
            Self::UnknownEntity { entity } => write!(f, "unknown entity {entity}"),
            Self::UnconfirmedFigure { claimed } => write!(f, "unconfirmed figure {claimed}"),
            Self::MissingTerms { terms } => write!(f, "missing terms ({})", terms.join(", ")),
            Self::WeakOverlap { overlap } => write!(f, "weak overlap ({overlap}/100)"),
        }
    }
}

/// Score in `[0, 100]` plus the discrepancies behind any deductions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agreement {
    score: u8,
    discrepancies: Vec<Discrepancy>,
}

impl Agreement {
    /// Build an agreement. The score is clamped to 100 and discrepancies are
    /// kept most severe first.
    #[must_use]
    pub fn new(score: u8, mut discrepancies: Vec<Discrepancy>) -> Self {
        discrepancies.sort();
        discrepancies.dedup();
        Self {
            score: score.min(100),
            discrepancies,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    #[must_use]
    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.discrepancies
    }

    /// The most severe discrepancy, which the rationale names.
    #[must_use]
    pub fn primary(&self) -> Option<&Discrepancy> {
        self.discrepancies.first()
    }
}

/// Scores how well evidence supports a claim.
///
/// Implementations must be pure: the same claim and evidence always produce
/// the same agreement.
pub trait AgreementScorer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`VerifyError`] when the pair cannot be scored. The verifier
    /// turns this into a degraded "verification failed" verdict.
    fn score(
        &self,
        claim: &ClaimSkeleton,
        evidence: &EvidenceCandidate,
    ) -> Result<Agreement, VerifyError>;
}
