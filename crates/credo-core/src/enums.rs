//! Status, credibility, risk and claim-kind enums for Credo.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The verifier and the aggregator share [`VERIFIED_THRESHOLD`] and
//! [`REVIEW_THRESHOLD`] so a score of 70 means the same thing for one claim
//! and for a whole document.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest score (inclusive) that counts as verified / safe.
pub const VERIFIED_THRESHOLD: u8 = 70;

/// Lowest score (inclusive) that counts as needing review rather than unreliable / high risk.
pub const REVIEW_THRESHOLD: u8 = 40;

/// Highest confidence a claim without evidence may carry.
pub const MAX_UNVERIFIABLE_CONFIDENCE: u8 = 60;

// ---------------------------------------------------------------------------
// ClaimStatus
// ---------------------------------------------------------------------------

/// Terminal verification status of a claim.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Verified,
    NeedsReview,
    Unreliable,
}

impl ClaimStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Verified, Self::NeedsReview, Self::Unreliable];

    /// Weight of this status in the trust score.
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Verified => 1.0,
            Self::NeedsReview => 0.5,
            Self::Unreliable => 0.0,
        }
    }

    /// Whether claims with this status carry a remediation suggestion.
    #[must_use]
    pub const fn wants_suggestion(self) -> bool {
        !matches!(self, Self::Verified)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::NeedsReview => "needs_review",
            Self::Unreliable => "unreliable",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Credibility
// ---------------------------------------------------------------------------

/// Coarse trust ranking of an evidence source.
///
/// Ordering is ascending: `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Credibility {
    Low,
    Medium,
    High,
}

impl Credibility {
    /// Whether evidence of this tier may back a `Verified` verdict.
    #[must_use]
    pub const fn can_verify(self) -> bool {
        matches!(self, Self::High | Self::Medium)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Credibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Banding of a document trust score.
///
/// ```text
/// score >= 70        → safe
/// 40 <= score < 70   → review
/// score < 40         → high
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Safe,
    Review,
    High,
}

impl RiskLevel {
    /// Band a trust score. Total over `u8`; scores above 100 count as safe.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= VERIFIED_THRESHOLD {
            Self::Safe
        } else if score >= REVIEW_THRESHOLD {
            Self::Review
        } else {
            Self::High
        }
    }

    /// Human label used in summaries and table output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "safe to use",
            Self::Review => "needs review",
            Self::High => "high risk",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Review => "review",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClaimKind
// ---------------------------------------------------------------------------

/// Why the extractor considered a span checkable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    /// A figure (percentage, count, amount) tied to a subject or source.
    Statistic,
    /// A quotation attributed to a named speaker.
    Quotation,
    /// A named entity with a checkable predicate.
    EntityAssertion,
}

impl ClaimKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Statistic => "statistic",
            Self::Quotation => "quotation",
            Self::EntityAssertion => "entity_assertion",
        }
    }
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
