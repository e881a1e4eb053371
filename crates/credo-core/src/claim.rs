//! Claims: the skeleton the extractor produces and the resolved claim the
//! verifier hands to the aggregator.
//!
//! A [`ClaimSkeleton`] becomes a [`Claim`] only through
//! [`ClaimSkeleton::resolve`], which consumes the skeleton and sets every
//! verification field from one [`Verdict`]. There is no way to build a
//! partially verified claim.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ClaimKind, ClaimStatus};
use crate::errors::CoreError;
use crate::evidence::Evidence;

/// Byte range `[start, end)` into the analyzed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Build a span, rejecting inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `start > end`.
    pub fn new(start: usize, end: usize) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "span start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Whether two spans share at least one byte.
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Borrow the spanned text from `document`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSpan`] if the range is out of bounds or does
    /// not fall on UTF-8 character boundaries.
    pub fn slice(self, document: &str) -> Result<&str, CoreError> {
        document
            .get(self.start..self.end)
            .ok_or(CoreError::InvalidSpan {
                start: self.start,
                end: self.end,
                len: document.len(),
            })
    }
}

/// An extracted claim that has not been verified yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClaimSkeleton {
    pub id: String,
    pub text: String,
    pub position: Span,
    pub kind: ClaimKind,
}

impl ClaimSkeleton {
    /// Cut a skeleton out of `document` at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSpan`] if `position` is not a valid slice of `document`.
    pub fn new(
        id: impl Into<String>,
        document: &str,
        position: Span,
        kind: ClaimKind,
    ) -> Result<Self, CoreError> {
        let text = position.slice(document)?.to_string();
        Ok(Self {
            id: id.into(),
            text,
            position,
            kind,
        })
    }

    /// Populate every verification field at once.
    #[must_use]
    pub fn resolve(self, verdict: Verdict) -> Claim {
        let Verdict {
            status,
            confidence,
            rationale,
            evidence,
            suggestion,
        } = verdict;

        Claim {
            id: self.id,
            text: self.text,
            position: self.position,
            kind: self.kind,
            status,
            confidence,
            rationale,
            evidence,
            suggestion,
        }
    }
}

/// The outcome of verifying one claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    status: ClaimStatus,
    confidence: u8,
    rationale: String,
    evidence: Option<Evidence>,
    suggestion: Option<String>,
}

impl Verdict {
    /// Build a verdict. Confidence is clamped to 100, and the suggestion is
    /// dropped for `Verified` claims or when it is blank.
    #[must_use]
    pub fn new(
        status: ClaimStatus,
        confidence: u8,
        rationale: impl Into<String>,
        evidence: Option<Evidence>,
        suggestion: Option<String>,
    ) -> Self {
        let suggestion = suggestion
            .filter(|_| status.wants_suggestion())
            .filter(|s| !s.trim().is_empty());
        Self {
            status,
            confidence: confidence.min(100),
            rationale: rationale.into(),
            evidence,
            suggestion,
        }
    }

    #[must_use]
    pub const fn status(&self) -> ClaimStatus {
        self.status
    }

    #[must_use]
    pub const fn confidence(&self) -> u8 {
        self.confidence
    }

    #[must_use]
    pub fn rationale(&self) -> &str {
        &self.rationale
    }

    #[must_use]
    pub const fn evidence(&self) -> Option<&Evidence> {
        self.evidence.as_ref()
    }

    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }
}

/// A fully verified claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Claim {
    pub id: String,
    pub text: String,
    pub position: Span,
    pub kind: ClaimKind,
    pub status: ClaimStatus,
    pub confidence: u8,
    pub rationale: String,
    pub evidence: Option<Evidence>,
    pub suggestion: Option<String>,
}
