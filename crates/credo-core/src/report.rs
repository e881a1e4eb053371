//! The trust report returned by `analyze`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::enums::{ClaimStatus, RiskLevel};
use crate::errors::CoreError;

/// Number of claims per terminal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCounts {
    pub verified: usize,
    pub needs_review: usize,
    pub unreliable: usize,
}

impl StatusCounts {
    /// Tally the statuses of `claims`.
    #[must_use]
    pub fn tally<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> Self {
        let mut counts = Self::default();
        for claim in claims {
            *counts.slot_mut(claim.status) += 1;
        }
        counts
    }

    #[must_use]
    pub const fn get(&self, status: ClaimStatus) -> usize {
        match status {
            ClaimStatus::Verified => self.verified,
            ClaimStatus::NeedsReview => self.needs_review,
            ClaimStatus::Unreliable => self.unreliable,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.verified + self.needs_review + self.unreliable
    }

    const fn slot_mut(&mut self, status: ClaimStatus) -> &mut usize {
        match status {
            ClaimStatus::Verified => &mut self.verified,
            ClaimStatus::NeedsReview => &mut self.needs_review,
            ClaimStatus::Unreliable => &mut self.unreliable,
        }
    }
}

/// Aggregate verification result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TrustReport {
    pub trust_score: u8,
    pub risk_level: RiskLevel,
    pub total_claims: usize,
    pub counts_by_status: StatusCounts,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub claims: Vec<Claim>,
}

impl TrustReport {
    /// Check the structural invariants of a report.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        if self.total_claims != self.claims.len() {
            return Err(CoreError::Validation(format!(
                "total_claims {} != {} claims",
                self.total_claims,
                self.claims.len()
            )));
        }
        if self.counts_by_status.total() != self.total_claims {
            return Err(CoreError::Validation(format!(
                "status counts sum to {} but total_claims is {}",
                self.counts_by_status.total(),
                self.total_claims
            )));
        }
        if self.counts_by_status != StatusCounts::tally(&self.claims) {
            return Err(CoreError::Validation(
                "status counts do not match claim statuses".into(),
            ));
        }
        if self.trust_score > 100 {
            return Err(CoreError::Validation(format!(
                "trust_score {} out of range",
                self.trust_score
            )));
        }
        if self.risk_level != RiskLevel::from_score(self.trust_score) {
            return Err(CoreError::Validation(format!(
                "risk_level {} does not match trust_score {}",
                self.risk_level, self.trust_score
            )));
        }
        if let Some(claim) = self
            .claims
            .iter()
            .find(|c| c.status == ClaimStatus::Verified && c.suggestion.is_some())
        {
            return Err(CoreError::Validation(format!(
                "verified claim {} carries a suggestion",
                claim.id
            )));
        }
        Ok(())
    }
}
