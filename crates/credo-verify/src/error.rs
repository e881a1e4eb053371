//! Verifier error types.

use thiserror::Error;

/// An agreement scorer could not produce a score for one claim.
///
/// Never fatal to an analysis: the affected claim is reported as needing
/// review with a "verification failed" rationale.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("evidence from {source_name} has no text to compare against claim {claim_id}")]
    EmptyEvidence {
        claim_id: String,
        source_name: String,
    },

    #[error("scoring failed for claim {claim_id}: {reason}")]
    Scoring { claim_id: String, reason: String },
}
