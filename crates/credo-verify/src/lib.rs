//! # credo-verify
//!
//! Claim verification for Credo.
//!
//! A [`ClaimVerifier`] compares each claim with the evidence the retriever
//! selected, asks its [`AgreementScorer`] for a 0-100 agreement score, and
//! maps that score onto a status:
//!
//! - no evidence: `needs_review`, confidence at most 60, "unverifiable"
//! - score ≥ 70 from a high or medium credibility source: `verified`
//! - 40 ≤ score < 70: `needs_review`
//! - score < 40: `unreliable`
//!
//! The rationale names the most severe [`Discrepancy`] found, and every claim
//! that is not verified gets a concrete suggestion.

mod agreement;
mod error;
mod lexical;
mod verifier;

pub use agreement::{Agreement, AgreementScorer, Discrepancy};
pub use error::VerifyError;
pub use lexical::LexicalScorer;
pub use verifier::{ClaimVerifier, decide, degraded};
