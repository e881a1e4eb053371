//! # credo-core
//!
//! Core types and error types for Credo.
//!
//! This crate provides the foundational types shared across all Credo crates:
//! - Claim skeletons, verdicts and fully resolved claims
//! - Evidence records and the candidates knowledge sources return
//! - Status, credibility and risk enums with the shared 70/40 thresholds
//! - The trust report handed to the presentation layer
//! - Text helpers (tokenizing, keyword overlap, figure and entity spotting)
//! - Cross-cutting error types

pub mod claim;
pub mod enums;
pub mod errors;
pub mod evidence;
pub mod report;
pub mod text;

pub use claim::{Claim, ClaimSkeleton, Span, Verdict};
pub use enums::{ClaimKind, ClaimStatus, Credibility, RiskLevel};
pub use errors::CoreError;
pub use evidence::{Evidence, EvidenceCandidate, EvidenceMatch};
pub use report::{StatusCounts, TrustReport};
