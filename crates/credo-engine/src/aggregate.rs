//! Trust aggregation: per-claim verdicts to one document report.

use std::collections::HashSet;

use credo_core::{Claim, ClaimStatus, RiskLevel, StatusCounts, TrustReport, text::normalize};

/// Summary used when the document holds nothing to check.
pub const NO_CLAIMS_SUMMARY: &str = "No checkable factual claims were found; nothing to verify.";

/// Build the report for a fully verified set of claims.
///
/// Claims are kept in the order given, which the pipeline guarantees is
/// source order.
#[must_use]
pub fn aggregate(claims: Vec<Claim>) -> TrustReport {
    let counts = StatusCounts::tally(&claims);
    let trust_score = trust_score(&claims);
    let risk_level = RiskLevel::from_score(trust_score);

    TrustReport {
        trust_score,
        risk_level,
        total_claims: claims.len(),
        counts_by_status: counts,
        summary: summary(&counts, trust_score, risk_level),
        recommendations: recommendations(&claims),
        claims,
    }
}

/// Confidence-weighted share of trustworthy claims, in `[0, 100]`.
///
/// Verified claims count fully, claims needing review count half, unreliable
/// claims not at all; each is scaled by its confidence. No claims scores 100.
#[must_use]
pub fn trust_score(claims: &[Claim]) -> u8 {
    if claims.is_empty() {
        return 100;
    }
    let weighted: f64 = claims
        .iter()
        .map(|c| c.status.weight() * f64::from(c.confidence.min(100)) / 100.0)
        .sum();
    to_score(100.0 * weighted / count(claims.len()))
}

/// Suggestions of claims that are not verified, in claim order, without
/// repeats (compared case- and punctuation-insensitively).
#[must_use]
pub fn recommendations(claims: &[Claim]) -> Vec<String> {
    let mut seen = HashSet::new();
    claims
        .iter()
        .filter(|c| c.status != ClaimStatus::Verified)
        .filter_map(|c| c.suggestion.as_deref())
        .filter(|s| seen.insert(normalize(s)))
        .map(str::to_string)
        .collect()
}

fn summary(counts: &StatusCounts, score: u8, risk: RiskLevel) -> String {
    let total = counts.total();
    if total == 0 {
        return NO_CLAIMS_SUMMARY.to_string();
    }
    let noun = if total == 1 { "claim" } else { "claims" };
    let review_verb = if counts.needs_review == 1 { "needs" } else { "need" };
    format!(
        "Checked {total} {noun}: {} verified, {} {review_verb} review, {} unreliable. \
         Trust score {score}/100 ({}).",
        counts.verified,
        counts.needs_review,
        counts.unreliable,
        risk.label()
    )
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to [0, 100] first"
)]
fn to_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[allow(clippy::cast_precision_loss)]
fn count(n: usize) -> f64 {
    n as f64
}
