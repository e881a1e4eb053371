//! Turning an agreement score into a verdict.

use std::sync::Arc;

use credo_core::{
    ClaimKind, ClaimSkeleton, ClaimStatus, Credibility, EvidenceMatch, Verdict,
    enums::{MAX_UNVERIFIABLE_CONFIDENCE, REVIEW_THRESHOLD, VERIFIED_THRESHOLD},
};

use crate::{
    agreement::{Agreement, AgreementScorer, Discrepancy},
    lexical::LexicalScorer,
};

/// Status for an agreement score backed by evidence of `credibility`.
///
/// ```text
/// score >= 70 and credibility high/medium → verified
/// score >= 70 and credibility low         → needs review
/// 40 <= score < 70                        → needs review
/// score < 40                              → unreliable
/// ```
#[must_use]
pub const fn decide(score: u8, credibility: Credibility) -> ClaimStatus {
    if score >= VERIFIED_THRESHOLD {
        if credibility.can_verify() {
            ClaimStatus::Verified
        } else {
            ClaimStatus::NeedsReview
        }
    } else if score >= REVIEW_THRESHOLD {
        ClaimStatus::NeedsReview
    } else {
        ClaimStatus::Unreliable
    }
}

/// Verdict for a claim whose verification did not complete.
#[must_use]
pub fn degraded(reason: &str) -> Verdict {
    Verdict::new(
        ClaimStatus::NeedsReview,
        0,
        format!("verification failed: {reason}"),
        None,
        Some("Verify this claim manually; automated verification did not complete.".into()),
    )
}

/// Decides the status of each claim from its (optional) evidence.
#[derive(Clone)]
pub struct ClaimVerifier {
    scorer: Arc<dyn AgreementScorer>,
    unverifiable_confidence: u8,
}

impl std::fmt::Debug for ClaimVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimVerifier")
            .field("unverifiable_confidence", &self.unverifiable_confidence)
            .finish_non_exhaustive()
    }
}

impl ClaimVerifier {
    /// `unverifiable_confidence` is capped at [`MAX_UNVERIFIABLE_CONFIDENCE`].
    #[must_use]
    pub fn new(scorer: Arc<dyn AgreementScorer>, unverifiable_confidence: u8) -> Self {
        Self {
            scorer,
            unverifiable_confidence: unverifiable_confidence.min(MAX_UNVERIFIABLE_CONFIDENCE),
        }
    }

    /// Verifier using [`LexicalScorer`].
    #[must_use]
    pub fn lexical(unverifiable_confidence: u8) -> Self {
        Self::new(Arc::new(LexicalScorer), unverifiable_confidence)
    }

    /// Verify one claim. Never fails; scorer errors produce a degraded verdict.
    #[must_use]
    pub fn verify(&self, claim: &ClaimSkeleton, evidence: Option<&EvidenceMatch>) -> Verdict {
        let Some(evidence) = evidence else {
            return self.unverifiable(claim);
        };

        match self.scorer.score(claim, &evidence.candidate) {
            Ok(agreement) => judge(&agreement, evidence),
            Err(error) => {
                tracing::warn!(claim_id = %claim.id, %error, "verification failed");
                let base = degraded(&error.to_string());
                Verdict::new(
                    base.status(),
                    base.confidence(),
                    base.rationale(),
                    Some(evidence.evidence()),
                    base.suggestion().map(str::to_string),
                )
            }
        }
    }

    fn unverifiable(&self, claim: &ClaimSkeleton) -> Verdict {
        let suggestion = match claim.kind {
            ClaimKind::Statistic => "Cite the original source for this statistic.",
            ClaimKind::Quotation => "Link the original source of this quotation.",
            ClaimKind::EntityAssertion => "Add a citation that supports this claim.",
        };
        Verdict::new(
            ClaimStatus::NeedsReview,
            self.unverifiable_confidence,
            "unverifiable: no knowledge source returned matching evidence",
            None,
            Some(suggestion.into()),
        )
    }
}

fn judge(agreement: &Agreement, evidence: &EvidenceMatch) -> Verdict {
    let score = agreement.score();
    let credibility = evidence.credibility();
    let source = evidence.candidate.source_name.as_str();
    let status = decide(score, credibility);

    let (rationale, suggestion) = match (status, agreement.primary()) {
        (ClaimStatus::Verified, _) => (
            format!("Consistent with {source} ({credibility} credibility); agreement {score}/100."),
            None,
        ),
        (ClaimStatus::NeedsReview, None) if score >= VERIFIED_THRESHOLD => (
            format!("Matches {source}, but its credibility is {credibility}; agreement {score}/100."),
            Some(format!(
                "Confirm this claim against a more authoritative source than {source}."
            )),
        ),
        (_, Some(discrepancy)) => explain(discrepancy, source, score),
        (_, None) => (
            format!(
                "{source} supports only part of this claim and no single discrepancy stands out; agreement {score}/100."
            ),
            Some("Add a citation that directly supports this claim.".into()),
        ),
    };

    Verdict::new(status, score, rationale, Some(evidence.evidence()), suggestion)
}

fn explain(discrepancy: &Discrepancy, source: &str, score: u8) -> (String, Option<String>) {
    match discrepancy {
        Discrepancy::ContradictedBySource { rating } => (
            format!("Contradicted by {source}, rated \"{rating}\"; agreement {score}/100."),
            Some(format!("Revise or remove this claim; {source} rates it \"{rating}\".")),
        ),
        Discrepancy::FigureMismatch { claimed, found } => (
            format!("Figure mismatch: the claim states {claimed} but {source} reports {found}."),
            Some(format!(
                "Correct the figure to match {source} ({found}) or cite the source of {claimed}."
            )),
        ),
        Discrepancy::UnverifiableAttribution { speaker: Some(speaker) } => (
            format!("Unverifiable attribution: {source} does not attribute this quotation to {speaker}."),
            Some(format!(
                "Link the original statement by {speaker} or remove the quotation."
            )),
        ),
        Discrepancy::UnverifiableAttribution { speaker: None } => (
            format!("Unverifiable attribution: {source} does not carry this quotation."),
            Some("Link the original source of this quotation.".into()),
        ),
        Discrepancy::UnknownEntity { entity } => (
            format!("Unknown entity: {entity} does not appear in {source}."),
            Some(format!("Check that {entity} exists and is named correctly.")),
        ),
        Discrepancy::UnconfirmedFigure { claimed } => (
            format!("Figure {claimed} is not confirmed by {source}."),
            Some(format!("Cite a source that states {claimed} directly.")),
        ),
        Discrepancy::MissingTerms { terms } => {
            let listed = terms.join(", ");
            (
                format!("Partly supported: {source} does not mention {listed}; agreement {score}/100."),
                Some(format!("Cite a source that covers {listed}.")),
            )
        }
        Discrepancy::WeakOverlap { overlap } => (
            format!("Weak overlap with {source} ({overlap}/100 of the claim's keywords)."),
            Some("Find a source that directly supports this claim.".into()),
        ),
    }
}
