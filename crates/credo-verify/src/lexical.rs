//! Lexical agreement scoring.
//!
//! The base score is the share of the claim's keywords found in the evidence
//! (title plus excerpt). Deductions follow for each discrepancy:
//!
//! | discrepancy               | effect                         |
//! |---------------------------|--------------------------------|
//! | figure mismatch           | −35 per figure                 |
//! | unverifiable attribution  | −30                            |
//! | unknown entity            | −20 each, at most two counted  |
//! | unconfirmed figure        | −15 per figure                 |
//! | contradicting rating      | score capped at 20             |
//!
//! Below 40% recall the evidence is a weak overlap; below 70% the claim
//! keywords it leaves out are listed as missing terms.
//!
//! Years are not treated as figures.

use std::collections::HashSet;

use credo_core::{
    ClaimSkeleton, EvidenceCandidate,
    enums::VERIFIED_THRESHOLD,
    text::{
        Figure, entities, entity_in, figures, keyword_overlap, missing_keywords, normalize,
        quotations, token_set,
    },
};

use crate::{
    agreement::{Agreement, AgreementScorer, Discrepancy},
    error::VerifyError,
};

const FIGURE_MISMATCH_PENALTY: u8 = 35;
const ATTRIBUTION_PENALTY: u8 = 30;
const UNKNOWN_ENTITY_PENALTY: u8 = 20;
const MAX_UNKNOWN_ENTITIES: usize = 2;
const UNCONFIRMED_FIGURE_PENALTY: u8 = 15;
const CONTRADICTED_CAP: u8 = 20;
const WEAK_OVERLAP_BELOW: u8 = 40;
const MAX_MISSING_TERMS: usize = 5;
/// Share of a quotation's keywords the evidence must carry.
const QUOTE_RECALL: f64 = 0.5;

/// Fact-check ratings that contradict the reviewed claim.
const CONTRADICTION_MARKERS: &[&str] = &[
    "false",
    "fake",
    "fabricated",
    "misleading",
    "incorrect",
    "inaccurate",
    "wrong",
    "not true",
    "pants on fire",
    "unsupported",
    "baseless",
    "debunked",
    "distorted",
    "exaggerated",
    "misattributed",
    "no evidence",
    "satire",
];

/// Default scorer: keyword recall with discrepancy deductions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalScorer;

impl AgreementScorer for LexicalScorer {
    fn score(
        &self,
        claim: &ClaimSkeleton,
        evidence: &EvidenceCandidate,
    ) -> Result<Agreement, VerifyError> {
        let content = evidence.content();
        if content.trim().is_empty() {
            return Err(VerifyError::EmptyEvidence {
                claim_id: claim.id.clone(),
                source_name: evidence.source_name.clone(),
            });
        }

        let haystack = token_set(&content);
        let overlap = percent(keyword_overlap(&claim.text, &content));
        let mut discrepancies = Vec::new();
        let mut penalty: u8 = 0;

        penalty = penalty.saturating_add(check_figures(&claim.text, &content, &mut discrepancies));

        let quoted = quotations(&claim.text);
        let named = entities(&outside_quotes(&claim.text, &quoted));
        if quoted.is_empty() {
            penalty = penalty.saturating_add(check_entities(&named, &haystack, &mut discrepancies));
        } else {
            penalty = penalty.saturating_add(check_attribution(
                &quoted,
                &named,
                &content,
                &haystack,
                &mut discrepancies,
            ));
        }

        if overlap < WEAK_OVERLAP_BELOW {
            discrepancies.push(Discrepancy::WeakOverlap { overlap });
        } else if overlap < VERIFIED_THRESHOLD {
            let mut terms = missing_keywords(&claim.text, &content);
            terms.truncate(MAX_MISSING_TERMS);
            if !terms.is_empty() {
                discrepancies.push(Discrepancy::MissingTerms { terms });
            }
        }

        let mut score = overlap.saturating_sub(penalty);
        if let Some(rating) = contradicting_rating(evidence.rating.as_deref()) {
            discrepancies.push(Discrepancy::ContradictedBySource { rating });
            score = score.min(CONTRADICTED_CAP);
        }

        tracing::trace!(
            claim_id = %claim.id,
            overlap,
            penalty,
            score,
            "lexical agreement"
        );
        Ok(Agreement::new(score, discrepancies))
    }
}

fn check_figures(claim: &str, content: &str, out: &mut Vec<Discrepancy>) -> u8 {
    let found: Vec<Figure> = figures(content).into_iter().filter(|f| !f.is_year()).collect();
    let mut penalty: u8 = 0;
    for claimed in figures(claim).into_iter().filter(|f| !f.is_year()) {
        if found.iter().any(|f| f.matches(&claimed)) {
            continue;
        }
        let rival = found
            .iter()
            .find(|f| f.percent == claimed.percent)
            .or_else(|| found.first());
        if let Some(rival) = rival {
            out.push(Discrepancy::FigureMismatch {
                claimed: claimed.raw,
                found: rival.raw.clone(),
            });
            penalty = penalty.saturating_add(FIGURE_MISMATCH_PENALTY);
        } else {
            out.push(Discrepancy::UnconfirmedFigure {
                claimed: claimed.raw,
            });
            penalty = penalty.saturating_add(UNCONFIRMED_FIGURE_PENALTY);
        }
    }
    penalty
}

fn check_entities(named: &[String], haystack: &HashSet<String>, out: &mut Vec<Discrepancy>) -> u8 {
    let mut penalty: u8 = 0;
    for (counted, entity) in named
        .iter()
        .filter(|entity| !entity_in(entity, haystack))
        .enumerate()
    {
        out.push(Discrepancy::UnknownEntity {
            entity: entity.clone(),
        });
        if counted < MAX_UNKNOWN_ENTITIES {
            penalty = penalty.saturating_add(UNKNOWN_ENTITY_PENALTY);
        }
    }
    penalty
}

fn check_attribution(
    quoted: &[String],
    named: &[String],
    content: &str,
    haystack: &HashSet<String>,
    out: &mut Vec<Discrepancy>,
) -> u8 {
    let speaker = named.first();
    let speaker_found = speaker.is_none_or(|s| entity_in(s, haystack));
    let wording_found = quoted
        .iter()
        .all(|quote| keyword_overlap(quote, content) >= QUOTE_RECALL);
    if speaker_found && wording_found {
        return 0;
    }
    out.push(Discrepancy::UnverifiableAttribution {
        speaker: speaker.cloned(),
    });
    ATTRIBUTION_PENALTY
}

fn outside_quotes(text: &str, quoted: &[String]) -> String {
    let mut rest = text.to_string();
    for quote in quoted {
        rest = rest.replace(quote.as_str(), " ");
    }
    rest
}

fn contradicting_rating(rating: Option<&str>) -> Option<String> {
    let rating = rating?;
    let padded = format!(" {} ", normalize(rating));
    CONTRADICTION_MARKERS
        .iter()
        .any(|marker| padded.contains(&format!(" {marker} ")))
        .then(|| rating.trim().to_string())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to [0, 100] first"
)]
fn percent(ratio: f64) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use credo_core::{ClaimKind, Credibility, Span};
    use pretty_assertions::assert_eq;

    fn skeleton(text: &str, kind: ClaimKind) -> ClaimSkeleton {
        ClaimSkeleton::new("c1", text, Span::new(0, text.len()).unwrap(), kind).unwrap()
    }

    fn candidate(excerpt: &str, rating: Option<&str>) -> EvidenceCandidate {
        EvidenceCandidate {
            source_name: "World Health Organization".into(),
            source_url: "https://www.who.int/ai".into(),
            title: String::new(),
            excerpt: excerpt.into(),
            credibility: Credibility::High,
            published_at: None,
            rating: rating.map(str::to_string),
        }
    }

    #[test]
    fn matching_evidence_scores_high() {
        let claim = skeleton(
            "The World Health Organization reported that AI-assisted diagnostics reduced misdiagnosis rates by 45%.",
            ClaimKind::Statistic,
        );
        let evidence = candidate(
            "The World Health Organization found that AI-assisted diagnostics reduced misdiagnosis rates by 45% in pilot hospitals.",
            None,
        );
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert_eq!(agreement.score(), 100);
        assert!(agreement.discrepancies().is_empty());
    }

    #[test]
    fn different_figure_is_a_mismatch() {
        let claim = skeleton(
            "Large language models achieve 98.7% accuracy in factual reasoning tasks.",
            ClaimKind::Statistic,
        );
        let evidence = candidate(
            "Large language models achieve 62% accuracy in factual reasoning tasks.",
            None,
        );
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert_eq!(
            agreement.primary(),
            Some(&Discrepancy::FigureMismatch {
                claimed: "98.7%".into(),
                found: "62%".into(),
            })
        );
        assert!(agreement.score() < 70);
    }

    #[test]
    fn absent_figure_is_unconfirmed() {
        let claim = skeleton(
            "Clinical trials were conducted across 12 countries.",
            ClaimKind::Statistic,
        );
        let evidence = candidate("Clinical trials were conducted across several countries.", None);
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert_eq!(
            agreement.primary(),
            Some(&Discrepancy::UnconfirmedFigure {
                claimed: "12".into()
            })
        );
    }

    #[test]
    fn missing_entity_is_reported() {
        let claim = skeleton(
            "The Journal of AI Research published results on language models.",
            ClaimKind::EntityAssertion,
        );
        let evidence = candidate(
            "The Journal of Artificial Intelligence Research published results on language models.",
            None,
        );
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert!(agreement.discrepancies().contains(&Discrepancy::UnknownEntity {
            entity: "Journal of AI Research".into()
        }));
    }

    #[test]
    fn quotation_without_speaker_is_unverifiable() {
        let claim = skeleton(
            "Dr. Sarah Mitchell notes that 'AI systems have surpassed human-level performance in knowledge retrieval.'",
            ClaimKind::Quotation,
        );
        let evidence = candidate(
            "AI systems have surpassed human-level performance in knowledge retrieval, a panel said.",
            None,
        );
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert_eq!(
            agreement.primary(),
            Some(&Discrepancy::UnverifiableAttribution {
                speaker: Some("Sarah Mitchell".into())
            })
        );
    }

    #[test]
    fn contradicting_rating_caps_score() {
        let claim = skeleton(
            "The World Health Organization reported that AI-assisted diagnostics reduced misdiagnosis rates by 45%.",
            ClaimKind::Statistic,
        );
        let evidence = candidate(
            "The World Health Organization reported that AI-assisted diagnostics reduced misdiagnosis rates by 45%.",
            Some("Mostly False"),
        );
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert!(agreement.score() <= CONTRADICTED_CAP);
        assert_eq!(
            agreement.primary(),
            Some(&Discrepancy::ContradictedBySource {
                rating: "Mostly False".into()
            })
        );
    }

    #[test]
    fn supportive_rating_is_not_a_contradiction() {
        assert_eq!(contradicting_rating(Some("True")), None);
        assert_eq!(contradicting_rating(Some("Mostly true")), None);
        assert_eq!(contradicting_rating(Some("Not true")), Some("Not true".into()));
        assert_eq!(contradicting_rating(None), None);
    }

    #[test]
    fn empty_evidence_is_an_error() {
        let claim = skeleton("WHO reported a 45% drop.", ClaimKind::Statistic);
        let err = LexicalScorer.score(&claim, &candidate("  ", None)).unwrap_err();
        assert!(matches!(err, VerifyError::EmptyEvidence { .. }));
    }

    #[test]
    fn partial_evidence_lists_missing_terms() {
        let claim = skeleton(
            "Clinical trials were conducted across many hospitals and several universities in spring.",
            ClaimKind::EntityAssertion,
        );
        let evidence = candidate("Clinical trials were conducted in hospitals.", None);
        let agreement = LexicalScorer.score(&claim, &evidence).unwrap();
        assert!((40..70).contains(&agreement.score()), "score was {}", agreement.score());
        let Some(Discrepancy::MissingTerms { terms }) = agreement.primary() else {
            panic!("expected missing terms, got {:?}", agreement.primary());
        };
        assert!(terms.contains(&"universities".to_string()));
        assert!(terms.contains(&"spring".to_string()));
        assert!(!terms.contains(&"hospitals".to_string()));
    }

    #[test]
    fn unrelated_evidence_is_weak_overlap() {
        let claim = skeleton(
            "Clinical trials were conducted across 12 countries.",
            ClaimKind::Statistic,
        );
        let agreement = LexicalScorer
            .score(&claim, &candidate("Bread needs flour, water and yeast.", None))
            .unwrap();
        assert!(agreement.score() < 40);
        assert!(agreement
            .discrepancies()
            .iter()
            .any(|d| matches!(d, Discrepancy::WeakOverlap { .. })));
    }
}
