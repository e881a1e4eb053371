//! Decide whether a clause is a checkable factual assertion.

use credo_core::ClaimKind;
use credo_core::text::{entities, figures, normalize, quotations};

/// Hedges and first-person markers that turn an assertion into an opinion.
const OPINION_MARKERS: &[&str] = &[
    "i think",
    "i believe",
    "i feel",
    "in my opinion",
    "in my view",
    "we believe",
    "we think",
    "it seems",
    "arguably",
    "perhaps",
    "maybe",
    "probably",
    "might",
    "should",
    "ought to",
    "hopefully",
];

/// Verbs that carry a checkable predicate.
const PREDICATE_VERBS: &[&str] = &[
    "is", "are", "was", "were", "has", "have", "had", "found", "finds", "show", "shows", "showed",
    "shown", "reported", "reports", "announced", "said", "says", "stated", "notes", "noted",
    "claims", "claimed", "published", "founded", "won", "achieved", "achieve", "achieves",
    "reached", "increased", "decreased", "reduced", "reduce", "reduces", "grew", "fell", "rose",
    "discovered", "invented", "launched", "released", "estimated", "estimates", "confirmed",
    "surpassed", "accounts", "represents", "employs", "became", "leads", "led", "holds", "held",
];

/// Verbs that attribute a quotation to a speaker.
const ATTRIBUTION_VERBS: &[&str] = &[
    "said", "says", "notes", "noted", "stated", "states", "wrote", "writes", "told", "argued",
    "argues", "explained", "explains", "claimed", "claims", "added", "according",
];

const MIN_WORDS: usize = 3;

/// Classify a clause, or `None` when it carries nothing to check.
#[must_use]
pub fn classify(clause: &str) -> Option<ClaimKind> {
    let clause = clause.trim();
    let words = normalize(clause);
    let word_list: Vec<&str> = words.split_whitespace().collect();

    if word_list.len() < MIN_WORDS || is_question(clause) || is_opinion(&words) {
        return None;
    }

    let named = entities(clause);
    let has_attribution = word_list.iter().any(|w| ATTRIBUTION_VERBS.contains(w));

    if !quotations(clause).is_empty() && (!named.is_empty() || has_attribution) {
        return Some(ClaimKind::Quotation);
    }

    let quantities = figures(clause).into_iter().filter(|f| !f.is_year()).count();
    if quantities > 0 && word_list.len() > MIN_WORDS {
        return Some(ClaimKind::Statistic);
    }

    if !named.is_empty() && has_predicate(&word_list) {
        return Some(ClaimKind::EntityAssertion);
    }

    None
}

fn is_question(clause: &str) -> bool {
    clause
        .trim_end_matches(|c: char| matches!(c, '"' | '\'' | '”' | '’' | ')'))
        .ends_with('?')
}

fn is_opinion(normalized: &str) -> bool {
    let padded = format!(" {normalized} ");
    OPINION_MARKERS
        .iter()
        .any(|marker| padded.contains(&format!(" {marker} ")))
}

fn has_predicate(words: &[&str]) -> bool {
    words
        .iter()
        .any(|w| PREDICATE_VERBS.contains(w) || (w.len() > 4 && w.ends_with("ed")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "According to a 2023 study published in the Journal of AI Research, large language models achieve 98.7% accuracy in factual reasoning tasks.",
        Some(ClaimKind::Statistic)
    )]
    #[case(
        "Dr. Sarah Mitchell from Stanford University notes that 'AI systems have surpassed human-level performance in knowledge retrieval.'",
        Some(ClaimKind::Quotation)
    )]
    #[case(
        "The World Health Organization reported that AI-assisted diagnostics reduced misdiagnosis rates by 45%.",
        Some(ClaimKind::Statistic)
    )]
    #[case("Clinical trials conducted across 12 countries.", Some(ClaimKind::Statistic))]
    #[case("Marie Curie won the Nobel Prize in Physics in 1903.", Some(ClaimKind::EntityAssertion))]
    #[case("Isn't it amazing what Stanford University can do?", None)]
    #[case("I think OpenAI is the best company.", None)]
    #[case("This might change everything in 2030.", None)]
    #[case("However, this is important.", None)]
    #[case("Yes.", None)]
    #[case("It was founded in 1998.", None)]
    fn classifies_clauses(#[case] clause: &str, #[case] expected: Option<ClaimKind>) {
        assert_eq!(classify(clause), expected, "clause: {clause}");
    }
}
