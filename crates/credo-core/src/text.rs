//! Text helpers shared by the extractor, retriever and verifier.
//!
//! Everything here is lexical: lowercase tokens, a small stop-word list, a
//! light suffix stemmer, figure spotting and capitalized-run entity spotting.
//! Every stage scores text through these helpers.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:[.,]\d+)*|[\p{L}\p{N}]+(?:['’]\p{L}+)?").expect("token regex is valid")
});

static FIGURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?(\s*(?:%|percent\b|per cent\b))?")
        .expect("figure regex is valid")
});

static QUOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]{3,})"|“([^”]{3,})”|(?:^|[\s(])'([^']{8,})'"#)
        .expect("quote regex is valid")
});

/// Words ignored when building keyword sets.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "doing", "during", "each", "few", "for", "from",
    "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
    "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more", "most", "my",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours",
    "out", "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "whom", "why", "will", "with", "would", "you", "your", "yours", "according",
    "said", "says", "notes", "noted", "reported", "reports", "stated", "states", "published",
];

/// Capitalized words that never start an entity on their own.
const FUNCTION_WORDS: &[&str] = &[
    "a", "according", "after", "also", "although", "an", "and", "as", "at", "before", "but", "by",
    "during", "for", "from", "furthermore", "he", "here", "however", "i", "if", "in", "it", "its",
    "many", "meanwhile", "moreover", "most", "on", "or", "our", "overall", "she", "several",
    "since", "so", "some", "the", "their", "there", "these", "they", "this", "those", "to", "we",
    "when", "while", "with", "yet",
];

/// Lowercase words allowed inside a multi-word entity ("Journal of AI Research").
const CONNECTORS: &[&str] = &[
    "of", "for", "the", "de", "da", "del", "der", "du", "la", "van", "von",
];

const HONORIFICS: &[&str] = &["dr", "mr", "mrs", "ms", "prof", "professor", "sir", "dame"];

/// Lowercase, strip punctuation, collapse whitespace.
///
/// Used to compare human-written strings such as suggestions.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '%' {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase word and number tokens in source order.
///
/// Thousands separators are removed from numbers (`1,200` → `1200`).
#[must_use]
pub fn tokens(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| {
            let token = m.as_str();
            if token.starts_with(|c: char| c.is_ascii_digit()) {
                strip_thousands(token)
            } else {
                token.to_lowercase()
            }
        })
        .collect()
}

/// Significant tokens: stop words removed, short words dropped unless numeric,
/// deduplicated in first-seen order.
#[must_use]
pub fn keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens(text)
        .into_iter()
        .filter(|t| is_numeric(t) || (t.chars().count() >= 3 && !STOPWORDS.contains(&t.as_str())))
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Stemmed keyword set, the unit of comparison for overlap scores.
#[must_use]
pub fn keyword_set(text: &str) -> HashSet<String> {
    keywords(text).iter().map(|k| stem(k)).collect()
}

/// Stemmed set of every token (stop words included), for membership checks.
#[must_use]
pub fn token_set(text: &str) -> HashSet<String> {
    tokens(text).iter().map(|t| stem(t)).collect()
}

/// Share of the claim's keywords that appear in `evidence`, in `[0, 1]`.
///
/// Only the claim side is normalized; evidence excerpts are usually much
/// longer than claims.
#[must_use]
pub fn keyword_overlap(claim: &str, evidence: &str) -> f64 {
    let claim_keys = keyword_set(claim);
    if claim_keys.is_empty() {
        return 0.0;
    }
    let evidence_tokens = token_set(evidence);
    let hits = claim_keys
        .iter()
        .filter(|k| evidence_tokens.contains(*k))
        .count();
    ratio(hits, claim_keys.len())
}

/// The claim's keywords that `evidence` does not carry, in claim order, one
/// per stem.
#[must_use]
pub fn missing_keywords(claim: &str, evidence: &str) -> Vec<String> {
    let evidence_tokens = token_set(evidence);
    let mut seen = HashSet::new();
    keywords(claim)
        .into_iter()
        .filter(|k| {
            let stemmed = stem(k);
            !evidence_tokens.contains(&stemmed) && seen.insert(stemmed)
        })
        .collect()
}

/// Very light English suffix stripping.
#[must_use]
pub fn stem(word: &str) -> String {
    let word = word
        .trim_end_matches("'s")
        .trim_end_matches("’s")
        .to_lowercase();
    if is_numeric(&word) || word.chars().count() <= 4 {
        return word;
    }
    if let Some(base) = word.strip_suffix("ies") {
        return format!("{base}y");
    }
    if let Some(base) = word.strip_suffix("es") {
        if ["ss", "x", "z", "ch", "sh"].iter().any(|end| base.ends_with(end)) {
            return base.to_string();
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(base) = word.strip_suffix(suffix) {
            if base.chars().count() >= 4 {
                return base.to_string();
            }
        }
    }
    if let Some(base) = word.strip_suffix('s') {
        if !base.ends_with(['s', 'u', 'i']) {
            return base.to_string();
        }
    }
    word
}

/// A number spotted in text.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Text as written (`98.7%`, `1,200`).
    pub raw: String,
    pub value: f64,
    pub percent: bool,
}

impl Figure {
    /// Whether this looks like a calendar year rather than a quantity.
    #[must_use]
    pub fn is_year(&self) -> bool {
        !self.percent
            && self.value.fract() == 0.0
            && (1800.0..=2100.0).contains(&self.value)
            && !self.raw.contains(',')
    }

    /// Same quantity in the same unit.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        (self.value - other.value).abs() < 1e-9 && self.percent == other.percent
    }
}

/// All figures in `text`, in source order.
#[must_use]
pub fn figures(text: &str) -> Vec<Figure> {
    FIGURE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let integer = strip_thousands(caps.get(1)?.as_str());
            let fraction = caps.get(2).map_or("", |m| m.as_str());
            let value = format!("{integer}{fraction}").parse::<f64>().ok()?;
            Some(Figure {
                raw: whole.as_str().trim().to_string(),
                value,
                percent: caps.get(3).is_some(),
            })
        })
        .collect()
}

/// Quoted passages (double quotes, curly quotes, or long single-quoted runs).
#[must_use]
pub fn quotations(text: &str) -> Vec<String> {
    QUOTE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().trim().to_string())
        })
        .collect()
}

/// Runs of capitalized words treated as named entities, in source order.
///
/// Honorifics are dropped (`Dr. Sarah Mitchell` → `Sarah Mitchell`), lowercase
/// connectors may join capitalized words (`Journal of AI Research`), and the
/// first word of the text only counts when it is an acronym or is followed by
/// another capitalized word.
#[must_use]
pub fn entities(text: &str) -> Vec<String> {
    let raw_words: Vec<&str> = text.split_whitespace().collect();
    let mut found: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut pending: Vec<&str> = Vec::new();

    let flush = |current: &mut Vec<&str>, pending: &mut Vec<&str>, found: &mut Vec<String>| {
        pending.clear();
        if !current.is_empty() {
            let entity = current.join(" ");
            if !found.contains(&entity) {
                found.push(entity);
            }
            current.clear();
        }
    };

    for (index, raw) in raw_words.iter().enumerate() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        let lower = word.to_lowercase();
        let honorific = HONORIFICS.contains(&lower.as_str());
        let ends_clause = !honorific && raw.ends_with(|c: char| ",;:.!?)\"”'".contains(c));

        if word.is_empty() || honorific {
            flush(&mut current, &mut pending, &mut found);
            continue;
        }

        if is_capitalized_word(word) {
            let starts_entity = current.is_empty();
            let skip = starts_entity
                && (FUNCTION_WORDS.contains(&lower.as_str())
                    || (index == 0
                        && !is_acronym(word)
                        && !raw_words
                            .get(1)
                            .is_some_and(|next| is_capitalized_word(trim_word(next)))));
            if skip {
                flush(&mut current, &mut pending, &mut found);
            } else {
                current.append(&mut pending);
                current.push(word);
            }
        } else if !current.is_empty() && !ends_clause && CONNECTORS.contains(&lower.as_str()) {
            pending.push(word);
        } else {
            flush(&mut current, &mut pending, &mut found);
        }

        if ends_clause {
            flush(&mut current, &mut pending, &mut found);
        }
    }
    flush(&mut current, &mut pending, &mut found);
    found
}

/// Whether every significant word of `entity` appears in `haystack`, a
/// [`token_set`].
#[must_use]
pub fn entity_in(entity: &str, haystack: &HashSet<String>) -> bool {
    let words: Vec<String> = tokens(entity)
        .into_iter()
        .filter(|w| !CONNECTORS.contains(&w.as_str()))
        .map(|w| stem(&w))
        .collect();
    !words.is_empty() && words.iter().all(|w| haystack.contains(w))
}

/// Whether a token is a number.
#[must_use]
pub fn is_numeric(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
        && token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

#[allow(clippy::cast_precision_loss)]
fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

fn strip_thousands(number: &str) -> String {
    let parts: Vec<&str> = number.split(',').collect();
    if parts.len() > 1 && parts[1..].iter().all(|p| p.len() == 3) {
        parts.concat()
    } else {
        number.to_string()
    }
}

fn trim_word(raw: &str) -> &str {
    raw.trim_matches(|c: char| !c.is_alphanumeric())
}

fn is_capitalized_word(word: &str) -> bool {
    let Some(first) = word.chars().next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    // "AI-assisted" is a modifier, not a name.
    match word.split_once('-') {
        Some((_, tail)) => !tail.starts_with(|c: char| c.is_lowercase()),
        None => true,
    }
}

fn is_acronym(word: &str) -> bool {
    word.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && word
            .chars()
            .filter(|c| c.is_alphabetic())
            .all(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_collapses_case_and_punctuation() {
        assert_eq!(
            normalize("  Verify the source!  Then, cite it. "),
            "verify the source then cite it"
        );
        assert_eq!(normalize("Up 45%."), "up 45%");
    }

    #[test]
    fn tokens_keep_decimals_and_drop_thousands_separators() {
        assert_eq!(
            tokens("Models hit 98.7% on 1,200 tasks."),
            vec!["models", "hit", "98.7", "on", "1200", "tasks"]
        );
    }

    #[test]
    fn keywords_drop_stop_words() {
        assert_eq!(
            keywords("The WHO reported that the rate fell by 45%"),
            vec!["who", "rate", "fell", "45"]
        );
    }

    #[test]
    fn stem_strips_common_suffixes() {
        assert_eq!(stem("trials"), "trial");
        assert_eq!(stem("studies"), "study");
        assert_eq!(stem("reported"), "report");
        assert_eq!(stem("diagnostics"), "diagnostic");
        assert_eq!(stem("class"), "class");
        assert_eq!(stem("WHO's"), "who");
    }

    #[test]
    fn keyword_overlap_is_claim_normalized() {
        let claim = "Clinical trials were conducted across 12 countries";
        let evidence = "A trial of AI diagnostics was conducted in 12 countries across Europe.";
        let overlap = keyword_overlap(claim, evidence);
        assert!(overlap > 0.7, "overlap was {overlap}");
        assert!(keyword_overlap("", evidence).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_keywords_keep_claim_order() {
        let claim = "Clinical trials ran in hospitals, hospital wards and universities";
        let evidence = "Clinical trial results from several hospitals.";
        assert_eq!(
            missing_keywords(claim, evidence),
            vec!["ran", "wards", "universities"]
        );
        assert!(missing_keywords(claim, claim).is_empty());
    }

    #[test]
    fn figures_parse_percentages_and_years() {
        let found = figures("In 2023, accuracy was 98.7% across 1,200 prompts (45 percent gain).");
        let raws: Vec<&str> = found.iter().map(|f| f.raw.as_str()).collect();
        assert_eq!(raws, vec!["2023", "98.7%", "1,200", "45 percent"]);
        assert!(found[0].is_year());
        assert!(found[1].percent);
        assert!((found[2].value - 1200.0).abs() < f64::EPSILON);
        assert!(!found[2].is_year());
    }

    #[test]
    fn figure_matching_respects_units() {
        let a = &figures("45%")[0];
        let b = &figures("45 percent")[0];
        let c = &figures("45")[0];
        assert!(a.matches(b));
        assert!(!a.matches(c));
    }

    #[test]
    fn quotations_find_double_and_single_quotes() {
        let text = "Dr. Sarah Mitchell notes that 'AI systems have surpassed humans.' Also \"short\".";
        assert_eq!(
            quotations(text),
            vec!["AI systems have surpassed humans.", "short"]
        );
    }

    #[test]
    fn entities_join_connectors_and_drop_honorifics() {
        let text = "According to a 2023 study published in the Journal of AI Research, \
                    Dr. Sarah Mitchell from Stanford University disagreed.";
        assert_eq!(
            entities(text),
            vec!["Journal of AI Research", "Sarah Mitchell", "Stanford University"]
        );
    }

    #[test]
    fn entities_skip_sentence_initial_common_words() {
        assert_eq!(
            entities("Clinical trials were conducted across 12 countries."),
            Vec::<String>::new()
        );
        assert_eq!(
            entities("The World Health Organization reported that AI-assisted tools helped."),
            vec!["World Health Organization"]
        );
        assert_eq!(entities("WHO reported a drop."), vec!["WHO"]);
    }

    #[test]
    fn entity_in_checks_every_significant_word() {
        let tokens = token_set("The Journal of Artificial Intelligence Research publishes papers.");
        assert!(entity_in("Journal of Artificial Intelligence Research", &tokens));
        assert!(!entity_in("Journal of AI Research", &tokens));
    }
}
