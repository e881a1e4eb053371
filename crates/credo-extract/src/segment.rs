//! Sentence and clause segmentation with byte-accurate spans.

use credo_core::Span;

/// Characters that may trail terminal punctuation and still belong to the sentence.
const CLOSERS: &[char] = &['"', '\'', '”', '’', ')', ']', '.', '!', '?'];

/// Titles and short forms whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "dr", "mr", "mrs", "ms", "prof", "st", "sen", "rep", "gen", "gov", "rev", "fig", "no", "vs",
    "approx", "dept", "univ", "jr", "sr", "inc", "ltd", "co", "corp", "etc",
];

/// Split `text` into trimmed sentence spans in source order.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes/brackets) when
/// followed by whitespace and a character that can open a sentence, or at a
/// blank line.
#[must_use]
pub fn sentences(text: &str) -> Vec<Span> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if c == '\n' && is_paragraph_break(&chars, i) {
            push_trimmed(text, start, pos, &mut spans);
            start = pos + c.len_utf8();
        } else if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && CLOSERS.contains(&chars[j].1) {
                j += 1;
            }
            if is_sentence_end(text, &chars, i, j) {
                let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
                push_trimmed(text, start, end, &mut spans);
                start = end;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    push_trimmed(text, start, text.len(), &mut spans);
    spans
}

/// Split a sentence span on semicolons into trimmed clause spans.
#[must_use]
pub fn clauses(text: &str, sentence: Span) -> Vec<Span> {
    let Some(body) = text.get(sentence.start..sentence.end) else {
        return Vec::new();
    };
    let mut spans = Vec::new();
    let mut start = sentence.start;
    for (offset, c) in body.char_indices() {
        if c == ';' {
            let end = sentence.start + offset;
            push_trimmed(text, start, end, &mut spans);
            start = end + c.len_utf8();
        }
    }
    push_trimmed(text, start, sentence.end, &mut spans);
    spans
}

/// Text of up to `count` sentences that end before `position`.
#[must_use]
pub fn context_before(text: &str, position: Span, count: usize) -> &str {
    if count == 0 {
        return "";
    }
    let preceding: Vec<Span> = sentences(text)
        .into_iter()
        .filter(|s| s.end <= position.start)
        .collect();
    let Some(first) = preceding.iter().rev().take(count).last() else {
        return "";
    };
    text.get(first.start..position.start).map_or("", str::trim)
}

fn push_trimmed(text: &str, start: usize, end: usize, spans: &mut Vec<Span>) {
    let Some(slice) = text.get(start..end) else {
        return;
    };
    let leading = slice.len() - slice.trim_start().len();
    let trailing = slice.len() - slice.trim_end().len();
    if leading + trailing >= slice.len() {
        return;
    }
    spans.push(Span {
        start: start + leading,
        end: end - trailing,
    });
}

fn is_paragraph_break(chars: &[(usize, char)], i: usize) -> bool {
    chars[i + 1..]
        .iter()
        .map(|(_, c)| *c)
        .take_while(|c| c.is_whitespace())
        .any(|c| c == '\n')
}

fn is_sentence_end(text: &str, chars: &[(usize, char)], i: usize, j: usize) -> bool {
    let Some(&(_, after)) = chars.get(j) else {
        return true;
    };
    if !after.is_whitespace() {
        return false;
    }
    let Some(next) = chars[j..]
        .iter()
        .map(|(_, c)| *c)
        .find(|c| !c.is_whitespace())
    else {
        return true;
    };
    if next.is_lowercase() {
        return false;
    }
    if chars[i].1 == '.' && ends_with_abbreviation(text, chars[i].0) {
        return false;
    }
    true
}

/// Whether the word ending right before the period at `dot` is an abbreviation.
fn ends_with_abbreviation(text: &str, dot: usize) -> bool {
    let before = &text[..dot];
    let word_start = before
        .rfind(|c: char| !(c.is_alphabetic() || c == '.'))
        .map_or(0, |p| p + before[p..].chars().next().map_or(1, char::len_utf8));
    let word = &before[word_start..];
    if word.is_empty() {
        return false;
    }
    // "U.S", "e.g", "i.e"
    if word.contains('.') {
        return true;
    }
    // Initials such as "J. K. Rowling".
    let mut letters = word.chars();
    if let (Some(only), None) = (letters.next(), letters.next()) {
        if only.is_uppercase() {
            return true;
        }
    }
    ABBREVIATIONS.contains(&word.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn texts<'a>(text: &'a str, spans: &[Span]) -> Vec<&'a str> {
        spans.iter().map(|s| &text[s.start..s.end]).collect()
    }

    #[test]
    fn splits_on_terminal_punctuation() {
        let text = "First claim here. Second one! Is it third?  Fourth.";
        assert_eq!(
            texts(text, &sentences(text)),
            vec!["First claim here.", "Second one!", "Is it third?", "Fourth."]
        );
    }

    #[test]
    fn keeps_decimals_and_abbreviations_together() {
        let text = "Dr. Sarah Mitchell from St. Mary's said 98.7% of U.S. adults agree. Next.";
        assert_eq!(
            texts(text, &sentences(text)),
            vec![
                "Dr. Sarah Mitchell from St. Mary's said 98.7% of U.S. adults agree.",
                "Next."
            ]
        );
    }

    #[test]
    fn company_suffix_keeps_the_subject() {
        let text = "Acme Inc. CEO Jane Doe said revenue grew 40% in 2023.";
        assert_eq!(texts(text, &sentences(text)), vec![text]);
    }

    #[rstest]
    #[case("Dr.")]
    #[case("Mr.")]
    #[case("Mrs.")]
    #[case("Ms.")]
    #[case("Prof.")]
    #[case("St.")]
    #[case("e.g.")]
    #[case("i.e.")]
    #[case("etc.")]
    #[case("vs.")]
    #[case("U.S.")]
    #[case("Inc.")]
    #[case("Ltd.")]
    #[case("Co.")]
    #[case("Jr.")]
    #[case("Sr.")]
    #[case("No.")]
    fn abbreviation_does_not_end_sentence(#[case] abbreviation: &str) {
        let first = format!("The filing names {abbreviation} Harper as the lead.");
        let text = format!("{first} Next.");
        assert_eq!(texts(&text, &sentences(&text)), vec![first.as_str(), "Next."]);
    }

    #[test]
    fn closing_quotes_stay_with_sentence() {
        let text = "She said \"it works.\" Then she left.";
        assert_eq!(
            texts(text, &sentences(text)),
            vec!["She said \"it works.\"", "Then she left."]
        );
    }

    #[test]
    fn lowercase_continuation_is_not_a_break() {
        let text = "Results vary, e.g. in trials. Done.";
        assert_eq!(
            texts(text, &sentences(text)),
            vec!["Results vary, e.g. in trials.", "Done."]
        );
    }

    #[test]
    fn blank_lines_end_sentences() {
        let text = "Heading without period\n\nBody text follows.";
        assert_eq!(
            texts(text, &sentences(text)),
            vec!["Heading without period", "Body text follows."]
        );
    }

    #[test]
    fn spans_are_byte_accurate_with_multibyte_text() {
        let text = "Zürich grew 3%. Café owners agreed.";
        let spans = sentences(text);
        assert_eq!(texts(text, &spans), vec!["Zürich grew 3%.", "Café owners agreed."]);
        assert_eq!(spans[0].start, 0);
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(sentences("   \n\t ").is_empty());
    }

    #[test]
    fn clauses_split_on_semicolons() {
        let text = "WHO reported 45%; the CDC reported 30%.";
        let spans = clauses(text, Span { start: 0, end: text.len() });
        assert_eq!(texts(text, &spans), vec!["WHO reported 45%", "the CDC reported 30%."]);
    }

    #[test]
    fn context_before_returns_preceding_sentences() {
        let text = "Stanford published a study. It found a 12% gain. Unrelated.";
        let spans = sentences(text);
        assert_eq!(context_before(text, spans[1], 1), "Stanford published a study.");
        assert_eq!(context_before(text, spans[0], 1), "");
        assert_eq!(
            context_before(text, spans[2], 5),
            "Stanford published a study. It found a 12% gain."
        );
        assert_eq!(context_before(text, spans[2], 0), "");
    }
}
