//! Phrase match extraction
//!
//! The FTS index tells us which texts match a query; this module finds where.
//! Matches are captured from the text's own whitespace tokenization, so for
//! ALTO texts the matched words and context line up with the word stream.

use crate::text::PhraseMatch;

/// Find every non-overlapping occurrence of `query` in `text`
///
/// Words are compared case-insensitively with surrounding punctuation
/// trimmed; the captured phrase and context keep the original spelling.
pub fn extract_matches(
    text_id: &str,
    text: &str,
    query: &str,
    context_words: usize,
) -> Vec<PhraseMatch> {
    let terms: Vec<String> = query.split_whitespace().map(normalize).collect();
    if terms.is_empty() || terms.iter().any(String::is_empty) {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let normalized: Vec<String> = words.iter().map(|w| normalize(w)).collect();

    let mut matches = Vec::new();
    let mut pos = 0;

    while pos + terms.len() <= words.len() {
        if normalized[pos..pos + terms.len()] == terms[..] {
            let end = pos + terms.len();
            let context_start = pos.saturating_sub(context_words);
            let context_end = (end + context_words).min(words.len());

            matches.push(PhraseMatch::new(
                text_id,
                words[pos..end].join(" "),
                words[context_start..pos].join(" "),
                words[end..context_end].join(" "),
            ));
            pos = end;
        } else {
            pos += 1;
        }
    }

    matches
}

/// Word sequences in `text` that complete `query`
///
/// All query words but the last must match exactly; the last is a prefix.
/// Suggestions come back in text order, duplicates included.
pub fn suggest_terms(text: &str, query: &str) -> Vec<Vec<String>> {
    let terms: Vec<String> = query.split_whitespace().map(normalize).collect();
    let Some((prefix, leading)) = terms.split_last() else {
        return Vec::new();
    };
    if prefix.is_empty() {
        return Vec::new();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let normalized: Vec<String> = words.iter().map(|w| normalize(w)).collect();

    (0..words.len())
        .filter(|&pos| pos + terms.len() <= words.len())
        .filter(|&pos| {
            normalized[pos..pos + leading.len()] == leading[..]
                && normalized[pos + leading.len()].starts_with(prefix.as_str())
        })
        .map(|pos| normalized[pos..pos + terms.len()].to_vec())
        .collect()
}

/// Lowercase a word and strip leading/trailing punctuation
fn normalize(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}
