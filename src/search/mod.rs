//! Full-text search over page texts
//!
//! The FTS5 index selects candidate texts, phrase extraction turns each into
//! ordered [`PhraseMatch`](crate::text::PhraseMatch) values with context.

mod index;
mod matches;

pub use index::{IndexStats, TextFilter, TextIndex};
pub use matches::{extract_matches, suggest_terms};

use crate::text::{PhraseMatch, Text};

/// A text together with every phrase match found in it
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub text: Text,
    pub matches: Vec<PhraseMatch>,
}

/// Extract phrase matches from candidate texts, dropping texts without any
///
/// FTS tokenization folds diacritics; a candidate whose words only match
/// after folding yields no exact match and is skipped.
pub fn collect_results(texts: Vec<Text>, query: &str, context_words: usize) -> Vec<SearchResult> {
    texts
        .into_iter()
        .filter_map(|text| {
            let matches = extract_matches(&text.id, &text.text, query, context_words);
            (!matches.is_empty()).then_some(SearchResult { text, matches })
        })
        .collect()
}
