//! Context-anchored word locator
//!
//! Maps a search hit (matched phrase plus captured context) back onto the
//! words of an OCR word stream. Every phrase word is located independently:
//! each word containing it is a candidate, and a candidate is kept only when
//! the words around it contain the captured context.
//!
//! The search engine and the OCR layer tokenize differently, so both windows
//! are widened by [`CONTEXT_SLACK`] words beyond the captured context length.

use std::collections::HashSet;

use super::types::{PhraseMatch, Word};

/// Extra words scanned on each side beyond the captured context length
pub const CONTEXT_SLACK: usize = 5;

/// Locate the words of a phrase match inside a word stream
///
/// Results follow phrase-word order. A stream word satisfying several phrase
/// words is returned once per phrase word; use [`UniqueWords`] to emit it once.
pub fn locate<'a>(words: &'a [Word], phrase: &PhraseMatch) -> Vec<&'a Word> {
    phrase
        .matched
        .split_whitespace()
        .flat_map(|needle| find_anchored(words, needle, &phrase.before, &phrase.after))
        .collect()
}

/// All words containing `needle` whose surroundings contain `before` and `after`
fn find_anchored<'a>(words: &'a [Word], needle: &str, before: &str, after: &str) -> Vec<&'a Word> {
    let before_span = word_count(before) + CONTEXT_SLACK;
    let after_span = word_count(after) + CONTEXT_SLACK;

    words
        .iter()
        .enumerate()
        .filter(|(_, word)| word.text.contains(needle))
        .filter(|(pos, _)| {
            let start = pos.saturating_sub(before_span);
            let end = (pos + after_span).min(words.len() - 1);

            window_text(&words[start..=*pos]).contains(before)
                && window_text(&words[*pos..=end]).contains(after)
        })
        .map(|(_, word)| word)
        .collect()
}

fn word_count(context: &str) -> usize {
    context.split_whitespace().count()
}

/// Join a run of words with single spaces, padded by one space on each side
fn window_text(window: &[Word]) -> String {
    let mut text = String::from(" ");
    for word in window {
        text.push_str(&word.text);
        text.push(' ');
    }
    text
}

/// Tracks which stream words were already emitted for one search result
#[derive(Debug, Default)]
pub struct UniqueWords {
    seen: HashSet<usize>,
}

impl UniqueWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a word index is seen
    pub fn insert(&mut self, word: &Word) -> bool {
        self.seen.insert(word.index)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::WordBox;

    fn stream(text: &str) -> Vec<Word> {
        text.split_whitespace()
            .enumerate()
            .map(|(idx, word)| {
                let idx_u32 = idx as u32;
                Word::new(word, idx, WordBox::new(idx_u32 * 100, 10, 80 + idx_u32, 20))
            })
            .collect()
    }

    fn indices(words: &[&Word]) -> Vec<usize> {
        words.iter().map(|w| w.index).collect()
    }

    #[test]
    fn test_context_disambiguates_repeated_word() {
        let words = stream("the cat sat on the mat and the cat ran away");
        let phrase = PhraseMatch::new("t1", "cat", "and the", "ran away");

        let located = locate(&words, &phrase);

        assert_eq!(indices(&located), vec![8]);
        assert_eq!(located[0].bounds, words[8].bounds);
        assert_ne!(located[0].bounds, words[1].bounds);
    }

    #[test]
    fn test_before_context_within_slack_matches() {
        // "alpha beta" is 2 words, so the lookbehind spans 7 words before the candidate
        let words = stream("alpha beta f1 f2 f3 f4 f5 target");
        let phrase = PhraseMatch::new("t1", "target", "alpha beta", "");

        assert_eq!(indices(&locate(&words, &phrase)), vec![7]);
    }

    #[test]
    fn test_before_context_beyond_slack_fails() {
        let words = stream("alpha beta f1 f2 f3 f4 f5 f6 target");
        let phrase = PhraseMatch::new("t1", "target", "alpha beta", "");

        assert!(locate(&words, &phrase).is_empty());
    }

    #[test]
    fn test_after_context_within_slack_matches() {
        let words = stream("target f1 f2 f3 f4 f5 omega psi");
        let phrase = PhraseMatch::new("t1", "target", "", "omega psi");

        assert_eq!(indices(&locate(&words, &phrase)), vec![0]);
    }

    #[test]
    fn test_after_context_beyond_slack_fails() {
        let words = stream("target f1 f2 f3 f4 f5 f6 omega psi");
        let phrase = PhraseMatch::new("t1", "target", "", "omega psi");

        assert!(locate(&words, &phrase).is_empty());
    }

    #[test]
    fn test_empty_context_accepts_all_candidates() {
        let words = stream("Rome romer Romeo at Rome");
        let phrase = PhraseMatch::new("t1", "Rome", "", "");

        // Case-sensitive containment: "romer" is not a candidate
        assert_eq!(indices(&locate(&words, &phrase)), vec![0, 2, 4]);
    }

    #[test]
    fn test_absent_word_contributes_nothing() {
        let words = stream("nothing to see here");
        let phrase = PhraseMatch::new("t1", "missing here", "", "");

        let located = locate(&words, &phrase);
        assert_eq!(indices(&located), vec![3]);

        let phrase = PhraseMatch::new("t1", "missing", "to", "here");
        assert!(locate(&words, &phrase).is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let phrase = PhraseMatch::new("t1", "anything", "", "");
        assert!(locate(&[], &phrase).is_empty());
    }

    #[test]
    fn test_multi_word_phrase_keeps_phrase_order() {
        let words = stream("in the city of Amsterdam, the capital");
        let phrase = PhraseMatch::new("t1", "city of Amsterdam,", "in the", "the capital");

        let located = locate(&words, &phrase);
        assert_eq!(indices(&located), vec![2, 3, 4]);
    }

    #[test]
    fn test_boxes_are_returned_untouched() {
        let words = vec![
            Word::new("Lorem", 0, WordBox::new(12, 40, 77, 18)),
            Word::new("ipsum", 1, WordBox::new(95, 41, 64, 18)),
            Word::new("dolor", 2, WordBox::new(166, 40, 58, 19)),
        ];
        let phrase = PhraseMatch::new("t1", "ipsum dolor", "Lorem", "");

        let boxes: Vec<WordBox> = locate(&words, &phrase).iter().map(|w| w.bounds).collect();
        assert_eq!(boxes, vec![words[1].bounds, words[2].bounds]);
    }

    #[test]
    fn test_repeated_phrase_word_is_deduplicated_by_caller() {
        let words = stream("very very good");
        let phrase = PhraseMatch::new("t1", "very very", "", "good");

        let located = locate(&words, &phrase);
        assert_eq!(indices(&located), vec![0, 1, 0, 1]);

        let mut unique = UniqueWords::new();
        let emitted: Vec<usize> = located
            .into_iter()
            .filter(|word| unique.insert(word))
            .map(|word| word.index)
            .collect();
        assert_eq!(emitted, vec![0, 1]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_context_with_surrounding_blanks() {
        let words = stream("one two three");
        let phrase = PhraseMatch::new("t1", "two", "one ", " three");

        assert_eq!(indices(&locate(&words, &phrase)), vec![1]);
    }
}
