//! # Fuzzy Text Matcher Module
//!
//! ## Purpose
//! Approximate text matching used to filter episodes by a free-text query.
//! Combines a cheap substring fast path with edit-distance matching over
//! individual words and, for longer queries, over the whole text.
//!
//! ## Input/Output Specification
//! - **Input**: Query string, candidate text (title or description)
//! - **Output**: Boolean match decision
//! - **Complexity**: O(|query|·|word|) per word compared; no caching or
//!   precomputed index, recomputed on every (debounced) keystroke
//!
//! ## Matching policy
//! 1. Case-fold both strings (NFC-normalized, lowercased).
//! 2. Substring containment matches immediately.
//! 3. Otherwise each whitespace-separated word of the text is compared by
//!    Levenshtein distance; threshold 1 for queries up to 6 characters,
//!    2 for longer ones.
//! 4. Queries longer than 6 characters additionally match when the whole
//!    text is within 3 edits, recovering matches that span word boundaries.

use crate::config::SearchConfig;
use unicode_normalization::UnicodeNormalization;

/// Fuzzy matcher with the configured threshold policy
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    short_query_max_len: usize,
    short_query_threshold: usize,
    long_query_threshold: usize,
    whole_text_threshold: usize,
}

impl FuzzyMatcher {
    /// Build a matcher from the search configuration
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            short_query_max_len: config.short_query_max_len,
            short_query_threshold: config.short_query_threshold,
            long_query_threshold: config.long_query_threshold,
            whole_text_threshold: config.whole_text_threshold,
        }
    }

    /// Decide whether `query` approximately matches `text`.
    pub fn is_match(&self, query: &str, text: &str) -> bool {
        let query = fold(query);
        let text = fold(text);

        // Cheap path, handles the common case
        if text.contains(&query) {
            return true;
        }

        let query_len = query.chars().count();
        let threshold = if query_len > self.short_query_max_len {
            self.long_query_threshold
        } else {
            self.short_query_threshold
        };

        for word in text.split_whitespace() {
            if levenshtein(&query, word) <= threshold {
                return true;
            }
        }

        // Whole-string comparison recovers matches spanning multiple words,
        // but only for long queries; short ones would over-match.
        if query_len > self.short_query_max_len
            && levenshtein(&query, &text) <= self.whole_text_threshold
        {
            return true;
        }

        false
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(&crate::config::Config::default().search)
    }
}

/// Case-fold a string for comparison: NFC normalization plus lowercasing,
/// so accented Portuguese text compares consistently.
fn fold(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Classic dynamic-programming Levenshtein distance over characters, with
/// unit-cost insertions, deletions and substitutions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("civil", "civil"), 0);
        assert_eq!(levenshtein("civil", ""), 5);
        assert_eq!(levenshtein("civil", "civik"), 1);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_substring_is_reflexive() {
        let matcher = FuzzyMatcher::default();
        assert!(matcher.is_match("contrat", "Contratos - Parte I"));
        assert!(matcher.is_match("DIREITO", "Introdução ao direito civil"));
        assert!(matcher.is_match("posse", "Propriedade e Posse"));
    }

    #[test]
    fn test_short_query_threshold_boundary() {
        let matcher = FuzzyMatcher::default();
        // distance 1, short query, threshold 1
        assert!(matcher.is_match("civil", "civik"));
        assert!(matcher.is_match("civil", "civip"));
        assert!(!matcher.is_match("civil", "xyzzy"));
    }

    #[test]
    fn test_long_query_whole_text_path() {
        let matcher = FuzzyMatcher::default();
        // 8-character query; no single word is within the per-word
        // threshold of 2, but the whole text is within 3 edits.
        assert_eq!(levenshtein("abcdefgh", "abcdexyz"), 3);
        assert!(matcher.is_match("abcdefgh", "abcdexyz"));
        // 4 edits away: rejected
        assert_eq!(levenshtein("abcdefgh", "abcdwxyz"), 4);
        assert!(!matcher.is_match("abcdefgh", "abcdwxyz"));
    }

    #[test]
    fn test_contrat_scenario() {
        let matcher = FuzzyMatcher::default();
        assert!(matcher.is_match("contrat", "Contratos - Parte I"));
        assert!(matcher.is_match("contrat", "Contratos - Parte II"));
        assert!(!matcher.is_match("contrat", "Direitos Fundamentais"));
    }

    #[test]
    fn test_word_level_typo_match() {
        let matcher = FuzzyMatcher::default();
        // "contratos" (9 chars) against the word "contrato": distance 1
        assert!(matcher.is_match("contratos", "o contrato em análise"));
        // short query with a two-edit typo does not match
        assert!(!matcher.is_match("posse", "pofsa"));
    }
}
