// Word tokenization for feature extraction.
//
// Lower-cases the text, pulls out word characters, and drops both very
// short tokens and common English stop words. Deterministic and pure:
// the same content always yields the same token sequence.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

use crate::corpus::Document;

fn word_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("valid word pattern"))
}

/// Tokenizer with a minimum-length filter and an English stopword list.
pub struct Tokenizer {
    min_token_len: usize,
    stopwords: HashSet<String>,
}

impl Tokenizer {
    pub fn new(min_token_len: usize) -> Self {
        Self {
            min_token_len,
            stopwords: get(LANGUAGE::English).into_iter().collect(),
        }
    }

    /// Tokenize a document's content.
    pub fn tokens(&self, document: &Document) -> Vec<String> {
        self.tokenize(&document.content)
    }

    /// Tokenize raw text: lowercase, extract word runs, drop stopwords
    /// and anything shorter than the minimum length.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        word_pattern()
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() >= self.min_token_len)
            .filter(|token| !self.stopwords.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_TOKEN_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_lowercased() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("Wheat CORN"), vec!["wheat", "corn"]);
    }

    #[test]
    fn short_tokens_are_dropped() {
        let tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize("ox at wheat"), vec!["wheat"]);
    }

    #[test]
    fn stopwords_are_dropped() {
        let tokenizer = Tokenizer::default();
        // "hello" is on the ISO English stopword list, "bar" is not.
        assert_eq!(tokenizer.tokenize("hello bar"), vec!["bar"]);
    }

    #[test]
    fn punctuation_only_fragments_vanish() {
        let tokenizer = Tokenizer::default();
        assert!(tokenizer.tokenize("... --- !!!").is_empty());
    }

    #[test]
    fn tokenization_is_deterministic() {
        let tokenizer = Tokenizer::default();
        let text = "Wheat prices rose 4.2 pct; corn fell.";
        assert_eq!(tokenizer.tokenize(text), tokenizer.tokenize(text));
    }
}
