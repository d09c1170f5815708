// Unit tests for tokenization and feature hashing.
//
// Tokenizer output must be deterministic, lower-case, and free of short
// tokens and stopwords. The hasher must be a pure function of the token
// sequence and dimension, with counts that account for every token.

use std::collections::HashSet;

use newswire::corpus::{Document, Split};
use newswire::features::{FeatureHasher, Tokenizer};

fn document(content: &str) -> Document {
    Document::new(Split::NotUsed, HashSet::new(), content.to_string())
}

// ============================================================
// Tokenizer
// ============================================================

#[test]
fn tokens_are_lowercase() {
    let tokenizer = Tokenizer::default();
    let tokens = tokenizer.tokens(&document("Wheat Prices ROSE Sharply"));
    assert!(tokens.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));
}

#[test]
fn no_token_is_shorter_than_the_minimum() {
    let tokenizer = Tokenizer::new(4);
    let tokens = tokenizer.tokenize("a ox the corn wheat at");
    assert!(tokens.iter().all(|t| t.chars().count() >= 4));
    assert!(tokens.contains(&"corn".to_string()));
    assert!(tokens.contains(&"wheat".to_string()));
}

#[test]
fn stopwords_are_filtered() {
    let tokenizer = Tokenizer::default();
    // Mirrors the corpus's own smoke test: "hello" is a stopword, "bar"
    // survives the stopword list but is kept only at min length <= 3.
    assert_eq!(tokenizer.tokenize("hello bar"), vec!["bar"]);
}

#[test]
fn punctuation_fragments_produce_no_tokens() {
    let tokenizer = Tokenizer::default();
    assert!(tokenizer.tokenize("--- ... ;;; !!!").is_empty());
}

#[test]
fn tokenizing_twice_yields_identical_sequences() {
    let tokenizer = Tokenizer::default();
    let doc = document("Wheat prices rose 4.2 pct, corn fell sharply.");
    assert_eq!(tokenizer.tokens(&doc), tokenizer.tokens(&doc));
}

#[test]
fn empty_content_yields_no_tokens() {
    let tokenizer = Tokenizer::default();
    assert!(tokenizer.tokenize("").is_empty());
}

// ============================================================
// FeatureHasher
// ============================================================

#[test]
fn same_tokens_hash_to_the_same_vector() {
    let hasher = FeatureHasher::new(65536);
    let tokens = ["wheat", "corn", "barley", "wheat"];
    assert_eq!(hasher.transform(&tokens), hasher.transform(&tokens));
}

#[test]
fn vector_total_equals_token_count() {
    let hasher = FeatureHasher::new(256);
    let tokens: Vec<String> = (0..500).map(|i| format!("word{i}")).collect();
    let vector = hasher.transform(&tokens);
    assert_eq!(vector.total(), 500.0);
}

#[test]
fn collisions_accumulate_counts_instead_of_dropping_tokens() {
    // Dimension 1 forces every token into the same bucket.
    let hasher = FeatureHasher::new(1);
    let vector = hasher.transform(&["wheat", "corn", "barley"]);
    let entries: Vec<_> = vector.entries().collect();
    assert_eq!(entries, vec![(0, 3.0)]);
}

#[test]
fn vectors_carry_their_dimension() {
    let hasher = FeatureHasher::new(1024);
    let vector = hasher.transform(&["wheat"]);
    assert_eq!(vector.dim(), 1024);
}

#[test]
fn tokenize_then_hash_is_reproducible_end_to_end() {
    let tokenizer = Tokenizer::default();
    let hasher = FeatureHasher::new(65536);
    let doc = document("Wheat and corn prices rose; traders expect more.");
    let first = hasher.transform(&tokenizer.tokens(&doc));
    let second = hasher.transform(&tokenizer.tokens(&doc));
    assert_eq!(first, second);
}
