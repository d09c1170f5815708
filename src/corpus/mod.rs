// Corpus handling — Reuters-21578 record extraction.

pub mod document;
pub mod extractor;

pub use document::{Document, Split};
