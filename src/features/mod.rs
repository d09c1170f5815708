// Feature extraction — tokenization and hashed term-frequency vectors.

pub mod hasher;
pub mod tokenizer;

pub use hasher::{FeatureHasher, SparseVector};
pub use tokenizer::Tokenizer;
