// Hashed term-frequency vectors (the "hashing trick").
//
// Tokens are mapped to a fixed-dimension index space via FNV-1a modulo the
// dimension, accumulating counts. Collisions are accepted as an
// approximation; there is no resolution step. The hash is stable across
// processes and runs, so vectors are reproducible.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable 64-bit FNV-1a hash over the token bytes.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A fixed-dimension sparse vector of non-negative term-frequency counts.
///
/// Two vectors are only comparable if built with the same dimension; the
/// model and evaluator debug-assert this invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    dim: usize,
    counts: HashMap<u32, f64>,
}

impl SparseVector {
    pub fn empty(dim: usize) -> Self {
        Self {
            dim,
            counts: HashMap::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Iterate over the populated (index, count) entries in no particular
    /// order.
    pub fn entries(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.counts.iter().map(|(&index, &count)| (index, count))
    }

    /// Sum of all counts — equals the length of the hashed token sequence.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Maps token sequences into `SparseVector`s of a fixed dimension.
#[derive(Debug, Clone, Copy)]
pub struct FeatureHasher {
    dim: usize,
}

impl FeatureHasher {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Hash a token sequence into a term-frequency vector. Pure: the same
    /// tokens and dimension always produce the same vector.
    pub fn transform<S: AsRef<str>>(&self, tokens: &[S]) -> SparseVector {
        let mut vector = SparseVector::empty(self.dim);
        for token in tokens {
            let index = (fnv1a(token.as_ref().as_bytes()) % self.dim as u64) as u32;
            *vector.counts.entry(index).or_insert(0.0) += 1.0;
        }
        vector
    }
}
