// Classification models — Naive Bayes training and evaluation.

pub mod evaluate;
pub mod naive_bayes;

pub use evaluate::{ConfusionCounts, Metrics};
pub use naive_bayes::NaiveBayes;

use std::sync::Arc;

use serde::Serialize;

use crate::features::SparseVector;

/// A feature vector paired with a binary topic-membership label
/// (1.0 = topic present, 0.0 = absent).
///
/// The vector is shared: hashing does not depend on the topic, so every
/// per-topic training run reuses the same document vectors read-only.
#[derive(Debug, Clone)]
pub struct LabeledExample {
    pub label: f64,
    pub features: Arc<SparseVector>,
}

impl LabeledExample {
    pub fn new(label: f64, features: Arc<SparseVector>) -> Self {
        debug_assert!(label == 0.0 || label == 1.0, "label must be 0.0 or 1.0");
        Self { label, features }
    }
}

/// A trained per-topic classifier with its held-out evaluation metrics.
/// Produced exactly once per eligible topic; immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport {
    pub topic: String,
    #[serde(skip)]
    pub classifier: NaiveBayes,
    pub metrics: Metrics,
}
