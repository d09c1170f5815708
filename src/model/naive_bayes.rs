// Multinomial Naive Bayes with additive (Laplace) smoothing.
//
// Binary one-vs-rest classifier over hashed term-frequency vectors.
// Everything is kept in log space: underflow would be immediate with
// 65536-dimensional products of small probabilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::NewswireError;
use crate::features::SparseVector;
use crate::model::LabeledExample;

/// Internal class index for the negative (0.0) and positive (1.0) labels.
const NEG: usize = 0;
const POS: usize = 1;

/// A trained smoothed multinomial Naive Bayes binary classifier.
///
/// Holds log-priors and per-feature-index conditional log-likelihoods for
/// the two classes. Feature indices never seen in training share a single
/// smoothed fallback likelihood per class, so only populated indices are
/// stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayes {
    dim: usize,
    log_prior: [f64; 2],
    log_likelihood: [HashMap<u32, f64>; 2],
    log_unseen: [f64; 2],
}

impl NaiveBayes {
    /// Train a classifier on labeled examples with smoothing parameter
    /// `lambda` over feature dimension `dim`.
    ///
    /// Per class c: prior = |c| / total, and for each feature index i
    /// p(i | c) = (lambda + count(i, c)) / (lambda * dim + count(_, c)).
    /// The smoothing term guarantees no division by zero even for a class
    /// whose examples are all-zero vectors.
    pub fn train(
        examples: &[LabeledExample],
        lambda: f64,
        dim: usize,
    ) -> Result<Self, NewswireError> {
        if examples.is_empty() {
            return Err(NewswireError::EmptyTrainingSet);
        }

        let mut class_counts = [0u64; 2];
        let mut feature_sums: [HashMap<u32, f64>; 2] = [HashMap::new(), HashMap::new()];
        let mut feature_totals = [0.0f64; 2];

        for example in examples {
            debug_assert_eq!(example.features.dim(), dim, "mixed feature dimensions");
            let class = class_of(example.label);
            class_counts[class] += 1;
            for (index, count) in example.features.entries() {
                *feature_sums[class].entry(index).or_insert(0.0) += count;
                feature_totals[class] += count;
            }
        }

        let total = examples.len() as f64;
        // A class with no examples gets prior ln(0) = -inf and is never
        // predicted, which is the only sensible answer for it.
        let log_prior = [
            (class_counts[NEG] as f64 / total).ln(),
            (class_counts[POS] as f64 / total).ln(),
        ];

        let mut log_likelihood: [HashMap<u32, f64>; 2] = [HashMap::new(), HashMap::new()];
        let mut log_unseen = [0.0f64; 2];
        for class in [NEG, POS] {
            let denominator = lambda * dim as f64 + feature_totals[class];
            log_unseen[class] = (lambda / denominator).ln();
            log_likelihood[class] = feature_sums[class]
                .iter()
                .map(|(&index, &sum)| (index, ((lambda + sum) / denominator).ln()))
                .collect();
        }

        Ok(Self {
            dim,
            log_prior,
            log_likelihood,
            log_unseen,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Predict the label for a feature vector: the class with the higher
    /// log-posterior score. Ties predict 0.0 — an explicit policy, not
    /// floating-point chance.
    pub fn predict(&self, features: &SparseVector) -> f64 {
        debug_assert_eq!(features.dim(), self.dim, "mixed feature dimensions");
        let negative = self.score(NEG, features);
        let positive = self.score(POS, features);
        if positive > negative {
            1.0
        } else {
            0.0
        }
    }

    /// Log-prior plus the dot product of feature counts with the class's
    /// per-index conditional log-likelihoods. An all-zero vector scores
    /// just the log-prior.
    fn score(&self, class: usize, features: &SparseVector) -> f64 {
        let mut score = self.log_prior[class];
        for (index, count) in features.entries() {
            let log_conditional = self.log_likelihood[class]
                .get(&index)
                .copied()
                .unwrap_or(self.log_unseen[class]);
            score += count * log_conditional;
        }
        score
    }
}

fn class_of(label: f64) -> usize {
    if label == 1.0 {
        POS
    } else {
        NEG
    }
}
