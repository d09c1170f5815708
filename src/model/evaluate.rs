// Confusion-matrix evaluation of a trained classifier.
//
// Degenerate confusion counts make precision, recall or F1 undefined
// (0/0). Those stay explicitly undefined (`None`) rather than being
// coerced to 0 or 1, and an undefined metric fails any positive
// threshold.

use serde::Serialize;

use crate::model::{LabeledExample, NaiveBayes};

/// Outcome counts relative to label 1.0 = "topic present", accumulated by
/// scanning a test set once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: u64,
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
}

impl ConfusionCounts {
    /// Predict every test example and classify each outcome.
    pub fn tally(model: &NaiveBayes, test: &[LabeledExample]) -> Self {
        let mut counts = Self::default();
        for example in test {
            let predicted = model.predict(&example.features);
            match (predicted == 1.0, example.label == 1.0) {
                (true, true) => counts.true_positives += 1,
                (false, false) => counts.true_negatives += 1,
                (true, false) => counts.false_positives += 1,
                (false, true) => counts.false_negatives += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }
}

/// Derived quality metrics. `None` marks a metric whose defining ratio is
/// 0/0 for these counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metrics {
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub accuracy: Option<f64>,
    pub f1: Option<f64>,
}

impl Metrics {
    pub fn from_counts(counts: &ConfusionCounts) -> Self {
        let tp = counts.true_positives as f64;
        let tn = counts.true_negatives as f64;
        let fp = counts.false_positives as f64;
        let fne = counts.false_negatives as f64;

        Self {
            precision: ratio(tp, tp + fp),
            recall: ratio(tp, tp + fne),
            accuracy: ratio(tp + tn, counts.total() as f64),
            f1: ratio(2.0 * tp, 2.0 * tp + fp + fne),
        }
    }
}

/// An undefined metric never clears a threshold; a defined one must
/// strictly exceed it.
pub fn exceeds(metric: Option<f64>, threshold: f64) -> bool {
    metric.is_some_and(|value| value > threshold)
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}
