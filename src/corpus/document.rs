use std::collections::HashSet;

/// Which partition of the corpus a document belongs to.
///
/// Anything other than a literal `TRAIN` or `TEST` split attribute in the
/// source markup maps to `NotUsed` and is dropped before training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
    NotUsed,
}

impl Split {
    /// Map a raw `LEWISSPLIT` attribute value to a split.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "TRAIN" => Split::Train,
            "TEST" => Split::Test,
            _ => Split::NotUsed,
        }
    }
}

/// A classification document: a split decision, a set of topic labels
/// and the cleaned text content.
///
/// Immutable once constructed; the pipeline shares documents read-only
/// across every per-topic training run.
#[derive(Debug, Clone)]
pub struct Document {
    pub split: Split,
    pub topics: HashSet<String>,
    pub content: String,
}

impl Document {
    pub fn new(split: Split, topics: HashSet<String>, content: String) -> Self {
        Self {
            split,
            topics,
            content,
        }
    }
}
