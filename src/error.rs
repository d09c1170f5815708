// Error taxonomy for the classification pipeline.
//
// Corpus-level problems abort the whole run — the input is static, so a
// retry cannot help. Per-topic problems are isolated by the pipeline so
// one degenerate topic never takes down the others.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NewswireError {
    /// The corpus path is missing, contains no .sgm files, or a record
    /// violates the format (e.g. zero or multiple LEWISSPLIT attributes).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Training was invoked with zero examples. Fatal for that topic
    /// only; the pipeline skips it and continues.
    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
