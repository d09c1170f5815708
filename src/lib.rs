// Newswire: per-topic binary text classification for the Reuters-21578 corpus.
//
// This is the library root. Each module corresponds to a major stage
// of the classification pipeline.

pub mod config;
pub mod corpus;
pub mod error;
pub mod features;
pub mod model;
pub mod output;
pub mod pipeline;
