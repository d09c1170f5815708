use std::env;
use std::thread;

use anyhow::Result;

/// Default feature-vector dimension. Larger dimensions lower the hash
/// collision rate at the cost of memory in the trained conditionals.
pub const DEFAULT_FEATURE_DIM: usize = 65536;

/// Default additive (Laplace) smoothing parameter.
pub const DEFAULT_LAMBDA: f64 = 1.0;

/// Default F1 keep-threshold: models at or below this are dropped.
pub const DEFAULT_F1_THRESHOLD: f64 = 0.1;

/// Default minimum token length kept by the tokenizer.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;

/// Central configuration loaded from environment variables.
///
/// Every knob has a working default, so `newswire <corpus-dir>` runs with
/// no configuration at all. The .env file is loaded automatically at
/// startup via dotenvy; CLI flags override whatever the environment says.
#[derive(Debug, Clone)]
pub struct Config {
    /// Feature-hashing dimension, fixed for the lifetime of a run.
    pub feature_dim: usize,
    /// Additive smoothing parameter for Naive Bayes training.
    pub lambda: f64,
    /// Strict F1 threshold a model must exceed to be reported.
    pub f1_threshold: f64,
    /// Tokens shorter than this are discarded.
    pub min_token_len: usize,
    /// Worker-pool width for extraction, vectorization and training.
    pub concurrency: usize,
}

impl Config {
    /// Load configuration from `NEWSWIRE_*` environment variables,
    /// falling back to defaults for anything unset or unparseable.
    pub fn load() -> Result<Self> {
        Ok(Self {
            feature_dim: env_or("NEWSWIRE_FEATURE_DIM", DEFAULT_FEATURE_DIM),
            lambda: env_or("NEWSWIRE_LAMBDA", DEFAULT_LAMBDA),
            f1_threshold: env_or("NEWSWIRE_F1_THRESHOLD", DEFAULT_F1_THRESHOLD),
            min_token_len: env_or("NEWSWIRE_MIN_TOKEN_LEN", DEFAULT_MIN_TOKEN_LEN),
            concurrency: env_or("NEWSWIRE_CONCURRENCY", default_concurrency()),
        })
    }

    /// Sanity-check the knobs before the pipeline starts.
    pub fn validate(&self) -> Result<()> {
        if self.feature_dim == 0 {
            anyhow::bail!("feature dimension must be at least 1");
        }
        if self.lambda <= 0.0 {
            anyhow::bail!("smoothing lambda must be positive (got {})", self.lambda);
        }
        if self.concurrency == 0 {
            anyhow::bail!("concurrency must be at least 1");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feature_dim: DEFAULT_FEATURE_DIM,
            lambda: DEFAULT_LAMBDA,
            f1_threshold: DEFAULT_F1_THRESHOLD,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            concurrency: default_concurrency(),
        }
    }
}

/// One worker per available core.
fn default_concurrency() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.feature_dim, 65536);
        assert_eq!(config.lambda, 1.0);
        assert_eq!(config.f1_threshold, 0.1);
        assert_eq!(config.min_token_len, 3);
        assert!(config.concurrency >= 1);
    }

    #[test]
    fn validate_rejects_zero_dimension() {
        let config = Config {
            feature_dim: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_nonpositive_lambda() {
        let config = Config {
            lambda: 0.0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
