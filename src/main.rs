use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use newswire::config::Config;
use newswire::{corpus, output, pipeline};

/// Newswire: per-topic binary text classifiers for Reuters-21578.
///
/// Trains a smoothed multinomial Naive Bayes model for every topic that
/// has both training and test examples, and reports precision, recall,
/// accuracy and F1 for the models clearing the F1 threshold.
#[derive(Parser)]
#[command(name = "newswire", version, about)]
struct Cli {
    /// Path to the corpus directory (containing .sgm files)
    corpus_dir: PathBuf,

    /// Feature-hashing dimension (default: 65536)
    #[arg(long)]
    feature_dim: Option<usize>,

    /// Additive smoothing parameter (default: 1.0)
    #[arg(long)]
    lambda: Option<f64>,

    /// Strict F1 keep-threshold (default: 0.1)
    #[arg(long)]
    threshold: Option<f64>,

    /// Minimum token length kept by the tokenizer (default: 3)
    #[arg(long)]
    min_token_len: Option<usize>,

    /// Worker-pool width (default: one per available core)
    #[arg(long)]
    concurrency: Option<usize>,

    /// Emit the report as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Verbosity is an explicit input: -v takes precedence, then RUST_LOG,
    // then the default filter.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("newswire=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("newswire=info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load()?;
    if let Some(dim) = cli.feature_dim {
        config.feature_dim = dim;
    }
    if let Some(lambda) = cli.lambda {
        config.lambda = lambda;
    }
    if let Some(threshold) = cli.threshold {
        config.f1_threshold = threshold;
    }
    if let Some(min_len) = cli.min_token_len {
        config.min_token_len = min_len;
    }
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency;
    }
    config.validate()?;

    let documents = corpus::extractor::extract_dir(&cli.corpus_dir, config.concurrency).await?;
    let models = pipeline::run(&config, documents).await?;

    if cli.json {
        println!("{}", output::render_json(&models)?);
    } else {
        output::display_models(&models, config.f1_threshold);
    }

    Ok(())
}
