// Pipeline orchestration: corpus in, evaluated per-topic models out.
//
// Steps: drop unused documents, find topics with both training and test
// examples, vectorize every document exactly once, assemble per-topic
// labeled buckets, then train and evaluate each topic independently on a
// worker pool. Only models whose F1 strictly exceeds the configured
// threshold are kept.
//
// Per-topic runs share nothing mutable (each owns its buckets and its
// model), so the fan-out is embarrassingly parallel and one degenerate
// topic never aborts the others.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::corpus::{Document, Split};
use crate::error::NewswireError;
use crate::features::{FeatureHasher, SparseVector, Tokenizer};
use crate::model::evaluate::exceeds;
use crate::model::{ConfusionCounts, LabeledExample, Metrics, ModelReport, NaiveBayes};

/// Topics that appear in at least one TRAIN document and at least one
/// TEST document. Anything outside the intersection cannot be both
/// trained and evaluated, so it is skipped entirely.
pub fn eligible_topics(documents: &[Document]) -> BTreeSet<String> {
    let mut training: HashSet<&str> = HashSet::new();
    let mut test: HashSet<&str> = HashSet::new();
    for document in documents {
        let bucket = match document.split {
            Split::Train => &mut training,
            Split::Test => &mut test,
            Split::NotUsed => continue,
        };
        bucket.extend(document.topics.iter().map(String::as_str));
    }
    training
        .intersection(&test)
        .map(|topic| (*topic).to_string())
        .collect()
}

/// Run the full pipeline over an extracted corpus.
///
/// Returns the kept models sorted by topic name, so output is
/// deterministic regardless of worker completion order.
pub async fn run(config: &Config, documents: Vec<Document>) -> Result<Vec<ModelReport>> {
    let documents: Vec<Document> = documents
        .into_iter()
        .filter(|document| document.split != Split::NotUsed)
        .collect();

    let topics = eligible_topics(&documents);
    info!(
        documents = documents.len(),
        topics = topics.len(),
        "Pipeline input ready"
    );
    if topics.is_empty() {
        return Ok(Vec::new());
    }

    let vectorized = vectorize(config, documents).await?;
    let buckets = assemble_buckets(&topics, &vectorized);
    train_all(config, buckets).await
}

/// Tokenize and hash every document once. The vector depends only on the
/// content, never on a topic, so each document is hashed exactly once and
/// shared across all per-topic runs.
async fn vectorize(
    config: &Config,
    documents: Vec<Document>,
) -> Result<Vec<(Document, Arc<SparseVector>)>> {
    let tokenizer = Arc::new(Tokenizer::new(config.min_token_len));
    let hasher = FeatureHasher::new(config.feature_dim);

    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Vectorizing [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let results: Vec<_> = stream::iter(documents.into_iter().enumerate().map(|(index, doc)| {
        let tokenizer = Arc::clone(&tokenizer);
        let pb = pb.clone();
        tokio::task::spawn_blocking(move || {
            let tokens = tokenizer.tokens(&doc);
            let vector = Arc::new(hasher.transform(&tokens));
            pb.inc(1);
            (index, doc, vector)
        })
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;
    pb.finish_and_clear();

    let mut indexed = Vec::new();
    for joined in results {
        indexed.push(joined.context("vectorization worker panicked")?);
    }
    indexed.sort_by_key(|(index, _, _)| *index);

    Ok(indexed
        .into_iter()
        .map(|(_, doc, vector)| (doc, vector))
        .collect())
}

struct TopicBuckets {
    training: Vec<LabeledExample>,
    test: Vec<LabeledExample>,
}

/// Route every (label, vector) pair into its topic's TRAIN or TEST bucket.
/// The label is 1.0 iff the document carries the topic.
fn assemble_buckets(
    topics: &BTreeSet<String>,
    vectorized: &[(Document, Arc<SparseVector>)],
) -> BTreeMap<String, TopicBuckets> {
    let mut buckets: BTreeMap<String, TopicBuckets> = topics
        .iter()
        .map(|topic| {
            (
                topic.clone(),
                TopicBuckets {
                    training: Vec::new(),
                    test: Vec::new(),
                },
            )
        })
        .collect();

    for (document, vector) in vectorized {
        for (topic, bucket) in &mut buckets {
            let label = if document.topics.contains(topic) {
                1.0
            } else {
                0.0
            };
            let example = LabeledExample::new(label, Arc::clone(vector));
            match document.split {
                Split::Train => bucket.training.push(example),
                Split::Test => bucket.test.push(example),
                Split::NotUsed => {}
            }
        }
    }
    buckets
}

/// Fan per-topic training and evaluation out over the worker pool and
/// keep the models that clear the F1 threshold.
async fn train_all(
    config: &Config,
    buckets: BTreeMap<String, TopicBuckets>,
) -> Result<Vec<ModelReport>> {
    let pb = ProgressBar::new(buckets.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Training [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let lambda = config.lambda;
    let dim = config.feature_dim;
    let results: Vec<_> = stream::iter(buckets.into_iter().map(|(topic, bucket)| {
        let pb = pb.clone();
        tokio::task::spawn_blocking(move || {
            let report = train_and_evaluate(topic, &bucket, lambda, dim);
            pb.inc(1);
            report
        })
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;
    pb.finish_and_clear();

    let mut kept = Vec::new();
    for joined in results {
        match joined.context("training worker panicked")? {
            Ok(report) => {
                if exceeds(report.metrics.f1, config.f1_threshold) {
                    kept.push(report);
                } else {
                    debug!(topic = %report.topic, f1 = ?report.metrics.f1, "Model below threshold");
                }
            }
            // Should not happen after eligibility filtering, but a topic
            // with no training examples is skipped, not fatal.
            Err((topic, NewswireError::EmptyTrainingSet)) => {
                warn!(topic = %topic, "Skipping topic: training set is empty");
            }
            Err((topic, error)) => {
                warn!(topic = %topic, error = %error, "Skipping topic");
            }
        }
    }

    kept.sort_by(|a, b| a.topic.cmp(&b.topic));
    info!(models = kept.len(), "Pipeline complete");
    Ok(kept)
}

/// Train on the TRAIN bucket, evaluate on the TEST bucket.
fn train_and_evaluate(
    topic: String,
    bucket: &TopicBuckets,
    lambda: f64,
    dim: usize,
) -> Result<ModelReport, (String, NewswireError)> {
    let classifier = match NaiveBayes::train(&bucket.training, lambda, dim) {
        Ok(classifier) => classifier,
        Err(error) => return Err((topic, error)),
    };
    let counts = ConfusionCounts::tally(&classifier, &bucket.test);
    let metrics = Metrics::from_counts(&counts);
    Ok(ModelReport {
        topic,
        classifier,
        metrics,
    })
}
