// Reuters-21578 corpus extraction.
//
// The corpus ships as a directory of .sgm files, each holding many
// pseudo-SGML records terminated by a closing </REUTERS...> tag. A record
// carries a LEWISSPLIT attribute, an optional <TOPICS> block of <D>topic</D>
// entries, and text inside <TITLE> and/or <BODY> tags.
//
// Extraction is I/O-bound, so files are fanned out over a blocking worker
// pool and the per-file document lists are concatenated in file order —
// results never depend on which worker finished first.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use regex_lite::Regex;
use tracing::{debug, info};

use super::document::{Document, Split};
use crate::error::NewswireError;

fn split_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"LEWISSPLIT="(.*?)""#).expect("valid split pattern"))
}

fn topics_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<TOPICS>(.*?)</TOPICS>").expect("valid topics pattern"))
}

fn listing_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<D>(.*?)</D>").expect("valid listing pattern"))
}

fn text_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<TITLE>(.*?)</TITLE>|<BODY>(.*?)</BODY>").expect("valid text pattern")
    })
}

fn spaces_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r" +").expect("valid spaces pattern"))
}

/// SGML entity serializations and their decoded characters, applied in order.
const META_CHARS: [(&str, &str); 5] = [
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Wire-service noise stripped from document text: the literal REUTER
/// sign-off followed by an ETX control character, in both its raw entity
/// form and its decoded form.
const NOISE_TOKENS: [&str; 4] = [
    "REUTER &#3;",
    "Reuter &#3;",
    "REUTER \u{3}",
    "Reuter \u{3}",
];

/// Extract all documents from the .sgm files in the given directory.
///
/// Files are processed in parallel (one blocking task per file, capped at
/// `concurrency`), with per-file results merged back in file order.
pub async fn extract_dir(dir: &Path, concurrency: usize) -> Result<Vec<Document>> {
    let files = sgm_files(dir)?;
    info!(files = files.len(), dir = %dir.display(), "Extracting corpus");

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let results: Vec<_> = stream::iter(files.into_iter().enumerate().map(|(index, path)| {
        let pb = pb.clone();
        tokio::task::spawn_blocking(move || {
            let docs = extract_file(&path)
                .with_context(|| format!("failed to extract {}", path.display()))?;
            pb.inc(1);
            Ok::<_, anyhow::Error>((index, docs))
        })
    }))
    .buffer_unordered(concurrency)
    .collect()
    .await;
    pb.finish_and_clear();

    // Partition-then-concatenate: restore the original file order before
    // flattening so the output is deterministic.
    let mut indexed = Vec::new();
    for joined in results {
        indexed.push(joined.context("extraction worker panicked")??);
    }
    indexed.sort_by_key(|(index, _)| *index);

    let documents: Vec<Document> = indexed.into_iter().flat_map(|(_, docs)| docs).collect();
    info!(documents = documents.len(), "Corpus extracted");
    Ok(documents)
}

/// List the .sgm files in `dir`, sorted by name for deterministic ordering.
fn sgm_files(dir: &Path) -> Result<Vec<PathBuf>, NewswireError> {
    let entries = std::fs::read_dir(dir).map_err(|_| {
        NewswireError::InvalidInput(format!("path {} does not exist", dir.display()))
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "sgm"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(NewswireError::InvalidInput(format!(
            "no .sgm files in {}",
            dir.display()
        )));
    }
    Ok(files)
}

/// Extract every record in a single .sgm file.
///
/// Lines are accumulated (joined by a single space) until the closing
/// </REUTERS tag is seen, then the buffered record is parsed and the
/// buffer reset.
pub fn extract_file(path: &Path) -> Result<Vec<Document>, NewswireError> {
    let raw = std::fs::read_to_string(path)?;

    let mut documents = Vec::new();
    let mut buffer = String::with_capacity(1024);
    for line in raw.lines() {
        if line.contains("</REUTERS") {
            documents.push(parse_record(&buffer)?);
            buffer.clear();
        } else {
            buffer.push_str(line);
            buffer.push(' ');
        }
    }

    debug!(path = %path.display(), records = documents.len(), "File extracted");
    Ok(documents)
}

/// Parse one buffered record into a Document: split attribute, topic set
/// and cleaned text, each extracted in a single pass over the buffer.
///
/// The source format guarantees exactly one LEWISSPLIT attribute per
/// record; zero or several distinct values is a data-integrity violation
/// and fails the whole extraction.
pub fn parse_record(buffer: &str) -> Result<Document, NewswireError> {
    let split = parse_split(buffer)?;
    let topics = parse_topics(buffer);
    let content = clean_content(&parse_text(buffer));
    Ok(Document::new(split, topics, content))
}

fn parse_split(buffer: &str) -> Result<Split, NewswireError> {
    let values: HashSet<&str> = split_pattern()
        .captures_iter(buffer)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    match values.len() {
        0 => Err(NewswireError::InvalidInput(
            "record has no LEWISSPLIT attribute".to_string(),
        )),
        1 => Ok(Split::from_attr(values.iter().next().copied().unwrap_or(""))),
        n => Err(NewswireError::InvalidInput(format!(
            "record has {n} distinct LEWISSPLIT attributes"
        ))),
    }
}

/// Collect every <D>topic</D> entry inside <TOPICS> blocks. Duplicates
/// collapse into the set; an absent or empty block yields an empty set.
fn parse_topics(buffer: &str) -> HashSet<String> {
    let mut topics = HashSet::new();
    for block in topics_pattern().captures_iter(buffer) {
        let Some(inner) = block.get(1) else { continue };
        for entry in listing_pattern().captures_iter(inner.as_str()) {
            if let Some(topic) = entry.get(1) {
                topics.insert(topic.as_str().to_string());
            }
        }
    }
    topics
}

/// Concatenate <TITLE> and <BODY> fragments in document order, separated
/// by ". ". Duplicate fragments are collapsed, keeping the first.
fn parse_text(buffer: &str) -> String {
    let mut seen = HashSet::new();
    let mut fragments = Vec::new();
    for caps in text_pattern().captures_iter(buffer) {
        let fragment = caps.get(1).or_else(|| caps.get(2));
        if let Some(fragment) = fragment {
            if seen.insert(fragment.as_str()) {
                fragments.push(fragment.as_str());
            }
        }
    }
    fragments.join(". ")
}

/// Decode the five SGML meta-character entities, normalize whitespace and
/// strip the REUTER sign-off noise.
fn clean_content(raw: &str) -> String {
    let mut content = raw.to_string();
    for (entity, replacement) in META_CHARS {
        content = content.replace(entity, replacement);
    }
    content = content.replace('\t', " ");
    content = spaces_pattern().replace_all(&content, " ").into_owned();
    for noise in NOISE_TOKENS {
        content = content.replace(noise, "");
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_content_decodes_entities() {
        assert_eq!(clean_content("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(clean_content("&quot;hi&apos;"), "\"hi'");
    }

    #[test]
    fn clean_content_collapses_whitespace() {
        assert_eq!(clean_content("a\t\tb   c"), "a b c");
    }

    #[test]
    fn clean_content_strips_wire_noise() {
        assert_eq!(clean_content("wheat rose REUTER &#3;"), "wheat rose ");
        assert_eq!(clean_content("wheat rose Reuter \u{3}"), "wheat rose ");
    }

    #[test]
    fn parse_text_joins_title_and_body_in_order() {
        let buffer = "<TITLE>GRAIN UP</TITLE> junk <BODY>wheat rose today</BODY>";
        assert_eq!(parse_text(buffer), "GRAIN UP. wheat rose today");
    }

    #[test]
    fn parse_split_requires_exactly_one_attribute() {
        assert!(parse_split("no attributes here").is_err());
        assert!(parse_split(r#"LEWISSPLIT="TRAIN" LEWISSPLIT="TEST""#).is_err());
        assert_eq!(parse_split(r#"LEWISSPLIT="TRAIN""#).unwrap(), Split::Train);
    }

    #[test]
    fn parse_split_collapses_identical_duplicates() {
        let buffer = r#"LEWISSPLIT="TEST" more LEWISSPLIT="TEST""#;
        assert_eq!(parse_split(buffer).unwrap(), Split::Test);
    }

    #[test]
    fn parse_topics_handles_missing_block() {
        assert!(parse_topics("no topics at all").is_empty());
    }

    #[test]
    fn parse_topics_collects_all_entries() {
        let buffer = "<TOPICS><D>grain</D><D>wheat</D><D>grain</D></TOPICS>";
        let topics = parse_topics(buffer);
        assert_eq!(topics.len(), 2);
        assert!(topics.contains("grain"));
        assert!(topics.contains("wheat"));
    }
}
