//! Corpus loading from annotated JSON files.
//!
//! Accepts a single file or a directory tree. `.json` files hold either one
//! document or an array of documents; `.jsonl` / `.ndjson` files hold one
//! document per line. Documents that fail to parse are skipped with a
//! warning so a single bad record does not take down the whole corpus.

use super::MemoryCorpus;
use crate::models::Document;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File extensions recognized as corpus files.
const CORPUS_EXTENSIONS: &[&str] = &["json", "jsonl", "ndjson"];

/// Load every document found at `path` into an in-memory corpus.
pub fn load_corpus(path: &Path) -> Result<MemoryCorpus> {
    if !path.exists() {
        anyhow::bail!("Corpus path does not exist: {}", path.display());
    }

    let files = corpus_files(path)?;
    debug!("Found {} corpus files under {}", files.len(), path.display());

    let mut documents = Vec::new();
    for file in &files {
        let loaded = load_file(file)?;
        debug!("Loaded {} documents from {}", loaded.len(), file.display());
        documents.extend(loaded);
    }

    info!(
        "Loaded {} documents from {} file(s)",
        documents.len(),
        files.len()
    );
    Ok(MemoryCorpus::new(documents))
}

/// Corpus files under `path`, in a stable (sorted) order.
fn corpus_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name().to_str()));

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", path.display()))?;
        if entry.file_type().is_file() && has_corpus_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|n| n.starts_with('.'))
}

fn has_corpus_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CORPUS_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Parse one corpus file.
fn load_file(path: &Path) -> Result<Vec<Document>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json(&content, path)
    } else {
        Ok(parse_json_lines(&content, path))
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Vec<Document>> {
    let value: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse corpus file: {}", path.display()))?;

    let records = match value {
        Value::Array(items) => items,
        other => vec![other],
    };

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Skipping record {} in {}: {}", i, path.display(), e);
                None
            }
        })
        .collect())
}

fn parse_json_lines(content: &str, path: &Path) -> Vec<Document> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(i, line)| match serde_json::from_str(line) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("Skipping line {} in {}: {}", i + 1, path.display(), e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_json_lines_skips_bad_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("articles.jsonl");
        fs::write(
            &path,
            "{\"title\": \"one\", \"brands_mentioned\": [\"nike\"]}\n\nnot json\n{\"title\": \"two\"}\n",
        )
        .unwrap();

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn test_load_json_array_and_single_object() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("batch.json"),
            r#"[{"title": "a"}, {"title": "b"}, {"adjectives": "not-a-list"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("single.json"), r#"{"title": "c"}"#).unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 4);
    }

    #[test]
    fn test_irregular_list_fields_keep_the_article() {
        use crate::corpus::{CorpusQuery, Filter, GroupKey};
        use crate::models::Field;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("irregular.jsonl");
        fs::write(
            &path,
            concat!(
                "{\"brands_mentioned\": [\"nike\"], \"year\": 2020, \"adjectives\": \"fast\"}\n",
                "{\"brands_mentioned\": \"puma\", \"year\": 2021, \"adjectives\": [\"bold\"]}\n",
                "{\"brands_mentioned\": [\"nike\"], \"year\": 2021.0, \"adjectives\": [\"bold\"]}\n",
            ),
        )
        .unwrap();

        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 3);

        let nike = Filter::new().contains(Field::BrandsMentioned, "nike");
        assert_eq!(
            corpus.aggregate(GroupKey::Year, &nike).unwrap(),
            vec![(2020, 1), (2021, 1)]
        );

        let puma_bold = Filter::new()
            .contains(Field::BrandsMentioned, "puma")
            .contains(Field::Adjectives, "bold");
        assert_eq!(corpus.find(&puma_bold, &[]).unwrap().count(), 1);

        let fast = Filter::new().contains(Field::Adjectives, "fast");
        assert_eq!(corpus.find(&fast, &[]).unwrap().count(), 1);
    }

    #[test]
    fn test_directory_walk_ignores_hidden_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2021");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("march.jsonl"), "{\"title\": \"x\"}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "{\"title\": \"y\"}\n").unwrap();

        let hidden = dir.path().join(".cache");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("old.jsonl"), "{\"title\": \"z\"}\n").unwrap();

        let corpus = load_corpus(dir.path()).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn test_load_bundled_fixture() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/articles.jsonl");
        let corpus = load_corpus(&path).unwrap();
        assert_eq!(corpus.len(), 8);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(load_corpus(&dir.path().join("absent.jsonl")).is_err());
    }

    #[test]
    fn test_invalid_json_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "[{").unwrap();
        assert!(load_corpus(&path).is_err());
    }
}
