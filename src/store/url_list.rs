// src/store/url_list.rs
// =============================================================================
// This module reads, merges and rewrites the tracked URL list.
//
// File format:
// - One absolute URL per line, no header
// - Lines are trimmed, blank lines are dropped when reading
//
// Writes replace the whole file: the new content goes to a temporary file
// next to the target and is then renamed over it, so a reader never sees
// a half-written list.
//
// Rust concepts:
// - HashSet: For O(1) "have we seen this URL?" checks
// - Path/AsRef<Path>: Accept &str, String or PathBuf as a file path
// =============================================================================

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

// Result of merging a freshly fetched list into the stored one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Every unique URL, stored ones first, then new ones in fetched order
    pub merged: Vec<String>,
    /// Only the URLs that were not in the stored list before
    pub added: Vec<String>,
}

// Reads the stored URL list
//
// A missing file is an empty list: the first sync creates it.
// Any other I/O error is returned.
pub fn read_urls(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read URL list {}", path.display()))
        }
    };

    Ok(parse_urls(&content))
}

fn parse_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

// Replaces the stored URL list with `urls`, one per line
pub fn write_urls(path: impl AsRef<Path>, urls: &[String]) -> Result<()> {
    let path = path.as_ref();

    // The temp file must live in the same directory, otherwise the final
    // rename could cross filesystems
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
    tmp.write_all(urls.join("\n").as_bytes())?;
    tmp.flush()?;
    tmp.persist(path)
        .with_context(|| format!("failed to replace URL list {}", path.display()))?;

    Ok(())
}

// Merges `fetched` into `existing` without duplicates
//
// Equality is the exact string: "https://a.com/x" and "https://a.com/x/"
// are two different URLs here. No normalization happens.
pub fn merge_urls(existing: &[String], fetched: &[String]) -> MergeResult {
    let known: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::with_capacity(existing.len() + fetched.len());

    let mut merged = Vec::with_capacity(existing.len() + fetched.len());
    let mut added = Vec::new();

    for url in existing.iter().chain(fetched.iter()) {
        if !seen.insert(url.as_str()) {
            continue;
        }
        merged.push(url.clone());
        if !known.contains(url.as_str()) {
            added.push(url.clone());
        }
    }

    MergeResult { merged, added }
}
