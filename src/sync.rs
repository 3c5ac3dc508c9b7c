// src/sync.rs
// =============================================================================
// Sitemap sync: keeps the tracked URL list in step with the sitemap.
//
// Steps:
// 1. Read the stored URL list (missing file = empty list)
// 2. Read the last-run marker to get the lookback window
// 3. Fetch the sitemap and keep the entries matching the path filter
// 4. Merge and deduplicate; rewrite the list only if that changed it
//    (new URLs, or duplicates already sitting in the file)
// 5. Always move the last-run marker to "now"
//
// A sitemap that can't be fetched or parsed does not stop the sync: it
// counts as "nothing fetched". The summary still records that it failed,
// so the caller can treat it as fatal (--strict).
// =============================================================================

use crate::sitemap::{self, Fetcher};
use crate::store;
use crate::submit::create_batches;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SyncOptions<'a> {
    pub urls_file: &'a Path,
    pub last_run_file: &'a Path,
    pub sitemap_url: &'a str,
    /// Only sitemap URLs containing this substring are tracked
    pub path_filter: &'a str,
    /// Used to report how the list will be split on the next submission
    pub batch_size: NonZeroUsize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapStatus {
    Fetched,
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct SyncSummary {
    pub sitemap: SitemapStatus,
    /// Matching entries found in the sitemap
    pub fetched: usize,
    pub added: Vec<String>,
    /// Size of the list after the merge
    pub total: usize,
    /// Fetched entries with a <lastmod> inside the lookback window
    pub recently_modified: usize,
    pub batches: usize,
}

pub async fn run_sync(
    fetcher: &dyn Fetcher,
    options: &SyncOptions<'_>,
    now: DateTime<Utc>,
) -> Result<SyncSummary> {
    let existing = store::read_urls(options.urls_file)?;
    let since = store::read_last_run(options.last_run_file, now);
    debug!(existing = existing.len(), since = %since, "loaded stored state");

    let (entries, sitemap_status) =
        match sitemap::fetch_sitemap_entries(fetcher, options.sitemap_url, options.path_filter).await {
            Ok(entries) => (entries, SitemapStatus::Fetched),
            Err(e) => {
                warn!(url = options.sitemap_url, error = %e, "sitemap fetch failed");
                (Vec::new(), SitemapStatus::Unavailable(e.to_string()))
            }
        };

    let recently_modified = entries
        .iter()
        .filter(|entry| entry.lastmod.is_some_and(|ts| ts >= since))
        .count();
    let fetched: Vec<String> = entries.into_iter().map(|entry| entry.loc).collect();
    info!(count = fetched.len(), "fetched URLs from sitemap");

    let merge = store::merge_urls(&existing, &fetched);

    // Duplicates already in the file count as a change too
    if merge.merged != existing {
        store::write_urls(options.urls_file, &merge.merged)?;
        info!(
            added = merge.added.len(),
            total = merge.merged.len(),
            "updated URL list"
        );
    }

    store::write_last_run(options.last_run_file, now)?;

    let batches = create_batches(&merge.merged, options.batch_size).len();

    Ok(SyncSummary {
        sitemap: sitemap_status,
        fetched: fetched.len(),
        total: merge.merged.len(),
        added: merge.added,
        recently_modified,
        batches,
    })
}

pub fn print_summary(summary: &SyncSummary, batch_size: NonZeroUsize) {
    if let SitemapStatus::Unavailable(reason) = &summary.sitemap {
        println!("⚠️  Sitemap unavailable: {}", reason);
    }

    println!("📥 Fetched {} matching URL(s) from sitemap", summary.fetched);
    if summary.added.is_empty() {
        println!("✅ No new URLs (Total: {})", summary.total);
    } else {
        println!(
            "✅ Added {} new URLs (Total: {})",
            summary.added.len(),
            summary.total
        );
        for url in &summary.added {
            println!("   + {}", url);
        }
    }
    println!(
        "🕒 {} URL(s) modified since the last run",
        summary.recently_modified
    );
    println!(
        "🔄 {} batch(es) of up to {} URLs ready for submission",
        summary.batches, batch_size
    );
}
