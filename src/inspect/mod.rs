// src/inspect/mod.rs
// =============================================================================
// This module builds the indexing status report.
//
// Submodules:
// - status: IndexStatus (from the API) and StatusResult (a report row)
// - inspector: concurrent lookups, failures turned into "Error" rows
// - report: CSV output and terminal summary
//
// The remote service is hidden behind the `Inspector` trait.
// =============================================================================

mod inspector;
mod report;
mod status;

pub use inspector::inspect_all;
pub use report::{print_results, write_report};
pub use status::{IndexStatus, StatusResult};

use crate::store;
use anyhow::Result;
use async_trait::async_trait;
use std::num::NonZeroUsize;
use std::path::Path;
use tracing::{error, info};

// Anything that can look up the index status of one URL
//
// Ok(None) means the service answered but had no index status for it.
#[async_trait]
pub trait Inspector: Send + Sync {
    async fn inspect(&self, url: &str) -> Result<Option<IndexStatus>>;
}

#[derive(Debug, Clone)]
pub struct ReportOptions<'a> {
    pub urls_file: &'a Path,
    pub report_file: &'a Path,
    pub concurrency: Option<NonZeroUsize>,
    pub json: bool,
}

// Reads the URL list, inspects every URL and writes the report
//
// Returns the process exit code:
//   0 = report written (even if some rows are "Error")
//   1 = no URLs to inspect, nothing written
pub async fn run_report(inspector: &dyn Inspector, options: &ReportOptions<'_>) -> Result<i32> {
    info!(file = %options.urls_file.display(), "starting URL verification");

    // Only absolute http(s) lines are inspected
    let urls: Vec<String> = store::read_urls(options.urls_file)?
        .into_iter()
        .filter(|url| url.starts_with("http"))
        .collect();

    if urls.is_empty() {
        error!(file = %options.urls_file.display(), "no URLs found in the file");
        println!("❌ No URLs found in {}.", options.urls_file.display());
        return Ok(1);
    }

    println!("📄 Found {} URL(s) in the file.", urls.len());
    println!("\n🌐 Checking index status...\n");

    let rows = inspect_all(urls, inspector, options.concurrency).await;
    let failed = rows.iter().filter(|row| row.is_error()).count();

    write_report(options.report_file, &rows)?;
    print_results(&rows, options.json)?;

    info!(rows = rows.len(), failed, report = %options.report_file.display(), "report written");
    println!(
        "✅ URL verification completed! Report saved as: {}",
        options.report_file.display()
    );

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct FailingInspector;

    #[async_trait]
    impl Inspector for FailingInspector {
        async fn inspect(&self, _url: &str) -> Result<Option<IndexStatus>> {
            Err(anyhow!("timeout"))
        }
    }

    #[tokio::test]
    async fn test_empty_list_writes_no_report() {
        let dir = tempfile::tempdir().unwrap();
        let urls_file = dir.path().join("urls.txt");
        let report_file = dir.path().join("report.csv");
        std::fs::write(&urls_file, "\nnot-a-url\n").unwrap();

        let options = ReportOptions {
            urls_file: &urls_file,
            report_file: &report_file,
            concurrency: None,
            json: false,
        };
        let code = run_report(&FailingInspector, &options).await.unwrap();

        assert_eq!(code, 1);
        assert!(!report_file.exists());
    }

    #[tokio::test]
    async fn test_failures_still_produce_full_report() {
        let dir = tempfile::tempdir().unwrap();
        let urls_file = dir.path().join("urls.txt");
        let report_file = dir.path().join("report.csv");
        std::fs::write(&urls_file, "https://a.com/1\nhttps://a.com/2\n").unwrap();

        let options = ReportOptions {
            urls_file: &urls_file,
            report_file: &report_file,
            concurrency: None,
            json: true,
        };
        let code = run_report(&FailingInspector, &options).await.unwrap();

        assert_eq!(code, 0);
        let content = std::fs::read_to_string(&report_file).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("https://a.com/1,Error,Error,Error,Error"));
        assert!(content.contains("https://a.com/2,Error,Error,Error,Error"));
    }
}
