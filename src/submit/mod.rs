// src/submit/mod.rs
// =============================================================================
// This module submits the tracked URLs to an indexing service.
//
// Submodules:
// - batch: splits the list into fixed-size batches
// - pipeline: sends each URL one after another, with pauses, and logs
//   every outcome
//
// The remote service is hidden behind the `Submitter` trait, so the
// pipeline can be tested with an in-memory fake.
// =============================================================================

mod batch;
mod pipeline;

pub use batch::create_batches;
pub use pipeline::submit_all;

use crate::pacing::Pause;
use crate::store::{self, EventLog};
use anyhow::Result;
use async_trait::async_trait;
use clap::ValueEnum;
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

// Anything that can notify a remote service about one URL
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, url: &str) -> Result<()>;
}

/// What to do when a single submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Log the error and stop the whole run
    FailFast,
    /// Log the error and keep going with the next URL
    Continue,
}

#[derive(Debug, Clone)]
pub struct SubmitConfig {
    pub batch_size: NonZeroUsize,
    /// Pause between two URLs of the same batch
    pub item_delay: Duration,
    /// Pause between two batches
    pub batch_delay: Duration,
    pub policy: FailurePolicy,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            batch_size: NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN),
            item_delay: Duration::from_secs(1),
            batch_delay: Duration::from_secs(5),
            policy: FailurePolicy::FailFast,
        }
    }
}

// Where successes and failures are appended
#[derive(Debug, Clone)]
pub struct SubmissionLogs {
    pub success: EventLog,
    pub error: EventLog,
}

// Reads the URL list and submits all of it
//
// Returns the process exit code:
//   0 = every URL was submitted
//   1 = the list was empty, or at least one submission failed
pub async fn run_submission(
    urls_file: &Path,
    submitter: &dyn Submitter,
    pause: &dyn Pause,
    logs: &SubmissionLogs,
    config: &SubmitConfig,
    json: bool,
) -> Result<i32> {
    info!(file = %urls_file.display(), "starting URL submission");

    let urls = store::read_urls(urls_file)?;
    if urls.is_empty() {
        error!(file = %urls_file.display(), "no URLs found in the file");
        println!("❌ No URLs found in {}. Exiting...", urls_file.display());
        return Ok(1);
    }

    println!("📄 Found {} URL(s) to submit", urls.len());

    let report = submit_all(&urls, submitter, pause, logs, config).await?;

    // --json: the full report, every outcome included
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Submitted: {}", report.submitted);
    println!("   ❌ Failed: {}", report.failed);
    println!(
        "   📝 Logs: {} / {}",
        logs.success.path().display(),
        logs.error.path().display()
    );
    if report.aborted {
        println!(
            "   ⏹️  Stopped early, {} URL(s) not attempted",
            urls.len() - report.outcomes.len()
        );
    }

    if report.is_success() {
        Ok(0)
    } else {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::RecordingPause;

    struct NeverCalled;

    #[async_trait]
    impl Submitter for NeverCalled {
        async fn submit(&self, url: &str) -> Result<()> {
            panic!("unexpected submission of {url}");
        }
    }

    #[tokio::test]
    async fn test_empty_list_exits_non_zero_without_logging() {
        let dir = tempfile::tempdir().unwrap();
        let urls_file = dir.path().join("urls.txt");
        std::fs::write(&urls_file, "\n  \n").unwrap();

        let logs = SubmissionLogs {
            success: EventLog::new(dir.path().join("submission.log")),
            error: EventLog::new(dir.path().join("error.log")),
        };

        let code = run_submission(
            &urls_file,
            &NeverCalled,
            &RecordingPause::default(),
            &logs,
            &SubmitConfig::default(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(code, 1);
        assert!(!logs.success.path().exists());
        assert!(!logs.error.path().exists());
    }

    #[tokio::test]
    async fn test_missing_list_exits_non_zero() {
        let dir = tempfile::tempdir().unwrap();
        let logs = SubmissionLogs {
            success: EventLog::new(dir.path().join("submission.log")),
            error: EventLog::new(dir.path().join("error.log")),
        };

        let code = run_submission(
            &dir.path().join("missing.txt"),
            &NeverCalled,
            &RecordingPause::default(),
            &logs,
            &SubmitConfig::default(),
            false,
        )
        .await
        .unwrap();

        assert_eq!(code, 1);
    }
}
