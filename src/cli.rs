// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Three subcommands, one per pipeline:
//   index-pilot sync     fetch the sitemap and add new URLs to the list
//   index-pilot submit   send every listed URL to the Indexing API
//   index-pilot report   check index status and write a CSV report
//
// Every option has a default and can also come from an environment
// variable (the `env = ...` attributes), so a cron job can be configured
// without long command lines.
// =============================================================================

use crate::google::{NotificationType, DEFAULT_INDEXING_ENDPOINT, DEFAULT_INSPECTION_ENDPOINT};
use crate::submit::FailurePolicy;
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "index-pilot",
    version,
    about = "Sync a sitemap into a URL list, submit it to Google's Indexing API and report index status",
    long_about = "index-pilot keeps a flat list of site URLs in step with a remote sitemap, \
                  notifies Google's Indexing API about them in rate-limited batches and \
                  writes a CSV report of their Search Console index status."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the sitemap and append new matching URLs to the URL list
    ///
    /// Example: index-pilot sync --sitemap-url https://www.example.com/sitemap.xml
    Sync {
        #[command(flatten)]
        files: FileArgs,

        /// Sitemap to read
        #[arg(long, env = "INDEX_PILOT_SITEMAP_URL")]
        sitemap_url: Url,

        /// Only URLs containing this text are tracked (empty = keep all)
        #[arg(long, env = "INDEX_PILOT_PATH_FILTER", default_value = "/buy-used-cars/")]
        path_filter: String,

        /// File holding the timestamp of the previous sync
        #[arg(long, env = "INDEX_PILOT_LAST_RUN_FILE", default_value = "./last-run.txt")]
        last_run_file: PathBuf,

        /// Batch size used to preview the next submission run
        #[arg(long, env = "INDEX_PILOT_BATCH_SIZE", default_value_t = default_batch_size())]
        batch_size: NonZeroUsize,

        /// Exit with code 1 when the sitemap can't be fetched or parsed
        #[arg(long)]
        strict: bool,
    },

    /// Submit every listed URL to the Indexing API, in batches
    ///
    /// Example: index-pilot submit --batch-size 100 --failure-policy fail-fast
    Submit {
        #[command(flatten)]
        files: FileArgs,

        #[command(flatten)]
        google: GoogleArgs,

        /// Number of URLs per batch
        #[arg(long, env = "INDEX_PILOT_BATCH_SIZE", default_value_t = default_batch_size())]
        batch_size: NonZeroUsize,

        /// Pause between two URLs, in milliseconds
        #[arg(long, env = "INDEX_PILOT_ITEM_DELAY_MS", default_value_t = 1000)]
        item_delay_ms: u64,

        /// Pause between two batches, in milliseconds
        #[arg(long, env = "INDEX_PILOT_BATCH_DELAY_MS", default_value_t = 5000)]
        batch_delay_ms: u64,

        /// Stop at the first failed URL, or log it and keep going
        #[arg(long, env = "INDEX_PILOT_FAILURE_POLICY", value_enum, default_value_t = FailurePolicy::FailFast)]
        failure_policy: FailurePolicy,

        /// Notification sent for every URL
        #[arg(long, value_enum, default_value_t = NotificationType::UrlUpdated)]
        notification_type: NotificationType,

        /// Indexing API base URL
        #[arg(long, env = "INDEX_PILOT_INDEXING_ENDPOINT", default_value = DEFAULT_INDEXING_ENDPOINT)]
        indexing_endpoint: Url,

        /// Log of successful submissions (append-only)
        #[arg(long, env = "INDEX_PILOT_SUCCESS_LOG", default_value = "./submission.log")]
        success_log: PathBuf,

        /// Log of failed submissions (append-only)
        #[arg(long, env = "INDEX_PILOT_ERROR_LOG", default_value = "./error.log")]
        error_log: PathBuf,

        /// Also print the submission report (every outcome) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the index status of every listed URL and write a CSV report
    ///
    /// Example: index-pilot report --site-url https://www.example.com/
    Report {
        #[command(flatten)]
        files: FileArgs,

        #[command(flatten)]
        google: GoogleArgs,

        /// Search Console property the URLs belong to
        #[arg(long, env = "INDEX_PILOT_SITE_URL")]
        site_url: Url,

        /// CSV report to write
        #[arg(long, env = "INDEX_PILOT_REPORT_FILE", default_value = "./indexing_report.csv")]
        report_file: PathBuf,

        /// Maximum requests in flight (default: one per URL)
        #[arg(long, env = "INDEX_PILOT_CONCURRENCY")]
        concurrency: Option<NonZeroUsize>,

        /// Search Console API base URL
        #[arg(long, env = "INDEX_PILOT_INSPECTION_ENDPOINT", default_value = DEFAULT_INSPECTION_ENDPOINT)]
        inspection_endpoint: Url,

        /// Print the results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

// Options shared by every subcommand
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Tracked URL list, one URL per line
    #[arg(long, env = "INDEX_PILOT_URLS_FILE", default_value = "./urls-to-index.txt")]
    pub urls_file: PathBuf,
}

// Credentials for the Google APIs
#[derive(Args, Debug)]
pub struct GoogleArgs {
    /// OAuth2 access token (e.g. from `gcloud auth print-access-token`)
    #[arg(long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,
}

fn default_batch_size() -> NonZeroUsize {
    NonZeroUsize::new(100).unwrap_or(NonZeroUsize::MIN)
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[command(flatten)] do?
//    - It copies the fields of another Args struct into this subcommand
//    - FileArgs is written once and shared by sync, submit and report
//
// 2. Why NonZeroUsize for the batch size?
//    - A batch of 0 URLs makes no sense
//    - clap parses the number and rejects 0 before our code ever runs
//
// 3. Why Url instead of String for endpoints?
//    - clap calls Url::from_str while parsing, so a typo in a URL is
//      reported as a usage error instead of failing halfway through a run
// -----------------------------------------------------------------------------
