// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (tracing, filtered by RUST_LOG)
// 2. Parse command-line arguments using clap
// 3. Build the real HTTP clients and hand them to the chosen pipeline
// 4. Exit with proper code (0 = success, 1 = failure)
//
// The pipelines themselves live in sync.rs, submit/ and inspect/. They only
// see traits (Fetcher, Submitter, Inspector, Pause), which is what makes
// them testable without the network.
// =============================================================================

mod cli;
mod google;
mod inspect;
mod pacing;
mod sitemap;
mod store;
mod submit;
mod sync;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain ("failed to read ...: No such file")
            let detail = format!("{:#}", e);
            error!(error = %detail, "critical error");
            eprintln!("🛑 Critical error: {}", detail);
            1
        }
    };

    std::process::exit(exit_code);
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("index_pilot=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns the process exit code, or an error for anything unexpected
// (unreadable files, unbuildable HTTP client, ...)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    info!("starting index-pilot v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Sync {
            files,
            sitemap_url,
            path_filter,
            last_run_file,
            batch_size,
            strict,
        } => {
            println!("🔍 Syncing sitemap: {}", sitemap_url);

            let fetcher = sitemap::HttpFetcher::new()?;
            let options = sync::SyncOptions {
                urls_file: &files.urls_file,
                last_run_file: &last_run_file,
                sitemap_url: sitemap_url.as_str(),
                path_filter: &path_filter,
                batch_size,
            };

            let summary = sync::run_sync(&fetcher, &options, chrono::Utc::now()).await?;
            sync::print_summary(&summary, batch_size);

            let failed = matches!(summary.sitemap, sync::SitemapStatus::Unavailable(_));
            if strict && failed {
                Ok(1)
            } else {
                Ok(0)
            }
        }
        Commands::Submit {
            files,
            google,
            batch_size,
            item_delay_ms,
            batch_delay_ms,
            failure_policy,
            notification_type,
            indexing_endpoint,
            success_log,
            error_log,
            json,
        } => {
            println!("🚀 Starting indexing job...");

            let client = google::IndexingClient::new(
                indexing_endpoint.as_str(),
                google.access_token,
                notification_type,
            )?;
            let logs = submit::SubmissionLogs {
                success: store::EventLog::new(success_log),
                error: store::EventLog::new(error_log),
            };
            let config = submit::SubmitConfig {
                batch_size,
                item_delay: Duration::from_millis(item_delay_ms),
                batch_delay: Duration::from_millis(batch_delay_ms),
                policy: failure_policy,
            };

            let code = submit::run_submission(
                &files.urls_file,
                &client,
                &pacing::TokioPause,
                &logs,
                &config,
                json,
            )
            .await?;

            if code == 0 {
                println!("✅ Indexing job completed!");
            }
            Ok(code)
        }
        Commands::Report {
            files,
            google,
            site_url,
            report_file,
            concurrency,
            inspection_endpoint,
            json,
        } => {
            println!("🚀 Starting URL verification...");

            let client = google::InspectionClient::new(
                inspection_endpoint.as_str(),
                google.access_token,
                site_url.to_string(),
            )?;
            let options = inspect::ReportOptions {
                urls_file: &files.urls_file,
                report_file: &report_file,
                concurrency,
                json,
            };

            inspect::run_report(&client, &options).await
        }
    }
}
