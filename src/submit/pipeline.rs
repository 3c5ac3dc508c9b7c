// src/submit/pipeline.rs
// =============================================================================
// The rate-limited submission loop.
//
// For every URL, in order:
// 1. Ask the Submitter to submit it (one request, no retry)
// 2. Success -> append "<url> - Success" to the success log
//    Failure -> append "<url> - <error>" to the error log, then either stop
//               everything (FailFast) or move on (Continue)
// 3. Pause `item_delay` before the next URL, even when that URL starts a
//    new batch
// Between batches, pause `batch_delay` on top of that, so a batch boundary
// waits item_delay then batch_delay.
//
// There is no trailing pause after the very last URL. Requests are never
// sent concurrently: the pauses are the only throttle.
// =============================================================================

use super::{create_batches, FailurePolicy, SubmissionLogs, SubmitConfig, Submitter};
use crate::pacing::Pause;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info};

// What happened to one URL
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub url: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionReport {
    pub submitted: usize,
    pub failed: usize,
    /// True when a failure stopped the run before the end of the list
    pub aborted: bool,
    pub outcomes: Vec<SubmissionOutcome>,
}

impl SubmissionReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && !self.aborted
    }
}

// Submits `urls` in batches
//
// Errors are only returned when a log file can't be written. Failed
// submissions are reported through the SubmissionReport.
pub async fn submit_all(
    urls: &[String],
    submitter: &dyn Submitter,
    pause: &dyn Pause,
    logs: &SubmissionLogs,
    config: &SubmitConfig,
) -> Result<SubmissionReport> {
    let batches = create_batches(urls, config.batch_size);
    let batch_count = batches.len();
    let mut report = SubmissionReport::default();

    'batches: for (batch_index, batch) in batches.into_iter().enumerate() {
        println!(
            "📤 Processing batch {}/{} of {} URLs...",
            batch_index + 1,
            batch_count,
            batch.len()
        );

        for (item_index, url) in batch.iter().enumerate() {
            let result = submitter.submit(url).await;
            let timestamp = Utc::now();

            match result {
                Ok(()) => {
                    logs.success.append(timestamp, url, "Success")?;
                    println!("✅ Submitted: {}", url);
                    report.submitted += 1;
                    report.outcomes.push(SubmissionOutcome {
                        url: url.clone(),
                        success: true,
                        error: None,
                        timestamp,
                    });
                }
                Err(e) => {
                    // {:#} keeps the whole context chain on one line
                    let detail = format!("{:#}", e);
                    error!(url = %url, error = %detail, "submission failed");
                    logs.error.append(timestamp, url, &detail)?;
                    println!("❌ Error submitting {}: {}", url, detail);
                    report.failed += 1;
                    report.outcomes.push(SubmissionOutcome {
                        url: url.clone(),
                        success: false,
                        error: Some(detail),
                        timestamp,
                    });

                    if config.policy == FailurePolicy::FailFast {
                        report.aborted = true;
                        break 'batches;
                    }
                }
            }

            let last_url = batch_index + 1 == batch_count && item_index + 1 == batch.len();
            if !last_url {
                debug!(delay_ms = config.item_delay.as_millis() as u64, "pausing before next URL");
                pause.pause(config.item_delay).await;
            }
        }

        if batch_index + 1 < batch_count {
            println!("✅ Batch completed. Waiting before next batch...");
            pause.pause(config.batch_delay).await;
        }
    }

    info!(
        submitted = report.submitted,
        failed = report.failed,
        aborted = report.aborted,
        "submission finished"
    );

    Ok(report)
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is 'batches: ?
//    - A label on the outer loop
//    - `break 'batches` leaves both loops at once; a plain `break` would
//      only leave the inner one and the next batch would still run
//
// 2. Why is the pause a `&dyn Pause` and not tokio::time::sleep?
//    - Real runs pass TokioPause, which sleeps
//    - Tests pass RecordingPause, which only writes down the duration, so
//      they finish instantly and can check the exact pause sequence
//
// 3. Why `?` on logs.*.append but not on submitter.submit?
//    - A failed submission is an expected outcome and goes in the report
//    - A log file we can't write is a real problem, so the run stops
// -----------------------------------------------------------------------------
