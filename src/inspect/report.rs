// src/inspect/report.rs
// =============================================================================
// This module writes and prints the status report.
//
// - write_report: CSV file with a fixed header
//       url,verdict,coverageState,lastCrawlTime,googleCanonical
// - print_results: terminal table (or JSON with --json), plus a summary
//   of how many URLs got each verdict
// =============================================================================

use super::StatusResult;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

pub const REPORT_COLUMNS: [&str; 5] = [
    "url",
    "verdict",
    "coverageState",
    "lastCrawlTime",
    "googleCanonical",
];

// Writes all rows to `path`, replacing any previous report
//
// The header is written by hand so even an empty result set produces a
// valid file with the expected columns.
pub fn write_report(path: &Path, rows: &[StatusResult]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create report {}", path.display()))?;

    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write report {}", path.display()))?;

    Ok(())
}

pub fn print_results(rows: &[StatusResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
    } else {
        print_table(rows);
    }
    Ok(())
}

fn print_table(rows: &[StatusResult]) {
    println!("{:<60} {:<12} {:<40}", "URL", "VERDICT", "COVERAGE");
    println!("{}", "=".repeat(112));

    for row in rows {
        // Truncate long URLs so the columns stay aligned
        let url_display = if row.url.chars().count() > 57 {
            format!("{}...", row.url.chars().take(57).collect::<String>())
        } else {
            row.url.clone()
        };
        println!("{:<60} {:<12} {:<40}", url_display, row.verdict, row.coverage_state);
    }

    println!();
    println!("📊 Summary:");
    for (verdict, count) in verdict_counts(rows) {
        println!("   {}: {}", verdict, count);
    }
    println!("   📋 Total: {}", rows.len());
}

// Verdict -> number of URLs, sorted by verdict name
fn verdict_counts(rows: &[StatusResult]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.verdict.as_str()).or_insert(0) += 1;
    }
    counts
}
