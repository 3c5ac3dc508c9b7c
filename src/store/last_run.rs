// src/store/last_run.rs
// =============================================================================
// This module reads and writes the last-run marker: a single ISO-8601
// timestamp saved after every sync.
//
// The marker only decides the lookback window ("what counts as recently
// modified"). When the file is missing or holds garbage we fall back to
// 24 hours before now.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::path::Path;
use tracing::{info, warn};

/// Lookback, in hours, used when no valid marker exists.
const DEFAULT_LOOKBACK_HOURS: i64 = 24;

// Returns the time of the previous run, or `now - 24h` when unknown
pub fn read_last_run(path: impl AsRef<Path>, now: DateTime<Utc>) -> DateTime<Utc> {
    let path = path.as_ref();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            info!(path = %path.display(), "no previous run found, using 24h default");
            return now - Duration::hours(DEFAULT_LOOKBACK_HOURS);
        }
    };

    match DateTime::parse_from_rfc3339(content.trim()) {
        Ok(ts) => ts.with_timezone(&Utc),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid last-run timestamp, using default");
            now - Duration::hours(DEFAULT_LOOKBACK_HOURS)
        }
    }
}

pub fn write_last_run(path: impl AsRef<Path>, when: DateTime<Utc>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, when.to_rfc3339_opts(SecondsFormat::Millis, true))
        .with_context(|| format!("failed to write last-run marker {}", path.display()))
}
