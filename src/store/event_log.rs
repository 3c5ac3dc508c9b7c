// src/store/event_log.rs
// =============================================================================
// Append-only line log used for submission successes and errors.
//
// Line format:  [2025-03-10T12:00:00.000Z] https://example.com/page - Success
//
// The file is opened in append mode for every write and never truncated.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one `[timestamp] url - detail` line.
    pub fn append(&self, timestamp: DateTime<Utc>, url: &str, detail: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open log {}", self.path.display()))?;

        // Details can carry multi-line API error bodies; keep one event per line
        let detail = detail.replace(['\r', '\n'], " ");

        writeln!(
            file,
            "[{}] {} - {}",
            timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            url,
            detail
        )
        .with_context(|| format!("failed to append to log {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_append_keeps_previous_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("submission.log"));
        let ts = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        log.append(ts, "https://a.com/1", "Success").unwrap();
        log.append(ts, "https://a.com/2", "Success").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "[2025-03-10T12:00:00.000Z] https://a.com/1 - Success\n\
             [2025-03-10T12:00:00.000Z] https://a.com/2 - Success\n"
        );
    }

    #[test]
    fn test_multiline_detail_stays_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = EventLog::new(dir.path().join("error.log"));
        let ts = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();

        log.append(ts, "https://a.com/1", "HTTP 403\n{\"error\": 1}").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("HTTP 403 {\"error\": 1}"));
    }
}
