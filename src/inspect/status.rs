// src/inspect/status.rs
// =============================================================================
// Types for the index status of one URL.
//
// IndexStatus is what the inspection API hands back (every field may be
// missing). StatusResult is one row of our report, where every missing
// piece is replaced by a visible sentinel:
//
//   "N/A"      the API answered but left this field out (or sent "")
//   "No Data"  the API answered without any index status at all
//   "Error"    the request for this URL failed
// =============================================================================

use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DATA: &str = "No Data";
pub const ERROR: &str = "Error";

/// Index status as reported by the inspection API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    pub verdict: Option<String>,
    pub coverage_state: Option<String>,
    pub last_crawl_time: Option<String>,
    pub google_canonical: Option<String>,
}

// One report row. Field order here is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    pub url: String,
    pub verdict: String,
    pub coverage_state: String,
    pub last_crawl_time: String,
    pub google_canonical: String,
}

impl StatusResult {
    pub fn from_status(url: String, status: IndexStatus) -> Self {
        // An empty string carries no more information than a missing field
        let or_na = |value: Option<String>| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string())
        };
        Self {
            url,
            verdict: or_na(status.verdict),
            coverage_state: or_na(status.coverage_state),
            last_crawl_time: or_na(status.last_crawl_time),
            google_canonical: or_na(status.google_canonical),
        }
    }

    pub fn no_data(url: String) -> Self {
        Self::filled(url, NO_DATA)
    }

    pub fn error(url: String) -> Self {
        Self::filled(url, ERROR)
    }

    fn filled(url: String, sentinel: &str) -> Self {
        Self {
            url,
            verdict: sentinel.to_string(),
            coverage_state: sentinel.to_string(),
            last_crawl_time: sentinel.to_string(),
            google_canonical: sentinel.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.verdict == ERROR
    }
}
