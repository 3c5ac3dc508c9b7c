// src/inspect/inspector.rs
// =============================================================================
// Looks up the index status of many URLs at once.
//
// Every URL gets its own request and all of them run concurrently.
// Without a limit there is one in-flight request per URL; `concurrency`
// caps that number. Results come back in completion order, not input
// order.
//
// A failed lookup never stops the others: it just becomes an "Error" row.
// =============================================================================

use super::{Inspector, StatusResult};
use futures::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use tracing::warn;

pub async fn inspect_all(
    urls: Vec<String>,
    inspector: &dyn Inspector,
    concurrency: Option<NonZeroUsize>,
) -> Vec<StatusResult> {
    let limit = concurrency.map_or(urls.len().max(1), NonZeroUsize::get);

    let lookups = urls.into_iter().map(|url| inspect_one(inspector, url));

    stream::iter(lookups)
        .buffer_unordered(limit)
        .collect()
        .await
}

async fn inspect_one(inspector: &dyn Inspector, url: String) -> StatusResult {
    match inspector.inspect(&url).await {
        Ok(Some(status)) => StatusResult::from_status(url, status),
        Ok(None) => StatusResult::no_data(url),
        Err(e) => {
            let detail = format!("{:#}", e);
            warn!(url = %url, error = %detail, "inspection failed");
            println!("❌ Error checking {}: {}", url, detail);
            StatusResult::error(url)
        }
    }
}


// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does buffer_unordered(limit) do?
//    - `lookups` is a list of futures that haven't started yet
//    - buffer_unordered polls up to `limit` of them at the same time and
//      yields each result as soon as it is ready
//    - Faster URLs come out first, which is why the report is in
//      completion order
//
// 2. Why take `&dyn Inspector` instead of the real client?
//    - The production code passes InspectionClient, tests pass a fake
//    - Neither side needs to know about the other
//
// 3. Why does inspect_one never return an error?
//    - A failed lookup is turned into an "Error" row right here
//    - collect() then always gets one row per URL, good or bad
// -----------------------------------------------------------------------------
