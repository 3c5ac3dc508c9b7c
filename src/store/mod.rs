// src/store/mod.rs
// =============================================================================
// This module owns everything the pipelines keep on disk.
//
// Submodules:
// - url_list: the tracked URL list (read, merge, whole-file replace)
// - last_run: the timestamp of the previous sync
// - event_log: append-only "[timestamp] url - detail" log files
//
// None of these files are locked. Two pipelines running at the same time
// can race on the URL list.
// =============================================================================

mod event_log;
mod last_run;
mod url_list;

pub use event_log::EventLog;
pub use last_run::{read_last_run, write_last_run};
pub use url_list::{merge_urls, read_urls, write_urls};
