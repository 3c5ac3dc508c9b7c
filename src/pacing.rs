// src/pacing.rs
// =============================================================================
// This module owns the waiting between remote requests.
//
// The submitter never calls tokio::time::sleep directly. It asks a `Pause`
// to wait instead, so:
// - the real binary uses `TokioPause` (an actual async sleep)
// - tests use `RecordingPause` (returns immediately, remembers the delays)
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - async-trait: Lets a trait have async methods and still be used as
//   `&dyn Pause`
// =============================================================================

use async_trait::async_trait;
use std::time::Duration;

// Something that can wait for a given amount of time
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Waits on the tokio timer.
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        // A zero delay still yields to the runtime once
        tokio::time::sleep(duration).await;
    }
}

// Test double: records every requested delay instead of sleeping
#[cfg(test)]
#[derive(Default)]
pub struct RecordingPause {
    pub delays: std::sync::Mutex<Vec<Duration>>,
}

#[cfg(test)]
impl RecordingPause {
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}
