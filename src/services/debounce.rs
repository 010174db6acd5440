//! Debouncing of form change notifications
//!
//! A burst of edits produces a burst of snapshots; only the last one
//! matters, and only once the form has been quiet for a full window.

use crate::week::WeekSnapshot;
use std::time::Duration;
use tokio::time::Instant;

/// Holds the latest snapshot until the form goes quiet
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<(WeekSnapshot, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the pending snapshot and restart the quiet window
    pub fn push(&mut self, snapshot: WeekSnapshot) {
        self.pending = Some((snapshot, Instant::now() + self.window));
    }

    /// Take the pending snapshot without waiting
    pub fn flush(&mut self) -> Option<WeekSnapshot> {
        self.pending.take().map(|(snapshot, _)| snapshot)
    }

    /// Wait for the quiet window to pass and hand out the snapshot.
    ///
    /// Never resolves while nothing is pending. Dropping the future before
    /// it resolves leaves the pending snapshot in place.
    pub async fn ready(&mut self) -> WeekSnapshot {
        let deadline = match &self.pending {
            Some((_, deadline)) => *deadline,
            None => return std::future::pending().await,
        };

        tokio::time::sleep_until(deadline).await;

        match self.flush() {
            Some(snapshot) => snapshot,
            None => std::future::pending().await,
        }
    }
}
