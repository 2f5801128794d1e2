//! Progress reporting for a run (segments done, attempts, failures).
//!
//! Workers send `ProgressEvent`s over an unbounded tokio channel so sending
//! never blocks a download thread; the CLI folds them into `ProgressStats`.

use tokio::sync::mpsc::UnboundedSender;

/// Channel end handed to the downloader.
pub type ProgressSender = UnboundedSender<ProgressEvent>;

/// One observable step of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Run planned: `total` segments, of which `skipped` are already filled.
    Planned { total: usize, skipped: usize },
    /// Slot already filled; segment not dispatched.
    Skipped { index: usize },
    AttemptStarted { index: usize, attempt: u32 },
    AttemptFailed { index: usize, attempt: u32, error: String },
    Completed { index: usize, attempts: u32, bytes: u64 },
    /// Retry policy gave up on the segment.
    GaveUp { index: usize, attempts: u32, error: String },
}

/// Sends `event` if a sink is attached. A closed receiver is ignored.
pub fn emit(sink: Option<&ProgressSender>, event: ProgressEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(event);
    }
}

/// Running totals for one run (CLI-friendly).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    pub skipped: usize,
    /// Segments fetched successfully in this run.
    pub completed: usize,
    pub gave_up: usize,
    pub failed_attempts: u64,
    pub bytes: u64,
}

impl ProgressStats {
    pub fn apply(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Planned { total, skipped } => {
                self.total = *total;
                self.skipped = *skipped;
            }
            ProgressEvent::Skipped { .. } | ProgressEvent::AttemptStarted { .. } => {}
            ProgressEvent::AttemptFailed { .. } => self.failed_attempts += 1,
            ProgressEvent::Completed { bytes, .. } => {
                self.completed += 1;
                self.bytes += bytes;
            }
            ProgressEvent::GaveUp { .. } => self.gave_up += 1,
        }
    }

    /// Segments whose slot is filled (skipped or completed).
    pub fn done(&self) -> usize {
        self.skipped + self.completed
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.done() as f64 / self.total as f64).min(1.0)
    }
}
