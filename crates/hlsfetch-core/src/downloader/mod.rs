//! Bounded-concurrency segment downloader.
//!
//! Starts `min(concurrency, pending)` worker threads that pull segments from a
//! shared cursor over the pending list, so dispatch follows index order while
//! completion order is free. At most `concurrency` fetches are in flight no
//! matter how many segments there are. The call returns only after every
//! worker has joined.
//!
//! Under an unlimited retry policy a segment that never succeeds keeps its
//! worker busy forever; once every worker is stuck that way the run stalls.

mod result;
mod worker;

pub use result::{DownloadSummary, SegmentFailure};

use crate::fetch::SegmentFetcher;
use crate::progress::ProgressSender;
use crate::retry::RetryPolicy;
use crate::segmenter::Segment;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

/// Default number of concurrent segment fetches.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct DownloadOptions {
    /// Maximum fetches in flight at once. Values below 1 are treated as 1.
    pub concurrency: usize,
    pub retry: RetryPolicy,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            retry: RetryPolicy::default(),
        }
    }
}

/// Downloads every segment in `segments` into its slot and waits for all of them.
///
/// Segments are dispatched in slice order. Per-attempt failures are retried per
/// `options.retry`; only terminal failures show up in the summary.
pub fn download_segments<F: SegmentFetcher + ?Sized>(
    segments: &[Segment],
    fetcher: &F,
    options: &DownloadOptions,
    progress: Option<&ProgressSender>,
) -> DownloadSummary {
    let mut summary = DownloadSummary::default();
    if segments.is_empty() {
        return summary;
    }

    let num_workers = options.concurrency.max(1).min(segments.len());
    tracing::debug!(
        segments = segments.len(),
        workers = num_workers,
        "starting segment workers"
    );

    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();
    std::thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                let Some(segment) = segments.get(i) else {
                    break;
                };
                let outcome = worker::run_segment(segment, fetcher, &options.retry, progress);
                if tx.send(outcome).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    for outcome in rx {
        summary.record(outcome);
    }
    summary.sort();
    summary
}
