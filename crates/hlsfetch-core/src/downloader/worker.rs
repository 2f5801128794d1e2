//! Retrying worker: drives one segment to a terminal state.

use super::result::{SegmentFailure, SegmentOutcome};
use crate::fetch::{fetch_into_slot, SegmentFetcher};
use crate::progress::{emit, ProgressEvent, ProgressSender};
use crate::retry::{run_with_retry, RetryPolicy};
use crate::segmenter::Segment;

/// Fetches `segment` into its slot, retrying per `policy`. Every attempt start
/// and failure is reported to `progress` and logged.
pub(super) fn run_segment<F: SegmentFetcher + ?Sized>(
    segment: &Segment,
    fetcher: &F,
    policy: &RetryPolicy,
    progress: Option<&ProgressSender>,
) -> SegmentOutcome {
    let index = segment.index;
    tracing::info!(
        index,
        url = %segment.url,
        slot = %segment.slot.display(),
        "downloading segment"
    );

    let mut bytes = 0u64;
    let result = run_with_retry(policy, |attempt| {
        emit(progress, ProgressEvent::AttemptStarted { index, attempt });
        match fetch_into_slot(fetcher, segment) {
            Ok(n) => {
                bytes = n;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(index, attempt, url = %segment.url, "segment fetch failed: {}", e);
                emit(
                    progress,
                    ProgressEvent::AttemptFailed {
                        index,
                        attempt,
                        error: e.to_string(),
                    },
                );
                Err(e)
            }
        }
    });

    match result {
        Ok(attempts) => {
            tracing::debug!(index, attempts, bytes, "segment complete");
            emit(progress, ProgressEvent::Completed { index, attempts, bytes });
            SegmentOutcome::Completed {
                index,
                attempts,
                bytes,
            }
        }
        Err(exhausted) => {
            tracing::error!(index, url = %segment.url, "{}", exhausted);
            let error = exhausted.last_error.to_string();
            emit(
                progress,
                ProgressEvent::GaveUp {
                    index,
                    attempts: exhausted.attempts,
                    error: error.clone(),
                },
            );
            SegmentOutcome::Failed(SegmentFailure {
                index,
                attempts: exhausted.attempts,
                error,
            })
        }
    }
}
