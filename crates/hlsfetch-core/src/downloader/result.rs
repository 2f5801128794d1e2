//! Per-segment outcomes and the run summary built from them.

/// Terminal failure of one segment under a bounded retry policy (or a storage error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentFailure {
    pub index: usize,
    pub attempts: u32,
    /// Display form of the last attempt's error.
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SegmentOutcome {
    Completed { index: usize, attempts: u32, bytes: u64 },
    Failed(SegmentFailure),
}

/// What the download phase did. Indices are sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    /// Segments fetched and written in this run.
    pub completed: Vec<usize>,
    pub failed: Vec<SegmentFailure>,
    /// Fetch attempts across all segments.
    pub attempts: u64,
    /// Attempts that ended in an error (retried or not).
    pub failed_attempts: u64,
    pub bytes: u64,
}

impl DownloadSummary {
    pub(super) fn record(&mut self, outcome: SegmentOutcome) {
        match outcome {
            SegmentOutcome::Completed {
                index,
                attempts,
                bytes,
            } => {
                self.completed.push(index);
                self.attempts += u64::from(attempts);
                self.failed_attempts += u64::from(attempts.saturating_sub(1));
                self.bytes += bytes;
            }
            SegmentOutcome::Failed(failure) => {
                self.attempts += u64::from(failure.attempts);
                self.failed_attempts += u64::from(failure.attempts);
                self.failed.push(failure);
            }
        }
    }

    pub(super) fn sort(&mut self) {
        self.completed.sort_unstable();
        self.failed.sort_by_key(|f| f.index);
    }

    /// True when no segment ended in a terminal failure.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_attempts() {
        let mut s = DownloadSummary::default();
        s.record(SegmentOutcome::Completed {
            index: 2,
            attempts: 3,
            bytes: 7,
        });
        s.record(SegmentOutcome::Failed(SegmentFailure {
            index: 0,
            attempts: 4,
            error: "HTTP 404".to_string(),
        }));
        s.record(SegmentOutcome::Completed {
            index: 1,
            attempts: 1,
            bytes: 3,
        });
        s.sort();
        assert_eq!(s.completed, vec![1, 2]);
        assert_eq!(s.attempts, 8);
        assert_eq!(s.failed_attempts, 6);
        assert_eq!(s.bytes, 10);
        assert!(!s.is_complete());
    }
}
