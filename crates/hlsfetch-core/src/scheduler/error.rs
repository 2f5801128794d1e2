//! Run-level error taxonomy.

use crate::concat::ConcatError;
use crate::downloader::SegmentFailure;
use crate::playlist::PlaylistError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Bad base URL, unreadable or empty index. Raised before any dispatch.
    #[error(transparent)]
    Playlist(#[from] PlaylistError),

    #[error("cannot create temp directory '{}'", .path.display())]
    TempDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Segments that reached a terminal failure. Slots of all other segments are kept,
    /// so a rerun with resume enabled only fetches these.
    #[error("{} segment(s) failed: {}", .failed.len(), describe(.failed))]
    SegmentsFailed { failed: Vec<SegmentFailure> },

    #[error("cannot write manifest '{}'", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("concatenation failed")]
    Concatenation(#[from] ConcatError),
}

fn describe(failed: &[SegmentFailure]) -> String {
    const SHOWN: usize = 5;
    let mut parts: Vec<String> = failed
        .iter()
        .take(SHOWN)
        .map(|f| format!("#{} ({} attempts: {})", f.index, f.attempts, f.error))
        .collect();
    if failed.len() > SHOWN {
        parts.push(format!("and {} more", failed.len() - SHOWN));
    }
    parts.join(", ")
}
