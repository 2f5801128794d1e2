//! Run inputs (`JobSpec`, `JobPlan`) and the report of a finished run.

use crate::downloader::{DownloadOptions, DownloadSummary};
use crate::segmenter::Segment;
use std::path::PathBuf;

/// Default index file name looked up when none is given.
pub const DEFAULT_INDEX: &str = "index.m3u8";
/// Default manifest file name inside the temp directory.
pub const DEFAULT_MANIFEST: &str = "ffmpeg_m3u8_sources.txt";

/// Everything one run needs. Nothing here is persisted: a rerun with the same
/// base URL, index and temp directory reconstructs the same segments.
#[derive(Debug, Clone)]
pub struct JobSpec {
    /// Must have a scheme and a host; should end with `/`.
    pub base_url: String,
    pub index_path: PathBuf,
    /// Query parameters appended to every segment URL.
    pub extra_params: String,
    /// Directory holding the slots; created if absent.
    pub temp_dir: PathBuf,
    /// Manifest file name, placed inside `temp_dir`.
    pub manifest_name: String,
    pub output: PathBuf,
    /// Skip segments whose slot is already non-empty.
    pub resume: bool,
    pub download: DownloadOptions,
}

impl JobSpec {
    pub fn new(base_url: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            base_url: base_url.into(),
            index_path: PathBuf::from(DEFAULT_INDEX),
            extra_params: String::new(),
            temp_dir: PathBuf::from("."),
            manifest_name: DEFAULT_MANIFEST.to_string(),
            output: output.into(),
            resume: false,
            download: DownloadOptions::default(),
        }
    }
}

/// Resolved segments of a job, with the absolute temp directory holding their slots.
#[derive(Debug, Clone)]
pub struct JobPlan {
    pub temp_dir: PathBuf,
    pub segments: Vec<Segment>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub total: usize,
    /// Segments whose slot was already filled (resume).
    pub skipped: Vec<usize>,
    pub download: DownloadSummary,
    pub manifest: PathBuf,
    pub output: PathBuf,
}
