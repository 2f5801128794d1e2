//! `hlsfetch run` – download all segments, write the concat list, run ffmpeg.

use anyhow::{Context, Result};
use hlsfetch_core::concat::FfmpegConcat;
use hlsfetch_core::config::HlsfetchConfig;
use hlsfetch_core::downloader::DownloadOptions;
use hlsfetch_core::fetch::{CurlFetcher, CurlOptions};
use hlsfetch_core::progress::{ProgressEvent, ProgressStats};
use hlsfetch_core::scheduler::{self, JobSpec};
use std::path::PathBuf;

/// Flags of `hlsfetch run` after parsing.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub base_url: String,
    pub index: PathBuf,
    pub temp_folder: PathBuf,
    pub out: PathBuf,
    pub extra_args: String,
    pub resume: bool,
    pub concurrency: Option<usize>,
    pub max_attempts: Option<u32>,
    pub overwrite: bool,
}

/// Builds the job from CLI flags, with config values as defaults.
fn job_from_options(cfg: &HlsfetchConfig, opts: &RunOptions) -> JobSpec {
    let mut retry = cfg.retry_policy();
    if let Some(n) = opts.max_attempts {
        retry = retry.with_max_attempts(Some(n));
    }
    let mut job = JobSpec::new(opts.base_url.clone(), opts.out.clone());
    job.index_path = opts.index.clone();
    job.extra_params = opts.extra_args.clone();
    job.temp_dir = opts.temp_folder.clone();
    job.manifest_name = cfg.manifest_name.clone();
    job.resume = opts.resume;
    job.download = DownloadOptions {
        concurrency: opts.concurrency.unwrap_or(cfg.concurrency).max(1),
        retry,
    };
    job
}

pub async fn run_download(cfg: &HlsfetchConfig, opts: RunOptions) -> Result<()> {
    let job = job_from_options(cfg, &opts);
    let fetcher = CurlFetcher::new(CurlOptions::from_config(cfg));
    let concat = FfmpegConcat::new(cfg.ffmpeg_path.clone(), opts.overwrite);

    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel::<ProgressEvent>();
    let progress_handle = tokio::spawn(async move {
        let mut stats = ProgressStats::default();
        while let Some(event) = progress_rx.recv().await {
            stats.apply(&event);
            match event {
                ProgressEvent::Planned { total, skipped } if skipped > 0 => {
                    println!("{} segments, {} already downloaded", total, skipped);
                }
                ProgressEvent::Planned { total, .. } => println!("{} segments", total),
                ProgressEvent::Completed {
                    index,
                    attempts,
                    bytes,
                } => {
                    println!(
                        "  [{}/{}] segment {} ({} bytes, {} attempt(s)) {:.1}%",
                        stats.done(),
                        stats.total,
                        index,
                        bytes,
                        attempts,
                        stats.fraction() * 100.0
                    );
                }
                ProgressEvent::AttemptFailed {
                    index,
                    attempt,
                    error,
                } => {
                    eprintln!("  segment {} attempt {} failed: {}", index, attempt, error);
                }
                ProgressEvent::GaveUp {
                    index, attempts, ..
                } => {
                    eprintln!("  segment {} abandoned after {} attempt(s)", index, attempts);
                }
                ProgressEvent::Skipped { .. } | ProgressEvent::AttemptStarted { .. } => {}
            }
        }
        stats
    });

    let outcome = tokio::task::spawn_blocking(move || {
        scheduler::run_job(&job, &fetcher, &concat, Some(&progress_tx))
    })
    .await
    .context("download task panicked")?;
    let stats = progress_handle.await.context("progress task panicked")?;

    let report = outcome?;
    tracing::info!(
        total = report.total,
        skipped = report.skipped.len(),
        failed_attempts = stats.failed_attempts,
        bytes = stats.bytes,
        "run complete"
    );
    println!(
        "FINISHED: {} ({} segments, {} fetched, {} reused, {} bytes)",
        report.output.display(),
        report.total,
        report.download.completed.len(),
        report.skipped.len(),
        report.download.bytes
    );
    println!(
        "Segment files and {} in {} can now be removed.",
        report
            .manifest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        opts.temp_folder.display()
    );
    Ok(())
}
