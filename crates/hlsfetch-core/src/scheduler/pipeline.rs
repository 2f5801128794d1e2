use super::error::RunError;
use super::job::{JobPlan, JobSpec, RunReport};
use crate::concat::Concatenator;
use crate::downloader;
use crate::fetch::SegmentFetcher;
use crate::manifest;
use crate::playlist::{self, PlaylistError};
use crate::progress::{emit, ProgressEvent, ProgressSender};
use crate::resume;
use crate::segmenter;
use crate::storage;

/// Validates the base URL, reads and resolves the index, and returns the
/// segment plan with absolute slot paths. Touches nothing on disk.
pub fn plan_job(job: &JobSpec) -> Result<JobPlan, RunError> {
    let base = playlist::validate_base_url(&job.base_url)?;
    let index_text = playlist::read_index(&job.index_path)?;
    let urls = playlist::resolve_against(&base, &index_text, &job.extra_params)?;
    if urls.is_empty() {
        return Err(PlaylistError::EmptyIndex.into());
    }
    let temp_dir = storage::absolute(&job.temp_dir).map_err(|source| RunError::TempDir {
        path: job.temp_dir.clone(),
        source,
    })?;
    let temp_dir = manifest::normalize_path(&temp_dir);
    Ok(JobPlan {
        segments: segmenter::plan_segments(urls, &temp_dir),
        temp_dir,
    })
}

/// Runs the whole pipeline for `job`: plan, resume filter, concurrent download,
/// manifest, concatenation.
///
/// Blocks until every dispatched segment worker has returned. With an
/// unlimited retry policy that may be never, if a segment is unreachable.
pub fn run_job<F, C>(
    job: &JobSpec,
    fetcher: &F,
    concat: &C,
    progress: Option<&ProgressSender>,
) -> Result<RunReport, RunError>
where
    F: SegmentFetcher + ?Sized,
    C: Concatenator + ?Sized,
{
    let JobPlan { temp_dir, segments } = plan_job(job)?;
    storage::ensure_dir(&temp_dir).map_err(|source| RunError::TempDir {
        path: temp_dir.clone(),
        source,
    })?;

    let (pending, skipped) = resume::partition_pending(&segments, job.resume);
    tracing::info!(
        total = segments.len(),
        pending = pending.len(),
        skipped = skipped.len(),
        concurrency = job.download.concurrency,
        "planned run"
    );
    emit(
        progress,
        ProgressEvent::Planned {
            total: segments.len(),
            skipped: skipped.len(),
        },
    );
    for &index in &skipped {
        emit(progress, ProgressEvent::Skipped { index });
    }

    let summary = downloader::download_segments(&pending, fetcher, &job.download, progress);
    if !summary.is_complete() {
        return Err(RunError::SegmentsFailed {
            failed: summary.failed,
        });
    }

    let manifest_path = temp_dir.join(&job.manifest_name);
    let slots: Vec<_> = segments.iter().map(|s| s.slot.as_path()).collect();
    let manifest = manifest::write_manifest(&manifest_path, &slots).map_err(|source| {
        RunError::Manifest {
            path: manifest_path.clone(),
            source,
        }
    })?;

    concat.concat(&manifest, &job.output)?;
    tracing::info!(
        output = %job.output.display(),
        temp_dir = %temp_dir.display(),
        "run finished; temp directory can be cleaned up"
    );

    Ok(RunReport {
        total: segments.len(),
        skipped,
        download: summary,
        manifest,
        output: job.output.clone(),
    })
}
