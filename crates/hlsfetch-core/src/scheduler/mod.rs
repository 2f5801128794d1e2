//! Run pipeline.
//!
//! Ties the stages together for one playlist:
//! playlist (validate + resolve) → segmenter → resume filter → downloader →
//! manifest → concat. Validation failures happen before any slot is touched;
//! the manifest is only written after every download worker has joined.

mod error;
mod job;
mod pipeline;

pub use error::RunError;
pub use job::{JobPlan, JobSpec, RunReport, DEFAULT_INDEX, DEFAULT_MANIFEST};
pub use pipeline::{plan_job, run_job};
