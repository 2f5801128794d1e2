//! Final concatenation step, delegated to an external tool.
//!
//! The tool is a black box: it receives the manifest and the output path and
//! its exit status decides the outcome. Its output is not parsed.

mod ffmpeg;

pub use ffmpeg::FfmpegConcat;

use std::path::Path;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum ConcatError {
    #[error("failed to start '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// Joins the slots listed in a manifest into one output file.
pub trait Concatenator: Send + Sync {
    fn concat(&self, manifest: &Path, output: &Path) -> Result<(), ConcatError>;
}
