//! ffmpeg concat demuxer invocation (`-f concat ... -c copy`).

use super::{ConcatError, Concatenator};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Runs `ffmpeg -f concat -safe 0 -i <manifest> -c copy <output>`.
#[derive(Debug, Clone)]
pub struct FfmpegConcat {
    program: String,
    /// Pass `-y` (replace an existing output) instead of `-n` (refuse).
    overwrite: bool,
}

impl FfmpegConcat {
    pub fn new(program: impl Into<String>, overwrite: bool) -> Self {
        Self {
            program: program.into(),
            overwrite,
        }
    }

    /// Argument list passed to the program.
    pub fn args(&self, manifest: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "warning", "-f", "concat", "-safe", "0", "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(manifest.as_os_str().to_owned());
        args.extend(["-c", "copy"].iter().map(OsString::from));
        args.push(OsString::from(if self.overwrite { "-y" } else { "-n" }));
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Default for FfmpegConcat {
    fn default() -> Self {
        Self::new("ffmpeg", false)
    }
}

impl Concatenator for FfmpegConcat {
    fn concat(&self, manifest: &Path, output: &Path) -> Result<(), ConcatError> {
        tracing::info!(
            manifest = %manifest.display(),
            output = %output.display(),
            "running {} concat",
            self.program
        );
        let status = Command::new(&self.program)
            .args(self.args(manifest, output))
            .status()
            .map_err(|source| ConcatError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(ConcatError::Failed {
                program: self.program.clone(),
                status,
            });
        }
        Ok(())
    }
}
