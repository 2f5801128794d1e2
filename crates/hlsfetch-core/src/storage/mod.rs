//! Slot files on disk.
//!
//! Every write goes to a `.part` temp file next to the destination and is
//! renamed into place once complete, so an interrupted write never leaves a
//! truncated file under a slot (or manifest) name.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.m3uindex` → `a.m3uindex.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates `dir` (and parents) if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if !dir.is_dir() {
        tracing::info!("creating temp directory {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Makes a relative `path` absolute against the current directory.
/// Slot paths are written into the manifest, which the concat tool resolves
/// relative to the manifest's own directory, so they must not stay relative.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Writes `data` to `final_path` via temp file + rename, replacing any previous content.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp = temp_path(final_path);
    let result = (|| {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(data)?;
        f.sync_all()?;
        drop(f);
        fs::rename(&tmp, final_path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
