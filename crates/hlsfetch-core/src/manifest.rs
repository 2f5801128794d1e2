//! ffmpeg concat list ("manifest") writer.
//!
//! One `file '<path>'` line per segment, in index order, including segments
//! whose slot was reused from an earlier run.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::storage;

/// Lexically normalizes `path`: drops `.` components and folds `name/..`.
/// Leading `..` on a relative path are kept; `..` directly under the root is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Quotes `path` for the concat demuxer: single-quoted, with embedded `'`
/// written as `'\''`.
fn quote(path: &Path) -> String {
    let s = path.to_string_lossy();
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Renders the manifest text for `slots` (already in index order).
pub fn render_manifest<P: AsRef<Path>>(slots: &[P]) -> String {
    let mut out = String::new();
    for slot in slots {
        out.push_str("file ");
        out.push_str(&quote(&normalize_path(slot.as_ref())));
        out.push('\n');
    }
    out
}

/// Writes the manifest for `slots` to `path` and returns `path`.
pub fn write_manifest<P: AsRef<Path>>(path: &Path, slots: &[P]) -> io::Result<PathBuf> {
    storage::write_atomic(path, render_manifest(slots).as_bytes())?;
    tracing::debug!(path = %path.display(), entries = slots.len(), "wrote concat manifest");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_cur_dir_and_folds_parent() {
        assert_eq!(
            normalize_path(Path::new("./temp/./index-temp-0.m3uindex")),
            PathBuf::from("temp/index-temp-0.m3uindex")
        );
        assert_eq!(
            normalize_path(Path::new("/a/b/../c")),
            PathBuf::from("/a/c")
        );
        assert_eq!(normalize_path(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize_path(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn renders_one_line_per_slot_in_order() {
        let slots = ["./t/index-temp-0.m3uindex", "./t/index-temp-1.m3uindex"];
        assert_eq!(
            render_manifest(&slots),
            "file 't/index-temp-0.m3uindex'\nfile 't/index-temp-1.m3uindex'\n"
        );
    }

    #[test]
    fn quotes_embedded_single_quotes() {
        let slots = [PathBuf::from("/tmp/it's/index-temp-0.m3uindex")];
        assert_eq!(
            render_manifest(&slots),
            "file '/tmp/it'\\''s/index-temp-0.m3uindex'\n"
        );
    }

    #[test]
    fn write_manifest_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ffmpeg_m3u8_sources.txt");
        let slots = vec![dir.path().join("index-temp-0.m3uindex")];
        let written = write_manifest(&path, &slots).unwrap();
        assert_eq!(written, path);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            format!("file '{}'\n", dir.path().join("index-temp-0.m3uindex").display())
        );
    }

    #[test]
    fn empty_manifest() {
        let slots: [&str; 0] = [];
        assert_eq!(render_manifest(&slots), "");
    }
}
