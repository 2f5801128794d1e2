//! Segment planning: pairs each resolved URL with its index-derived slot.
//!
//! Slot names depend only on the segment index, never on the URL, so a rerun
//! against the same temp folder finds the slots written by an earlier run.

use std::path::{Path, PathBuf};
use url::Url;

/// Prefix of every slot file name.
pub const SLOT_PREFIX: &str = "index-temp-";
/// Extension of every slot file name.
pub const SLOT_EXTENSION: &str = "m3uindex";

/// One segment of the playlist: its position, fetch URL and destination slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position in the index, 0-based. Determines reassembly order.
    pub index: usize,
    pub url: Url,
    /// File the segment body is written to.
    pub slot: PathBuf,
}

/// Slot file name for segment `index`, e.g. `index-temp-3.m3uindex`.
pub fn slot_file_name(index: usize) -> String {
    format!("{}{}.{}", SLOT_PREFIX, index, SLOT_EXTENSION)
}

/// Slot path for segment `index` inside `temp_dir`.
pub fn slot_path(temp_dir: &Path, index: usize) -> PathBuf {
    temp_dir.join(slot_file_name(index))
}

/// Builds the segment plan: segment `i` is `urls[i]` written to `slot_path(temp_dir, i)`.
pub fn plan_segments(urls: Vec<Url>, temp_dir: &Path) -> Vec<Segment> {
    urls.into_iter()
        .enumerate()
        .map(|(index, url)| Segment {
            index,
            url,
            slot: slot_path(temp_dir, index),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_names_derive_from_index() {
        assert_eq!(slot_file_name(0), "index-temp-0.m3uindex");
        assert_eq!(slot_file_name(12), "index-temp-12.m3uindex");
        assert_eq!(
            slot_path(Path::new("/tmp/run"), 2),
            PathBuf::from("/tmp/run/index-temp-2.m3uindex")
        );
    }

    #[test]
    fn plan_keeps_url_order() {
        let urls: Vec<Url> = ["https://ex.test/b.ts", "https://ex.test/a.ts"]
            .iter()
            .map(|u| Url::parse(u).unwrap())
            .collect();
        let plan = plan_segments(urls.clone(), Path::new("t"));
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].index, 0);
        assert_eq!(plan[0].url, urls[0]);
        assert_eq!(plan[0].slot, PathBuf::from("t/index-temp-0.m3uindex"));
        assert_eq!(plan[1].index, 1);
        assert_eq!(plan[1].url, urls[1]);
    }

    #[test]
    fn empty_plan() {
        assert!(plan_segments(Vec::new(), Path::new("t")).is_empty());
    }
}
