//! Playlist index handling: reading the index document and resolving its
//! segment references against the base URL.
//!
//! Lines starting with `#` are directives (`#EXTM3U`, `#EXTINF`, ...) and are
//! ignored; every other non-blank line is a segment reference. Resolution is
//! pure and order-preserving, so re-resolving the same index always yields the
//! same segment order, which resume depends on.

mod error;
mod resolve;

pub use error::PlaylistError;
pub use resolve::{
    append_extra_params, resolve, resolve_against, segment_references, validate_base_url,
};

use std::path::Path;

/// Reads the index document at `path`.
pub fn read_index(path: &Path) -> Result<String, PlaylistError> {
    std::fs::read_to_string(path).map_err(|source| PlaylistError::IndexUnreadable {
        path: path.to_path_buf(),
        source,
    })
}
