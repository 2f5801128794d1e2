//! Single-attempt segment fetch.
//!
//! A `SegmentFetcher` performs exactly one GET and reports success or failure;
//! retrying is the worker's job. `fetch_into_slot` adds the slot contract on
//! top: an empty body is a failure, and the slot is only written on success.

mod http;

pub use http::{CurlFetcher, CurlOptions};

use crate::retry::FetchError;
use crate::segmenter::Segment;
use crate::storage;
use url::Url;

/// One GET attempt for a segment URL.
pub trait SegmentFetcher: Send + Sync {
    /// Fetches `url` once and returns the full response body.
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

impl<T: SegmentFetcher + ?Sized> SegmentFetcher for std::sync::Arc<T> {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        (**self).fetch(url)
    }
}

/// Fetches `segment.url` once and, on success, writes the body to `segment.slot`.
/// Returns the number of bytes written. On any failure the slot is left untouched.
pub fn fetch_into_slot<F: SegmentFetcher + ?Sized>(
    fetcher: &F,
    segment: &Segment,
) -> Result<u64, FetchError> {
    let body = fetcher.fetch(&segment.url)?;
    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }
    storage::write_atomic(&segment.slot, &body).map_err(FetchError::Storage)?;
    Ok(body.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct Fixed(Result<Vec<u8>, u32>);

    impl SegmentFetcher for Fixed {
        fn fetch(&self, _url: &Url) -> Result<Vec<u8>, FetchError> {
            self.0.clone().map_err(FetchError::Http)
        }
    }

    fn segment(dir: &Path) -> Segment {
        Segment {
            index: 0,
            url: Url::parse("https://ex.test/v/seg-0.ts").unwrap(),
            slot: crate::segmenter::slot_path(dir, 0),
        }
    }

    #[test]
    fn success_writes_slot() {
        let dir = tempfile::tempdir().unwrap();
        let seg = segment(dir.path());
        let n = fetch_into_slot(&Fixed(Ok(b"payload".to_vec())), &seg).unwrap();
        assert_eq!(n, 7);
        assert_eq!(std::fs::read(&seg.slot).unwrap(), b"payload");
    }

    #[test]
    fn empty_body_is_failure_and_keeps_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let seg = segment(dir.path());
        std::fs::write(&seg.slot, b"old").unwrap();
        let err = fetch_into_slot(&Fixed(Ok(Vec::new())), &seg).unwrap_err();
        assert!(matches!(err, FetchError::EmptyBody));
        assert_eq!(std::fs::read(&seg.slot).unwrap(), b"old");
    }

    #[test]
    fn http_failure_leaves_slot_absent() {
        let dir = tempfile::tempdir().unwrap();
        let seg = segment(dir.path());
        let err = fetch_into_slot(&Fixed(Err(500)), &seg).unwrap_err();
        assert!(matches!(err, FetchError::Http(500)));
        assert!(!seg.slot.exists());
    }
}
