//! Shared helpers for integration tests: an in-process segment server, an
//! in-memory fetcher and a concatenator that records its calls.

#![allow(dead_code)]

pub mod segment_server;

use hlsfetch_core::concat::{ConcatError, Concatenator};
use hlsfetch_core::fetch::SegmentFetcher;
use hlsfetch_core::retry::FetchError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use url::Url;

/// Serves fixed bodies by URL and records every fetched URL.
#[derive(Default)]
pub struct MapFetcher {
    bodies: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn new<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: Into<String>,
    {
        Self {
            bodies: bodies.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        let mut c = self.calls.lock().unwrap().clone();
        c.sort();
        c
    }
}

impl SegmentFetcher for MapFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url.as_str())
            .cloned()
            .ok_or(FetchError::Http(404))
    }
}

/// One recorded concatenation: manifest path, its text at call time, output path.
#[derive(Debug, Clone)]
pub struct ConcatCall {
    pub manifest: PathBuf,
    pub manifest_text: String,
    pub output: PathBuf,
}

#[derive(Default)]
pub struct RecordingConcat {
    calls: Mutex<Vec<ConcatCall>>,
}

impl RecordingConcat {
    pub fn calls(&self) -> Vec<ConcatCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Concatenator for RecordingConcat {
    fn concat(&self, manifest: &Path, output: &Path) -> Result<(), ConcatError> {
        let manifest_text = std::fs::read_to_string(manifest).unwrap_or_default();
        self.calls.lock().unwrap().push(ConcatCall {
            manifest: manifest.to_path_buf(),
            manifest_text,
            output: output.to_path_buf(),
        });
        Ok(())
    }
}

/// Writes `text` as `index.m3u8` in `dir` and returns its path.
pub fn write_index(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("index.m3u8");
    std::fs::write(&path, text).unwrap();
    path
}

/// Expected manifest text for slots `0..n` in `temp_dir`.
pub fn expected_manifest(temp_dir: &Path, n: usize) -> String {
    (0..n)
        .map(|i| format!("file '{}'\n", temp_dir.join(format!("index-temp-{}.m3uindex", i)).display()))
        .collect()
}
