pub mod config;
pub mod logging;

pub mod concat;
pub mod downloader;
pub mod fetch;
pub mod manifest;
pub mod playlist;
pub mod progress;
pub mod resume;
pub mod retry;
pub mod scheduler;
pub mod segmenter;
pub mod storage;
