//! Retry and backoff policy for segment fetches.
//!
//! Error classification (timeouts, throttling, connection failures, empty
//! bodies) and backoff decisions live here so the downloader's workers share
//! one policy. The default policy never gives up on a segment; a bounded
//! policy turns a persistently failing segment into a terminal failure instead.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryExhausted};
