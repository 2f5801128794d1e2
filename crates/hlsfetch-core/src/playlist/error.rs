//! Errors raised before any segment is dispatched.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    /// Base URL does not parse, lacks a scheme or a host, or does not end with `/`.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("cannot read index '{}'", .path.display())]
    IndexUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Index contains no segment references (empty, or only directives).
    #[error("index contains no segment references")]
    EmptyIndex,

    /// A reference could not be joined onto the base URL.
    #[error("line {line}: cannot resolve segment reference '{reference}'")]
    InvalidReference {
        line: usize,
        reference: String,
        #[source]
        source: url::ParseError,
    },
}
