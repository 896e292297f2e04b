//! Per-URL failure taxonomy.
//!
//! Every variant is scoped to a single URL; the batch keeps going.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::safety::Rejection;
use crate::transport::TransportError;

#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Destination directory could not be created.
    #[error("directory error: {}: {source}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("request timed out")]
    Timeout,
    #[error("connection error: {0}")]
    Connection(String),
    /// Server answered with a 4xx/5xx status.
    #[error("http error: {code} {reason}")]
    HttpStatus { code: u32, reason: String },
    /// Any other request-level failure (bad URL, protocol error, ...).
    #[error("request error: {0}")]
    Transport(String),
    #[error("safety check failed: {0}")]
    Validation(Rejection),
    #[error("write error: {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl FetchError {
    pub(crate) fn directory(path: PathBuf, source: io::Error) -> Self {
        FetchError::Directory {
            path,
            source: Arc::new(source),
        }
    }

    pub(crate) fn write(path: PathBuf, source: io::Error) -> Self {
        FetchError::Write {
            path,
            source: Arc::new(source),
        }
    }

    /// Short stable tag used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Directory { .. } => "directory error",
            FetchError::Timeout => "timeout",
            FetchError::Connection(_) => "connection error",
            FetchError::HttpStatus { .. } => "http error",
            FetchError::Transport(_) => "request error",
            FetchError::Validation(r) => r.reason(),
            FetchError::Write { .. } => "write error",
            FetchError::Unexpected(_) => "unexpected error",
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout => FetchError::Timeout,
            TransportError::Connection(msg) => FetchError::Connection(msg),
            TransportError::Other(msg) => FetchError::Transport(msg),
        }
    }
}
