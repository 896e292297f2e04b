//! HTTP transport seam.
//!
//! The fetcher only needs "GET with timeout, streamed body, response headers".
//! `CurlTransport` provides that over libcurl; tests substitute their own
//! `HttpTransport`.

mod classify;
mod curl_transport;
mod parse;

pub use classify::classify_curl_error;
pub use curl_transport::CurlTransport;
pub use parse::{parse_headers, parse_status_line};

use thiserror::Error;

/// Default total time bound for one GET, connect through last body byte.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Headers the safety policy and filename resolver look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    /// `Content-Type` value as sent, if any.
    pub content_type: Option<String>,
    /// `Content-Length`, if present and numeric.
    pub content_length: Option<u64>,
}

/// A completed GET: final status, headers of the final response, full body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// Reason phrase from the status line; empty for HTTP/2.
    pub reason: String,
    pub headers: ResponseHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_error_status(&self) -> bool {
        self.status >= 400
    }
}

/// Transport-level failure, already classified.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("{0}")]
    Other(String),
}

pub trait HttpTransport: Send + Sync {
    /// Issues a GET and returns once the whole body has been received.
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}
