//! Header-based safety policy.
//!
//! Only response headers are inspected, never the body. `Content-Length` is
//! trusted as declared: a server that omits or lies about it is not caught
//! here.

use std::fmt;

use crate::transport::ResponseHeaders;

/// Default ceiling on the declared body size (10 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

const IMAGE_PREFIX: &str = "image/";

/// Why a response was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// `Content-Type` missing or not `image/*`.
    UnsupportedContentType { content_type: Option<String> },
    /// `Content-Length` above the configured ceiling.
    ExceedsSizeLimit { declared: u64, limit: u64 },
}

impl Rejection {
    /// Short stable tag for summaries and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::UnsupportedContentType { .. } => "unsupported content type",
            Rejection::ExceedsSizeLimit { .. } => "exceeds size limit",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnsupportedContentType { content_type } => write!(
                f,
                "unsupported content type: {}",
                content_type.as_deref().unwrap_or("<none>")
            ),
            Rejection::ExceedsSizeLimit { declared, limit } => write!(
                f,
                "exceeds size limit: {} bytes declared, limit {}",
                declared, limit
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Accepted,
    Rejected(Rejection),
}

impl ValidationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationVerdict::Accepted)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SafetyValidator {
    max_bytes: u64,
}

impl Default for SafetyValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl SafetyValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    pub fn validate(&self, headers: &ResponseHeaders) -> ValidationVerdict {
        let is_image = headers
            .content_type
            .as_deref()
            .and_then(|ct| ct.trim_start().get(..IMAGE_PREFIX.len()))
            .map(|prefix| prefix.eq_ignore_ascii_case(IMAGE_PREFIX))
            .unwrap_or(false);
        if !is_image {
            return ValidationVerdict::Rejected(Rejection::UnsupportedContentType {
                content_type: headers.content_type.clone(),
            });
        }

        if let Some(declared) = headers.content_length {
            if declared > self.max_bytes {
                return ValidationVerdict::Rejected(Rejection::ExceedsSizeLimit {
                    declared,
                    limit: self.max_bytes,
                });
            }
        }

        ValidationVerdict::Accepted
    }
}
