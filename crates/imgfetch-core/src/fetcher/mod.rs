//! Single-URL fetch pipeline.
//!
//! Order per URL: ensure the collection directory, GET with timeout, buffer
//! the whole body, check headers against the safety policy, fingerprint and
//! consult the dedup index, resolve a filename, write the file. An accepted
//! response with an empty body is an unexpected error. The first
//! failing step decides the outcome; nothing is retried.
//!
//! The fingerprint is recorded before the write. If the write then fails, a
//! later fetch of the same bytes in this batch is reported as a duplicate.

mod error;

pub use error::FetchError;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ImageFetchConfig;
use crate::dedup::DedupIndex;
use crate::fingerprint::fingerprint;
use crate::safety::{SafetyValidator, ValidationVerdict};
use crate::transport::{CurlTransport, HttpTransport};
use crate::url_model::resolve_filename;

/// What happened to one URL.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Saved { filename: String, path: PathBuf },
    /// Content already in the collection (same fingerprint earlier in the batch).
    SkippedDuplicate,
    Failed(FetchError),
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub outcome: FetchOutcome,
    /// Body size in bytes; 0 when no body was received.
    pub bytes: u64,
}

impl FetchResult {
    pub fn failed(url: &str, err: FetchError) -> Self {
        Self {
            url: url.to_string(),
            outcome: FetchOutcome::Failed(err),
            bytes: 0,
        }
    }

    /// Saved and skipped-duplicate both count as success.
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, FetchOutcome::Failed(_))
    }

    pub fn filename(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Saved { filename, .. } => Some(filename),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.outcome {
            FetchOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Runs the pipeline for one URL at a time over an `HttpTransport`.
#[derive(Debug, Clone)]
pub struct ImageFetcher<T = CurlTransport> {
    transport: T,
    validator: SafetyValidator,
}

impl ImageFetcher<CurlTransport> {
    /// Curl transport and safety ceiling taken from config.
    pub fn from_config(cfg: &ImageFetchConfig) -> Self {
        Self::new(
            CurlTransport::new(Duration::from_secs(cfg.request_timeout_secs)),
            SafetyValidator::new(cfg.max_image_bytes),
        )
    }
}

impl<T: HttpTransport> ImageFetcher<T> {
    pub fn new(transport: T, validator: SafetyValidator) -> Self {
        Self {
            transport,
            validator,
        }
    }

    /// Fetches `url` into `dest_dir`, consulting and updating `dedup`.
    pub fn fetch(&self, url: &str, dest_dir: &Path, dedup: &DedupIndex) -> FetchResult {
        tracing::info!(url = %url, "fetching");
        let result = match self.try_fetch(url, dest_dir, dedup) {
            Ok(result) => result,
            Err((err, bytes)) => FetchResult {
                url: url.to_string(),
                outcome: FetchOutcome::Failed(err),
                bytes,
            },
        };

        match &result.outcome {
            FetchOutcome::Saved { path, .. } => {
                tracing::info!(url = %url, path = %path.display(), bytes = result.bytes, "saved")
            }
            FetchOutcome::SkippedDuplicate => {
                tracing::info!(url = %url, bytes = result.bytes, "duplicate skipped")
            }
            FetchOutcome::Failed(e) => {
                tracing::warn!(url = %url, kind = e.kind(), "fetch failed: {}", e)
            }
        }
        result
    }

    fn try_fetch(
        &self,
        url: &str,
        dest_dir: &Path,
        dedup: &DedupIndex,
    ) -> Result<FetchResult, (FetchError, u64)> {
        fs::create_dir_all(dest_dir)
            .map_err(|e| (FetchError::directory(dest_dir.to_path_buf(), e), 0))?;

        let response = self
            .transport
            .get(url)
            .map_err(|e| (FetchError::from(e), 0))?;
        let bytes = response.body.len() as u64;

        if response.status == 0 || response.status > 599 {
            return Err((
                FetchError::Unexpected(format!("invalid HTTP status {}", response.status)),
                bytes,
            ));
        }
        if response.is_error_status() {
            return Err((
                FetchError::HttpStatus {
                    code: response.status,
                    reason: response.reason,
                },
                bytes,
            ));
        }

        if let ValidationVerdict::Rejected(rejection) = self.validator.validate(&response.headers) {
            return Err((FetchError::Validation(rejection), bytes));
        }
        if response.body.is_empty() {
            return Err((FetchError::Unexpected("empty response body".into()), 0));
        }

        let fp = fingerprint(&response.body);
        if !dedup.insert_if_new(fp) {
            tracing::debug!(url = %url, fingerprint = %fp, "already in collection");
            return Ok(FetchResult {
                url: url.to_string(),
                outcome: FetchOutcome::SkippedDuplicate,
                bytes,
            });
        }

        let filename = resolve_filename(url, response.headers.content_type.as_deref());
        let path = dest_dir.join(&filename);
        fs::write(&path, &response.body).map_err(|e| (FetchError::write(path.clone(), e), bytes))?;

        Ok(FetchResult {
            url: url.to_string(),
            outcome: FetchOutcome::Saved { filename, path },
            bytes,
        })
    }
}
