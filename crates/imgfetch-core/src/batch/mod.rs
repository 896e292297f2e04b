//! Batch orchestration over a list of URLs.
//!
//! Every URL is attempted exactly once, in input order when running
//! sequentially. One dedup index is threaded through the whole batch. A failed
//! URL never stops the batch.

mod pool;
mod urls;

pub use urls::{normalize_urls, split_url_list};

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::dedup::DedupIndex;
use crate::fetcher::{FetchError, FetchOutcome, FetchResult, ImageFetcher};
use crate::transport::HttpTransport;

/// Per-URL results are pushed here as they complete.
pub type ProgressSender = tokio::sync::mpsc::Sender<FetchResult>;

/// The per-URL step the batch drives. `ImageFetcher` is the real one.
pub trait FetchUrl: Send + Sync {
    fn fetch_url(&self, url: &str, dest_dir: &Path, dedup: &DedupIndex) -> FetchResult;
}

impl<T: HttpTransport> FetchUrl for ImageFetcher<T> {
    fn fetch_url(&self, url: &str, dest_dir: &Path, dedup: &DedupIndex) -> FetchResult {
        self.fetch(url, dest_dir, dedup)
    }
}

/// Aggregate outcome of one batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Successes: files written plus skipped duplicates.
    pub saved: usize,
    /// New files written in this run.
    pub written: usize,
    pub duplicates: usize,
    pub failed: usize,
    /// Distinct images seen in this run (size of the dedup index at the end).
    #[serde(rename = "totalDistinct")]
    pub total_distinct: usize,
    #[serde(skip)]
    pub results: Vec<FetchResult>,
}

impl BatchSummary {
    fn from_results(results: Vec<FetchResult>, total_distinct: usize) -> Self {
        let mut summary = BatchSummary {
            total_distinct,
            ..Default::default()
        };
        for r in &results {
            match r.outcome {
                FetchOutcome::Saved { .. } => summary.written += 1,
                FetchOutcome::SkippedDuplicate => summary.duplicates += 1,
                FetchOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary.saved = summary.written + summary.duplicates;
        summary.results = results;
        summary
    }

    pub fn attempted(&self) -> usize {
        self.results.len()
    }
}

pub struct BatchRunner<F> {
    fetcher: F,
    dest_dir: PathBuf,
    workers: usize,
}

impl<F: FetchUrl> BatchRunner<F> {
    pub fn new(fetcher: F, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            dest_dir: dest_dir.into(),
            workers: 1,
        }
    }

    /// Number of URLs fetched at once. 1 (the default) is strictly sequential.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn run<I, S>(&self, urls: I, dedup: &DedupIndex) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_with_progress(urls, dedup, None)
    }

    /// Like `run`, also sending each result to `progress` as soon as it is known.
    ///
    /// Must be called from a blocking context (a plain thread or
    /// `tokio::task::spawn_blocking`): progress is delivered with `blocking_send`,
    /// which panics inside an async task.
    pub fn run_with_progress<I, S>(
        &self,
        urls: I,
        dedup: &DedupIndex,
        progress: Option<&ProgressSender>,
    ) -> BatchSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls = normalize_urls(urls);
        tracing::info!(
            count = urls.len(),
            workers = self.workers,
            dir = %self.dest_dir.display(),
            "starting batch"
        );

        let results = if self.workers > 1 && urls.len() > 1 {
            pool::run_pooled(
                &self.fetcher,
                &self.dest_dir,
                &urls,
                dedup,
                self.workers,
                progress,
            )
        } else {
            urls.iter()
                .map(|url| {
                    let result = fetch_guarded(&self.fetcher, url, &self.dest_dir, dedup);
                    report_progress(progress, &result);
                    result
                })
                .collect()
        };

        let summary = BatchSummary::from_results(results, dedup.len());
        tracing::info!(
            saved = summary.saved,
            written = summary.written,
            duplicates = summary.duplicates,
            failed = summary.failed,
            total_distinct = summary.total_distinct,
            "batch finished"
        );
        summary
    }
}

/// Runs one fetch; a panic inside it becomes a failed result for that URL.
fn fetch_guarded<F: FetchUrl>(
    fetcher: &F,
    url: &str,
    dest_dir: &Path,
    dedup: &DedupIndex,
) -> FetchResult {
    match panic::catch_unwind(AssertUnwindSafe(|| fetcher.fetch_url(url, dest_dir, dedup))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic".to_string());
            tracing::error!(url = %url, "fetch panicked: {}", msg);
            FetchResult::failed(url, FetchError::Unexpected(msg))
        }
    }
}

fn report_progress(progress: Option<&ProgressSender>, result: &FetchResult) {
    if let Some(tx) = progress {
        // Receiver gone means nobody is listening; the batch carries on.
        let _ = tx.blocking_send(result.clone());
    }
}
