//! Bounded worker pool for running fetches on several threads.
//!
//! Workers pull `(index, url)` pairs from a shared queue until it is empty and
//! send each result back with its index, so the caller can restore input order.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::mpsc;
use std::sync::Mutex;

use super::{fetch_guarded, report_progress, FetchUrl, ProgressSender};
use crate::dedup::DedupIndex;
use crate::fetcher::FetchResult;

pub(super) fn run_pooled<F: FetchUrl>(
    fetcher: &F,
    dest_dir: &Path,
    urls: &[String],
    dedup: &DedupIndex,
    workers: usize,
    progress: Option<&ProgressSender>,
) -> Vec<FetchResult> {
    let count = urls.len();
    let work: Mutex<VecDeque<(usize, &str)>> =
        Mutex::new(urls.iter().map(String::as_str).enumerate().collect());
    let (tx, rx) = mpsc::channel::<(usize, FetchResult)>();
    let num_workers = workers.clamp(1, count.max(1));

    std::thread::scope(|scope| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            scope.spawn(move || loop {
                let next = work
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .pop_front();
                let Some((index, url)) = next else {
                    break;
                };
                let result = fetch_guarded(fetcher, url, dest_dir, dedup);
                report_progress(progress, &result);
                if tx.send((index, result)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<FetchResult>> = (0..count).map(|_| None).collect();
    for (index, result) in rx {
        slots[index] = Some(result);
    }
    slots
        .into_iter()
        .zip(urls)
        .map(|(slot, url)| {
            slot.unwrap_or_else(|| {
                FetchResult::failed(
                    url,
                    crate::fetcher::FetchError::Unexpected("worker produced no result".into()),
                )
            })
        })
        .collect()
}
