//! imgfetch core: fetch images from URLs, check them against header policy,
//! drop byte-identical duplicates, and save the rest into a collection folder.

pub mod config;
pub mod logging;

pub mod batch;
pub mod dedup;
pub mod fetcher;
pub mod fingerprint;
pub mod safety;
pub mod transport;
pub mod url_model;

pub use batch::{BatchRunner, BatchSummary, FetchUrl};
pub use dedup::DedupIndex;
pub use fetcher::{FetchError, FetchOutcome, FetchResult, ImageFetcher};
