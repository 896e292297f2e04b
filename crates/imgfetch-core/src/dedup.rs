//! In-memory dedup index for one batch run.
//!
//! Holds every fingerprint seen so far. Append-only; dropped with the process,
//! nothing is persisted between runs.

use std::collections::HashSet;
use std::sync::Mutex;

use crate::fingerprint::Fingerprint;

/// Set of content fingerprints shared by all fetches of a batch.
///
/// Share it by reference (or `Arc`) across worker threads; the check and the
/// insert happen under one lock acquisition.
#[derive(Debug, Default)]
pub struct DedupIndex {
    seen: Mutex<HashSet<Fingerprint>>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `fp` and returns `true` if it had not been seen before.
    ///
    /// Of several callers racing on the same fingerprint exactly one gets `true`.
    pub fn insert_if_new(&self, fp: Fingerprint) -> bool {
        self.lock().insert(fp)
    }

    pub fn contains(&self, fp: &Fingerprint) -> bool {
        self.lock().contains(fp)
    }

    /// Number of distinct fingerprints seen.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<Fingerprint>> {
        // The set stays consistent even if a holder panicked: inserts are single calls.
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
