//! Shared counters reporting how far a collection run got.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of collection progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Expected number of entities.
    pub total: u64,
    /// Entities listed so far.
    pub collected: u64,
}

/// Lock-free progress counters shared by a collector and its reporters.
#[derive(Debug, Default)]
pub struct CollectionProgress {
    total: AtomicU64,
    collected: AtomicU64,
}

impl CollectionProgress {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to the expected total.
    pub fn total_change(&self, delta: u64) {
        self.total.fetch_add(delta, Ordering::Relaxed);
    }

    /// Adds to the number of listed entities.
    pub fn collection_change(&self, delta: u64) {
        self.collected.fetch_add(delta, Ordering::Relaxed);
    }

    /// Reads both counters.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.total.load(Ordering::Relaxed),
            collected: self.collected.load(Ordering::Relaxed),
        }
    }
}
