use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a single worker.
///
/// Only the owning worker writes; anyone holding the `Arc` may read.
#[derive(Debug)]
pub struct WorkerStats {
    published: AtomicU64,
    polls: AtomicU64,
    empty_polls: AtomicU64,
    received: AtomicU64,
    deleted: AtomicU64,
    delete_failures: AtomicU64,
    started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub published: u64,
    pub polls: u64,
    pub empty_polls: u64,
    pub received: u64,
    pub deleted: u64,
    pub delete_failures: u64,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: i64,
}

impl WorkerStats {
    pub fn new() -> Self {
        Self {
            published: AtomicU64::new(0),
            polls: AtomicU64::new(0),
            empty_polls: AtomicU64::new(0),
            received: AtomicU64::new(0),
            deleted: AtomicU64::new(0),
            delete_failures: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poll(&self, empty: bool) {
        self.polls.fetch_add(1, Ordering::Relaxed);
        if empty {
            self.empty_polls.fetch_add(1, Ordering::Relaxed);
        } else {
            self.received.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_deleted(&self) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete_failure(&self) {
        self.delete_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            published: self.published.load(Ordering::Relaxed),
            polls: self.polls.load(Ordering::Relaxed),
            empty_polls: self.empty_polls.load(Ordering::Relaxed),
            received: self.received.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
            delete_failures: self.delete_failures.load(Ordering::Relaxed),
            started_at: self.started_at,
            uptime_secs: (Utc::now() - self.started_at).num_seconds(),
        }
    }
}

impl Default for WorkerStats {
    fn default() -> Self {
        Self::new()
    }
}
