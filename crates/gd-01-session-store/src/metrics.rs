//! Metrics for session store operations.
//!
//! Thread-safe counters sampled via [`Metrics::snapshot`]. Conflict counts
//! are expected to be non-zero under load; they measure race pressure, not
//! failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for store operations.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total records created.
    pub sessions_created: AtomicU64,
    /// Total guarded updates accepted.
    pub updates_applied: AtomicU64,
    /// Total guarded deletes accepted.
    pub deletes_applied: AtomicU64,
    /// Total guard violations (updates and deletes).
    pub guard_conflicts: AtomicU64,
    /// Total lookups that found no record.
    pub misses: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted create.
    pub fn record_create(&self) {
        self.sessions_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted guarded update.
    pub fn record_update(&self) {
        self.updates_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted guarded delete.
    pub fn record_delete(&self) {
        self.deletes_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a guard violation.
    pub fn record_conflict(&self) {
        self.guard_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup miss.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sessions_created: self.sessions_created.load(Ordering::Relaxed),
            updates_applied: self.updates_applied.load(Ordering::Relaxed),
            deletes_applied: self.deletes_applied.load(Ordering::Relaxed),
            guard_conflicts: self.guard_conflicts.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub sessions_created: u64,
    pub updates_applied: u64,
    pub deletes_applied: u64,
    pub guard_conflicts: u64,
    pub misses: u64,
}
