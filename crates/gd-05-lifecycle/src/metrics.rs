//! Metrics for presence tracking and reclamation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the lifecycle manager.
///
/// The presence counters and the sweep counters share one collector; the
/// sweeper is built from the service and writes into the same instance.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Disconnect stamps applied.
    pub disconnects_marked: AtomicU64,
    /// Disconnect stamps cleared by a returning participant.
    pub reconnects_marked: AtomicU64,
    /// Sweep passes completed.
    pub sweeps: AtomicU64,
    /// Live sessions retired after an expired grace period.
    pub abandons_applied: AtomicU64,
    /// Live sessions completed by the sweeper on clock exhaustion.
    pub clock_exhaustions: AtomicU64,
    /// Stale searches reclaimed after the waiting TTL.
    pub expired_waits: AtomicU64,
    /// Sweep actions skipped because the record changed concurrently.
    pub conflicts_skipped: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_disconnect(&self) {
        self.disconnects_marked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reconnect(&self) {
        self.reconnects_marked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sweep(&self) {
        self.sweeps.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_abandon(&self) {
        self.abandons_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_clock_exhaustion(&self) {
        self.clock_exhaustions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired_wait(&self) {
        self.expired_waits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conflict_skip(&self) {
        self.conflicts_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            disconnects_marked: self.disconnects_marked.load(Ordering::Relaxed),
            reconnects_marked: self.reconnects_marked.load(Ordering::Relaxed),
            sweeps: self.sweeps.load(Ordering::Relaxed),
            abandons_applied: self.abandons_applied.load(Ordering::Relaxed),
            clock_exhaustions: self.clock_exhaustions.load(Ordering::Relaxed),
            expired_waits: self.expired_waits.load(Ordering::Relaxed),
            conflicts_skipped: self.conflicts_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub disconnects_marked: u64,
    pub reconnects_marked: u64,
    pub sweeps: u64,
    pub abandons_applied: u64,
    pub clock_exhaustions: u64,
    pub expired_waits: u64,
    pub conflicts_skipped: u64,
}
