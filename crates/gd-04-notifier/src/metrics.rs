//! Metrics for watch delivery.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the notifier.
///
/// `poll_deliveries` counts snapshots the push path missed; a healthy bus
/// keeps it near zero while `pushes_delivered` grows.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Watches started.
    pub watches_started: AtomicU64,
    /// Watches that ended (terminal, deleted, or consumer gone).
    pub watches_ended: AtomicU64,
    /// Snapshots delivered from bus events.
    pub pushes_delivered: AtomicU64,
    /// Fallback polls performed.
    pub polls_performed: AtomicU64,
    /// Snapshots delivered from fallback polls.
    pub poll_deliveries: AtomicU64,
    /// Snapshots dropped as duplicate or stale.
    pub stale_skipped: AtomicU64,
    /// Polls that failed transiently and were retried on cadence.
    pub transient_poll_failures: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_watch_started(&self) {
        self.watches_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_watch_ended(&self) {
        self.watches_ended.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_push_delivered(&self) {
        self.pushes_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poll(&self) {
        self.polls_performed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_poll_delivery(&self) {
        self.poll_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stale_skip(&self) {
        self.stale_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transient_poll_failure(&self) {
        self.transient_poll_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            watches_started: self.watches_started.load(Ordering::Relaxed),
            watches_ended: self.watches_ended.load(Ordering::Relaxed),
            pushes_delivered: self.pushes_delivered.load(Ordering::Relaxed),
            polls_performed: self.polls_performed.load(Ordering::Relaxed),
            poll_deliveries: self.poll_deliveries.load(Ordering::Relaxed),
            stale_skipped: self.stale_skipped.load(Ordering::Relaxed),
            transient_poll_failures: self.transient_poll_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub watches_started: u64,
    pub watches_ended: u64,
    pub pushes_delivered: u64,
    pub polls_performed: u64,
    pub poll_deliveries: u64,
    pub stale_skipped: u64,
    pub transient_poll_failures: u64,
}
