//! Metrics for matchmaking operations.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for matchmaking.
///
/// `claim_conflicts` counts lost races that were retried internally; it
/// grows under contention without any request failing.
#[derive(Debug, Default)]
pub struct Metrics {
    /// New public searches opened.
    pub searches_opened: AtomicU64,
    /// Open seats successfully claimed.
    pub claims_won: AtomicU64,
    /// Claim attempts that lost their race and were retried.
    pub claim_conflicts: AtomicU64,
    /// Searches cancelled before an opponent arrived.
    pub cancellations: AtomicU64,
    /// Cancellations that resolved to an already-live game.
    pub cancels_too_late: AtomicU64,
    /// Requests that rejoined a search claimed mid-flight.
    pub rejoins: AtomicU64,
    /// Private sessions created.
    pub private_created: AtomicU64,
    /// Successful joins via invite code.
    pub code_joins: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_search_opened(&self) {
        self.searches_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_claim_won(&self) {
        self.claims_won.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_claim_conflict(&self) {
        self.claim_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancellation(&self) {
        self.cancellations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancel_too_late(&self) {
        self.cancels_too_late.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejoin(&self) {
        self.rejoins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_private_created(&self) {
        self.private_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_code_join(&self) {
        self.code_joins.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches_opened: self.searches_opened.load(Ordering::Relaxed),
            claims_won: self.claims_won.load(Ordering::Relaxed),
            claim_conflicts: self.claim_conflicts.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
            cancels_too_late: self.cancels_too_late.load(Ordering::Relaxed),
            rejoins: self.rejoins.load(Ordering::Relaxed),
            private_created: self.private_created.load(Ordering::Relaxed),
            code_joins: self.code_joins.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub searches_opened: u64,
    pub claims_won: u64,
    pub claim_conflicts: u64,
    pub cancellations: u64,
    pub cancels_too_late: u64,
    pub rejoins: u64,
    pub private_created: u64,
    pub code_joins: u64,
}
