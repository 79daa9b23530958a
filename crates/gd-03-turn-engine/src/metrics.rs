//! Metrics for move processing.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for the turn engine.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Moves validated and written.
    pub moves_applied: AtomicU64,
    /// Moves rejected during validation.
    pub moves_rejected: AtomicU64,
    /// Moves that lost the write race and were surfaced as conflicts.
    pub move_conflicts: AtomicU64,
    /// Matches decided by a winning line.
    pub wins_detected: AtomicU64,
    /// Matches decided by a full board.
    pub draws_detected: AtomicU64,
    /// Matches decided on time at move submission.
    pub timeouts_enforced: AtomicU64,
    /// Matches conceded.
    pub resignations: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_move_applied(&self) {
        self.moves_applied.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_move_rejected(&self) {
        self.moves_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_move_conflict(&self) {
        self.move_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_win(&self) {
        self.wins_detected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_draw(&self) {
        self.draws_detected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts_enforced.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resignation(&self) {
        self.resignations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            moves_applied: self.moves_applied.load(Ordering::Relaxed),
            moves_rejected: self.moves_rejected.load(Ordering::Relaxed),
            move_conflicts: self.move_conflicts.load(Ordering::Relaxed),
            wins_detected: self.wins_detected.load(Ordering::Relaxed),
            draws_detected: self.draws_detected.load(Ordering::Relaxed),
            timeouts_enforced: self.timeouts_enforced.load(Ordering::Relaxed),
            resignations: self.resignations.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub moves_applied: u64,
    pub moves_rejected: u64,
    pub move_conflicts: u64,
    pub wins_detected: u64,
    pub draws_detected: u64,
    pub timeouts_enforced: u64,
    pub resignations: u64,
}
