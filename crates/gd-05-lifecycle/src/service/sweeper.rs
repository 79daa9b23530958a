//! Background reclamation. One pass scans live and waiting sessions and
//! retires whatever crossed a deadline:
//!
//! - a `Playing` session whose disconnect stamp outlived the grace period
//!   becomes `Abandoned` (no winner),
//! - a `Playing` session whose mover spent their whole budget becomes
//!   `Completed` with the opponent as winner,
//! - an unclaimed `Waiting` search older than the TTL is deleted.
//!
//! Every write is guarded on the revision observed during the scan, so a
//! session that changed hands mid-pass is skipped and reconsidered on the
//! next tick. The sweeper never touches terminal records.

use crate::domain::LifecycleConfig;
use crate::metrics::Metrics;
use gd_01_session_store::{SessionGuard, SessionPatch, SessionStoreApi};
use shared_bus::{EventPublisher, SessionEvent};
use shared_types::clock::TimeSource;
use shared_types::entities::{PlayerMark, Session, SessionStatus, Timestamp, Winner};
use shared_types::errors::StoreError;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// What one sweep pass actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Sessions retired after an expired grace period.
    pub abandoned: usize,
    /// Sessions completed because the mover's clock ran out.
    pub timed_out: usize,
    /// Unclaimed searches deleted after the waiting TTL.
    pub expired: usize,
}

impl SweepReport {
    /// `true` when the pass changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Periodic reclamation task. Built from `LifecycleService::sweeper`; runs
/// until the surrounding runtime drops it.
pub struct ReclamationSweeper<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    store: Arc<S>,
    bus: Arc<P>,
    config: LifecycleConfig,
    time_source: Arc<dyn TimeSource>,
    metrics: Arc<Metrics>,
}

impl<S, P> ReclamationSweeper<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    pub(crate) fn new(
        store: Arc<S>,
        bus: Arc<P>,
        config: LifecycleConfig,
        time_source: Arc<dyn TimeSource>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            store,
            bus,
            config,
            time_source,
            metrics,
        }
    }

    /// Sweep on a fixed cadence, forever.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(
            interval_ms = self.config.sweep_interval.as_millis() as u64,
            "Reclamation sweeper started"
        );
        loop {
            ticker.tick().await;
            self.sweep_once().await;
        }
    }

    /// One full pass over the store.
    pub async fn sweep_once(&self) -> SweepReport {
        let now = self.time_source.now();
        let mut report = SweepReport::default();

        for session in self.store.sessions_in_status(SessionStatus::Playing) {
            // Abandonment outranks the clock: a vanished player should not
            // be handed a timeout loss while their seat is in grace.
            if self.grace_expired(&session, now) {
                self.abandon(&session, &mut report).await;
                continue;
            }
            if clock_exhausted(&session, now) {
                self.settle_on_time(&session, &mut report).await;
            }
        }

        for session in self.store.sessions_in_status(SessionStatus::Waiting) {
            if now.saturating_sub(session.created_at) >= self.config.waiting_ttl_ms {
                self.expire_search(&session, &mut report).await;
            }
        }

        self.metrics.record_sweep();
        if !report.is_empty() {
            info!(
                abandoned = report.abandoned,
                timed_out = report.timed_out,
                expired = report.expired,
                "Reclamation sweep retired sessions"
            );
        }
        report
    }

    fn grace_expired(&self, session: &Session, now: Timestamp) -> bool {
        [PlayerMark::A, PlayerMark::B].into_iter().any(|mark| {
            session
                .disconnected_since(mark)
                .is_some_and(|since| now.saturating_sub(since) >= self.config.grace_period_ms)
        })
    }

    async fn abandon(&self, session: &Session, report: &mut SweepReport) {
        // Guarding on the scanned revision means a reconnect that landed
        // after the scan wins: its bump fails this update.
        let guard = SessionGuard::any()
            .with_status(SessionStatus::Playing)
            .with_revision(session.revision);
        let patch = SessionPatch::new().with_status(SessionStatus::Abandoned);

        match self.store.conditional_update(&session.id, &guard, patch) {
            Ok(retired) => {
                report.abandoned += 1;
                self.metrics.record_abandon();
                info!(session_id = %retired.id, "Session abandoned after grace period");
                self.bus
                    .publish(SessionEvent::SessionAbandoned { session: retired })
                    .await;
            }
            Err(StoreError::Conflict { .. } | StoreError::NotFound(_)) => {
                self.metrics.record_conflict_skip();
                debug!(session_id = %session.id, "Abandon skipped, session moved on");
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Abandon update failed");
            }
        }
    }

    async fn settle_on_time(&self, session: &Session, report: &mut SweepReport) {
        let loser = session.current_turn;
        let Some(winner_id) = session.player_with(loser.opponent()) else {
            return;
        };

        let guard = SessionGuard::any()
            .with_status(SessionStatus::Playing)
            .with_revision(session.revision);
        let patch = SessionPatch::new()
            .with_status(SessionStatus::Completed)
            .with_winner(Winner::Player(winner_id))
            .with_time_left(loser, 0);

        match self.store.conditional_update(&session.id, &guard, patch) {
            Ok(completed) => {
                report.timed_out += 1;
                self.metrics.record_clock_exhaustion();
                info!(
                    session_id = %completed.id,
                    loser = %loser,
                    "Session completed on clock exhaustion"
                );
                self.bus
                    .publish(SessionEvent::SessionCompleted { session: completed })
                    .await;
            }
            Err(StoreError::Conflict { .. } | StoreError::NotFound(_)) => {
                self.metrics.record_conflict_skip();
                debug!(session_id = %session.id, "Timeout skipped, session moved on");
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Timeout update failed");
            }
        }
    }

    async fn expire_search(&self, session: &Session, report: &mut SweepReport) {
        let guard = SessionGuard::any()
            .with_status(SessionStatus::Waiting)
            .unclaimed()
            .with_revision(session.revision);

        match self.store.delete(&session.id, &guard) {
            Ok(removed) => {
                report.expired += 1;
                self.metrics.record_expired_wait();
                info!(session_id = %removed.id, "Stale search expired");
                self.bus
                    .publish(SessionEvent::SessionDeleted {
                        session_id: removed.id,
                    })
                    .await;
            }
            Err(StoreError::Conflict { .. } | StoreError::NotFound(_)) => {
                self.metrics.record_conflict_skip();
                debug!(session_id = %session.id, "Expiry skipped, search was claimed");
            }
            Err(e) => {
                warn!(session_id = %session.id, error = %e, "Expiry delete failed");
            }
        }
    }
}

fn clock_exhausted(session: &Session, now: Timestamp) -> bool {
    now.saturating_sub(session.turn_started_at) >= session.time_left(session.current_turn)
}
