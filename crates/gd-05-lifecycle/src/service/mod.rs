//! Lifecycle service: presence stamps over the session store.
//!
//! A presence change is one guarded patch. The guard only demands the
//! session still be live; losing that race means the match concluded, and
//! the operation degrades to returning whatever the record became.

pub mod sweeper;

pub use sweeper::{ReclamationSweeper, SweepReport};

use crate::domain::{LifecycleConfig, LifecycleError};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ports::LifecycleApi;
use gd_01_session_store::{SessionGuard, SessionPatch, SessionStoreApi};
use shared_bus::EventPublisher;
use shared_types::clock::{SystemTimeSource, TimeSource};
use shared_types::entities::{PlayerId, Session, SessionId, SessionStatus};
use shared_types::errors::StoreError;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle service.
pub struct LifecycleService<S>
where
    S: SessionStoreApi,
{
    store: Arc<S>,
    config: LifecycleConfig,
    time_source: Arc<dyn TimeSource>,
    metrics: Arc<Metrics>,
}

/// Dependencies for `LifecycleService`.
pub struct LifecycleDependencies<S> {
    pub store: Arc<S>,
    pub config: LifecycleConfig,
}

impl<S> LifecycleService<S>
where
    S: SessionStoreApi,
{
    /// Create a new `LifecycleService`.
    pub fn new(deps: LifecycleDependencies<S>) -> Self {
        Self {
            store: deps.store,
            config: deps.config,
            time_source: Arc::new(SystemTimeSource),
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Set custom time source (for testing).
    ///
    /// Shared rather than owned: the sweeper built from this service reads
    /// the same clock.
    #[must_use]
    pub fn with_time_source(mut self, time_source: Arc<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Builds the reclamation sweeper that enforces this service's grace
    /// period and waiting TTL, writing into the same metrics collector.
    pub fn sweeper<P: EventPublisher>(&self, bus: Arc<P>) -> ReclamationSweeper<S, P> {
        ReclamationSweeper::new(
            self.store.clone(),
            bus,
            self.config.clone(),
            self.time_source.clone(),
            self.metrics.clone(),
        )
    }

    /// Current operation counters, presence and sweep alike.
    #[must_use]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<S> LifecycleApi for LifecycleService<S>
where
    S: SessionStoreApi,
{
    fn mark_disconnected(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
    ) -> Result<Session, LifecycleError> {
        let session = self.store.get(session_id)?;
        let Some(mark) = session.mark_of(player) else {
            return Err(LifecycleError::NotAParticipant);
        };
        if session.status != SessionStatus::Playing {
            return Ok(session);
        }
        // The first stamp starts the grace clock; a reconnect-free repeat
        // must not restart it.
        if session.disconnected_since(mark).is_some() {
            return Ok(session);
        }

        let now = self.time_source.now();
        let guard = SessionGuard::any().with_status(SessionStatus::Playing);
        let patch = SessionPatch::new().with_disconnect(mark, now);

        match self.store.conditional_update(session_id, &guard, patch) {
            Ok(updated) => {
                self.metrics.record_disconnect();
                debug!(session_id = %updated.id, player = %player, "Disconnect stamped");
                Ok(updated)
            }
            // The match concluded first; nothing left to stamp.
            Err(StoreError::Conflict { .. }) => Ok(self.store.get(session_id)?),
            Err(e) => Err(e.into()),
        }
    }

    fn mark_reconnected(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
    ) -> Result<Session, LifecycleError> {
        let session = self.store.get(session_id)?;
        let Some(mark) = session.mark_of(player) else {
            return Err(LifecycleError::NotAParticipant);
        };
        if session.status != SessionStatus::Playing
            || session.disconnected_since(mark).is_none()
        {
            return Ok(session);
        }

        let guard = SessionGuard::any().with_status(SessionStatus::Playing);
        let patch = SessionPatch::new().with_reconnect(mark);

        match self.store.conditional_update(session_id, &guard, patch) {
            Ok(updated) => {
                self.metrics.record_reconnect();
                debug!(session_id = %updated.id, player = %player, "Disconnect stamp cleared");
                Ok(updated)
            }
            Err(StoreError::Conflict { .. }) => Ok(self.store.get(session_id)?),
            Err(e) => Err(e.into()),
        }
    }
}
