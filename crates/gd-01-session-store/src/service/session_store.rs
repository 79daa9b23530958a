//! In-memory session store.
//!
//! A `parking_lot::RwLock<HashMap>` behind the [`SessionStoreApi`] port.
//! Every mutating operation runs entirely under the write lock, so guard
//! evaluation plus patch application is one atomic step: concurrent
//! attempts on the same record serialize and exactly one wins. Critical
//! sections are short and never perform I/O, so the lock cannot be held
//! across an await point.

use crate::domain::{SessionDraft, SessionGuard, SessionPatch, StoreConfig};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ports::SessionStoreApi;
use parking_lot::RwLock;
use shared_types::clock::TimeSource;
use shared_types::entities::{
    Board, PlayerId, PlayerMark, Session, SessionId, SessionStatus,
};
use shared_types::errors::StoreError;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// In-memory implementation of the session store.
///
/// Suitable for single-process operation; a distributed deployment would
/// put a remote-backed implementation behind the same port.
pub struct InMemorySessionStore {
    /// Live records.
    sessions: RwLock<HashMap<SessionId, Session>>,
    /// Capacity bounds.
    config: StoreConfig,
    /// Clock for `created_at` / `turn_started_at` stamps.
    time_source: Arc<dyn TimeSource>,
    /// Operation counters.
    metrics: Metrics,
}

impl InMemorySessionStore {
    /// Creates a store with default configuration.
    #[must_use]
    pub fn new(time_source: Arc<dyn TimeSource>) -> Self {
        Self::with_config(StoreConfig::default(), time_source)
    }

    /// Creates a store with explicit configuration.
    #[must_use]
    pub fn with_config(config: StoreConfig, time_source: Arc<dyn TimeSource>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
            time_source,
            metrics: Metrics::new(),
        }
    }

    /// Current operation counters.
    #[must_use]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl SessionStoreApi for InMemorySessionStore {
    fn create(&self, draft: SessionDraft) -> Result<Session, StoreError> {
        let now = self.time_source.now();
        let mut sessions = self.sessions.write();

        if sessions.len() >= self.config.max_sessions {
            return Err(StoreError::Transient(format!(
                "store at capacity ({} records)",
                self.config.max_sessions
            )));
        }

        // One open search per player, public or private.
        if let Some(existing) = sessions
            .values()
            .find(|s| s.status == SessionStatus::Waiting && s.player_a == draft.player_a)
        {
            return Err(StoreError::conflict(
                existing.id,
                "owner already has an open search",
            ));
        }

        // Join codes must be unique among open sessions.
        if let Some(code) = &draft.join_code {
            if let Some(existing) = sessions.values().find(|s| {
                s.status == SessionStatus::Waiting
                    && s.join_code
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(code))
            }) {
                return Err(StoreError::conflict(existing.id, "join code in use"));
            }
        }

        let session = Session {
            id: SessionId::new(),
            status: SessionStatus::Waiting,
            player_a: draft.player_a,
            player_b: None,
            board: Board::new(draft.board_size),
            current_turn: PlayerMark::A,
            time_left_a: draft.initial_time_ms,
            time_left_b: draft.initial_time_ms,
            turn_started_at: now,
            winner: None,
            last_move: None,
            created_at: now,
            join_code: draft.join_code,
            disconnected_a: None,
            disconnected_b: None,
            revision: 1,
        };

        sessions.insert(session.id, session.clone());
        self.metrics.record_create();
        debug!(
            session_id = %session.id,
            owner = %session.player_a,
            private = session.is_private(),
            "Session created"
        );
        Ok(session)
    }

    fn get(&self, id: &SessionId) -> Result<Session, StoreError> {
        let sessions = self.sessions.read();
        sessions.get(id).cloned().ok_or_else(|| {
            self.metrics.record_miss();
            StoreError::NotFound(*id)
        })
    }

    fn conditional_update(
        &self,
        id: &SessionId,
        guard: &SessionGuard,
        patch: SessionPatch,
    ) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(id).ok_or_else(|| {
            self.metrics.record_miss();
            StoreError::NotFound(*id)
        })?;

        // Terminal records accept no further patches.
        if session.is_terminal() {
            self.metrics.record_conflict();
            return Err(StoreError::conflict(*id, "terminal record is immutable"));
        }

        if let Some(reason) = guard.violation(session) {
            self.metrics.record_conflict();
            debug!(session_id = %id, reason, "Guarded update rejected");
            return Err(StoreError::conflict(*id, reason));
        }

        patch.apply(session);
        session.revision += 1;
        self.metrics.record_update();
        debug!(
            session_id = %id,
            status = %session.status,
            revision = session.revision,
            "Session updated"
        );
        Ok(session.clone())
    }

    fn delete(&self, id: &SessionId, guard: &SessionGuard) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get(id).ok_or_else(|| {
            self.metrics.record_miss();
            StoreError::NotFound(*id)
        })?;

        if let Some(reason) = guard.violation(session) {
            self.metrics.record_conflict();
            debug!(session_id = %id, reason, "Guarded delete rejected");
            return Err(StoreError::conflict(*id, reason));
        }

        let removed = sessions.remove(id).ok_or(StoreError::NotFound(*id))?;
        self.metrics.record_delete();
        debug!(session_id = %id, status = %removed.status, "Session deleted");
        Ok(removed)
    }

    fn oldest_claimable(&self, exclude: &PlayerId) -> Option<Session> {
        let sessions = self.sessions.read();
        sessions
            .values()
            .filter(|s| {
                s.status == SessionStatus::Waiting
                    && s.player_b.is_none()
                    && !s.is_private()
                    && s.player_a != *exclude
            })
            .min_by_key(|s| (s.created_at, s.id))
            .cloned()
    }

    fn waiting_owned_by(&self, player: &PlayerId) -> Option<Session> {
        let sessions = self.sessions.read();
        sessions
            .values()
            .find(|s| s.status == SessionStatus::Waiting && s.player_a == *player)
            .cloned()
    }

    fn find_by_join_code(&self, code: &str) -> Option<Session> {
        let sessions = self.sessions.read();
        sessions
            .values()
            .find(|s| {
                s.status == SessionStatus::Waiting
                    && s.player_b.is_none()
                    && s.join_code
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(code))
            })
            .cloned()
    }

    fn sessions_in_status(&self, status: SessionStatus) -> Vec<Session> {
        let sessions = self.sessions.read();
        let mut matching: Vec<Session> = sessions
            .values()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|s| (s.created_at, s.id));
        matching
    }

    fn len(&self) -> usize {
        self.sessions.read().len()
    }
}
