//! # Session Gateway
//!
//! The single surface a connected client talks to. It fronts the matchmaker,
//! turn engine, notifier, and lifecycle manager, and folds their error
//! types into the shared [`ArenaError`] taxonomy so transports only ever
//! see six kinds of failure.
//!
//! ## Request Flow
//!
//! ```text
//! client transport
//!       │
//!       ▼
//! ┌───────────────────────────────────────────┐
//! │  SessionGateway                           │
//! │  - find / cancel / private matchmaking    │──→ Matchmaker (gd-02)
//! │  - submit_move / resign                   │──→ Turn Engine (gd-03)
//! │  - watch                                  │──→ Notifier (gd-04)
//! │  - report_disconnect / report_reconnect   │──→ Lifecycle (gd-05)
//! │  - session_state                          │──→ Session Store (gd-01)
//! └───────────────────────────────────────────┘
//!       │
//!       ▼
//!   ArenaError (Validation | Conflict | NotFound |
//!               Forbidden | Timeout | Transient)
//! ```

use std::sync::Arc;

use tracing::debug;

use gd_01_session_store::SessionStoreApi;
use gd_02_matchmaker::{CancelOutcome, MatchTicket, MatchmakerApi};
use gd_03_turn_engine::TurnEngineApi;
use gd_04_notifier::{SessionWatchApi, WatchHandle};
use gd_05_lifecycle::{LifecycleApi, LifecyclePhase};
use shared_types::entities::{PlayerId, Session, SessionId};
use shared_types::errors::ArenaError;

use crate::container::ArenaContainer;

/// A session snapshot paired with its lifecycle phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    /// The current record.
    pub session: Session,
    /// The phase clients render (searching, active, completed, abandoned).
    pub phase: LifecyclePhase,
}

impl SessionView {
    fn of(session: Session) -> Self {
        let phase = LifecyclePhase::of(&session);
        Self { session, phase }
    }
}

/// Client-facing facade over the arena subsystems.
pub struct SessionGateway {
    container: Arc<ArenaContainer>,
}

impl SessionGateway {
    /// Create a gateway over an initialized container.
    pub fn new(container: Arc<ArenaContainer>) -> Self {
        Self { container }
    }

    /// Find an opponent: claim the oldest open search or start a new one.
    pub async fn find_match(&self, player: &PlayerId) -> Result<MatchTicket, ArenaError> {
        let ticket = self.container.matchmaker.request_match(player).await?;
        debug!(player = %player, session_id = %ticket.session.id, role = ?ticket.role, "Match requested");
        Ok(ticket)
    }

    /// Cancel an open search owned by `player`.
    pub async fn cancel_search(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
    ) -> Result<CancelOutcome, ArenaError> {
        Ok(self
            .container
            .matchmaker
            .cancel_match(player, session_id)
            .await?)
    }

    /// Open a private session guarded by an invite code.
    pub async fn create_private_match(
        &self,
        player: &PlayerId,
    ) -> Result<MatchTicket, ArenaError> {
        Ok(self.container.matchmaker.create_private(player).await?)
    }

    /// Join the private session carrying `code`.
    pub async fn join_with_code(
        &self,
        player: &PlayerId,
        code: &str,
    ) -> Result<MatchTicket, ArenaError> {
        Ok(self.container.matchmaker.join_by_code(player, code).await?)
    }

    /// Place `player`'s mark at `(x, y)`.
    pub async fn submit_move(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
        x: u8,
        y: u8,
    ) -> Result<SessionView, ArenaError> {
        let session = self
            .container
            .turn_engine
            .submit_move(player, session_id, x, y)
            .await?;
        Ok(SessionView::of(session))
    }

    /// Concede the match, handing the win to the opponent.
    pub async fn resign(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
    ) -> Result<SessionView, ArenaError> {
        let session = self.container.turn_engine.resign(player, session_id).await?;
        Ok(SessionView::of(session))
    }

    /// Start watching `session_id`. The handle yields the current snapshot
    /// first, then every newer revision.
    pub fn watch(&self, session_id: &SessionId) -> Result<WatchHandle, ArenaError> {
        Ok(self.container.notifier.watch(session_id)?)
    }

    /// The current record and its phase, for reconnection resync.
    pub fn session_state(&self, session_id: &SessionId) -> Result<SessionView, ArenaError> {
        let session = self.container.store.get(session_id)?;
        Ok(SessionView::of(session))
    }

    /// Stamp `player` as disconnected, starting the abandonment grace clock.
    pub fn report_disconnect(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
    ) -> Result<SessionView, ArenaError> {
        let session = self
            .container
            .lifecycle
            .mark_disconnected(session_id, player)?;
        Ok(SessionView::of(session))
    }

    /// Clear `player`'s disconnect stamp.
    pub fn report_reconnect(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
    ) -> Result<SessionView, ArenaError> {
        let session = self
            .container
            .lifecycle
            .mark_reconnected(session_id, player)?;
        Ok(SessionView::of(session))
    }
}
