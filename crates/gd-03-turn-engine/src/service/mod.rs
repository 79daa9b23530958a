//! Turn engine service: the move pipeline over the session store.
//!
//! Validation reads one snapshot; the write is guarded on the exact state
//! the snapshot showed (status, turn, revision). Anything that landed in
//! between fails the guard and surfaces as `MoveConflict` instead of
//! silently replaying the move on a position the player never saw.

use crate::domain::{Ruleset, TurnError};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ports::TurnEngineApi;
use async_trait::async_trait;
use gd_01_session_store::{SessionGuard, SessionPatch, SessionStoreApi};
use shared_bus::{EventPublisher, SessionEvent};
use shared_types::clock::{SystemTimeSource, TimeSource};
use shared_types::entities::{
    LastMove, PlayerId, PlayerMark, Session, SessionId, SessionStatus, Winner,
};
use shared_types::errors::StoreError;
use std::sync::Arc;
use tracing::{debug, info};

/// Turn engine service.
pub struct TurnEngineService<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    store: Arc<S>,
    bus: Arc<P>,
    rules: Ruleset,
    time_source: Box<dyn TimeSource>,
    metrics: Metrics,
}

/// Dependencies for `TurnEngineService`.
pub struct TurnEngineDependencies<S, P> {
    pub store: Arc<S>,
    pub bus: Arc<P>,
    pub rules: Ruleset,
}

impl<S, P> TurnEngineService<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    /// Create a new `TurnEngineService`.
    pub fn new(deps: TurnEngineDependencies<S, P>) -> Self {
        Self {
            store: deps.store,
            bus: deps.bus,
            rules: deps.rules,
            time_source: Box::new(SystemTimeSource),
            metrics: Metrics::new(),
        }
    }

    /// Set custom time source (for testing).
    #[must_use]
    pub fn with_time_source(mut self, time_source: Box<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    /// Current operation counters.
    #[must_use]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    fn reject<T>(&self, err: TurnError) -> Result<T, TurnError> {
        self.metrics.record_move_rejected();
        Err(err)
    }

    /// Settles a match whose mover ran out of budget: the opponent wins.
    ///
    /// Losing this write race is fine; it means the reclamation sweep or a
    /// concurrent resignation concluded the match first.
    async fn settle_on_time(&self, session: &Session, loser: PlayerMark) {
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
            Ok(settled) => {
                info!(
                    session_id = %settled.id,
                    winner = %winner_id,
                    "Match decided on time at move submission"
                );
                self.bus
                    .publish(SessionEvent::SessionCompleted { session: settled })
                    .await;
            }
            Err(_) => {
                debug!(session_id = %session.id, "Timed-out match already settled elsewhere");
            }
        }
    }
}

#[async_trait]
impl<S, P> TurnEngineApi for TurnEngineService<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    async fn submit_move(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
        x: u8,
        y: u8,
    ) -> Result<Session, TurnError> {
        // 1-4: existence, liveness, seat, turn.
        let session = self.store.get(session_id)?;
        if session.status != SessionStatus::Playing {
            return self.reject(TurnError::MatchNotActive);
        }
        let Some(mark) = session.mark_of(player) else {
            return self.reject(TurnError::NotAParticipant);
        };
        if session.current_turn != mark {
            return self.reject(TurnError::NotYourTurn);
        }

        // 5: the clock, before legality. Thinking time is charged even when
        // the move it produced would have been rejected.
        let now = self.time_source.now();
        let elapsed = now.saturating_sub(session.turn_started_at);
        let budget = session.time_left(mark);
        if budget <= elapsed {
            self.metrics.record_timeout();
            self.settle_on_time(&session, mark).await;
            return Err(TurnError::BudgetExhausted);
        }

        // 6-7: geometry.
        if !session.board.contains(x, y) {
            return self.reject(TurnError::OutOfBounds {
                x,
                y,
                size: session.board.size,
            });
        }
        if session.board.cell(x, y).is_some_and(|c| !c.is_empty()) {
            return self.reject(TurnError::CellOccupied { x, y });
        }

        // Build the successor state.
        let mut board = session.board.clone();
        board.place(x, y, mark);
        let won = self.rules.is_winning_move(&board, x, y, mark);
        let draw = !won && self.rules.is_draw(&board);

        let mut patch = SessionPatch::new()
            .with_board(board)
            .with_last_move(LastMove { x, y, mark })
            .with_time_left(mark, budget - elapsed);
        if won {
            patch = patch
                .with_status(SessionStatus::Completed)
                .with_winner(Winner::Player(*player));
        } else if draw {
            patch = patch
                .with_status(SessionStatus::Completed)
                .with_winner(Winner::Draw);
        } else {
            patch = patch
                .with_turn(mark.opponent())
                .with_turn_started_at(now);
        }

        // One guarded write carries the whole move.
        let guard = SessionGuard::any()
            .with_status(SessionStatus::Playing)
            .with_turn(mark)
            .with_revision(session.revision);

        match self.store.conditional_update(session_id, &guard, patch) {
            Ok(updated) => {
                self.metrics.record_move_applied();
                if won || draw {
                    if won {
                        self.metrics.record_win();
                    } else {
                        self.metrics.record_draw();
                    }
                    info!(
                        session_id = %updated.id,
                        mover = %player,
                        x, y,
                        outcome = %updated.status,
                        "Match concluded"
                    );
                    self.bus
                        .publish(SessionEvent::SessionCompleted {
                            session: updated.clone(),
                        })
                        .await;
                } else {
                    debug!(session_id = %updated.id, mover = %player, x, y, "Move applied");
                    self.bus
                        .publish(SessionEvent::MoveApplied {
                            session: updated.clone(),
                        })
                        .await;
                }
                Ok(updated)
            }
            Err(StoreError::Conflict { .. }) => {
                self.metrics.record_move_conflict();
                debug!(session_id = %session_id, mover = %player, "Move lost its write race");
                Err(TurnError::MoveConflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn resign(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
    ) -> Result<Session, TurnError> {
        let session = self.store.get(session_id)?;
        if session.status != SessionStatus::Playing {
            return Err(TurnError::MatchNotActive);
        }
        let Some(mark) = session.mark_of(player) else {
            return Err(TurnError::NotAParticipant);
        };
        let Some(winner_id) = session.player_with(mark.opponent()) else {
            return Err(TurnError::MatchNotActive);
        };

        // No revision in the guard: a resignation stays valid across
        // concurrent moves, it only needs the match to still be live.
        let guard = SessionGuard::any().with_status(SessionStatus::Playing);
        let patch = SessionPatch::new()
            .with_status(SessionStatus::Completed)
            .with_winner(Winner::Player(winner_id));

        match self.store.conditional_update(session_id, &guard, patch) {
            Ok(updated) => {
                self.metrics.record_resignation();
                info!(session_id = %updated.id, resigner = %player, "Match conceded");
                self.bus
                    .publish(SessionEvent::SessionCompleted {
                        session: updated.clone(),
                    })
                    .await;
                Ok(updated)
            }
            Err(StoreError::Conflict { .. }) => Err(TurnError::MatchNotActive),
            Err(e) => Err(e.into()),
        }
    }
}
