//! Matchmaker service: claim-or-create over the session store.
//!
//! The service owns no queue and no locks. Every race it can lose is a
//! guarded store operation whose `Conflict` answer drives the next step:
//! retry the claim, rejoin a search that got claimed mid-cleanup, or fold
//! a cancel race into `AlreadyMatched`.

use crate::domain::{
    join_code, CancelOutcome, MatchError, MatchTicket, MatchmakerConfig, PlayerRole,
};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ports::MatchmakerApi;
use async_trait::async_trait;
use gd_01_session_store::{SessionDraft, SessionGuard, SessionPatch, SessionStoreApi};
use shared_bus::{EventPublisher, SessionEvent};
use shared_types::clock::{SystemTimeSource, TimeSource};
use shared_types::entities::{PlayerId, Session, SessionId, SessionStatus};
use shared_types::errors::StoreError;
use std::sync::Arc;
use tracing::{debug, info};

/// Matchmaker service.
pub struct MatchmakerService<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    store: Arc<S>,
    bus: Arc<P>,
    config: MatchmakerConfig,
    time_source: Box<dyn TimeSource>,
    metrics: Metrics,
}

/// Dependencies for `MatchmakerService`.
pub struct MatchmakerDependencies<S, P> {
    pub store: Arc<S>,
    pub bus: Arc<P>,
    pub config: MatchmakerConfig,
}

impl<S, P> MatchmakerService<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    /// Create a new `MatchmakerService`.
    pub fn new(deps: MatchmakerDependencies<S, P>) -> Self {
        Self {
            store: deps.store,
            bus: deps.bus,
            config: deps.config,
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

    /// The patch that fills the open seat and starts the game clock.
    fn claim_patch(&self, player: &PlayerId) -> SessionPatch {
        SessionPatch::new()
            .with_status(SessionStatus::Playing)
            .with_joiner(*player)
            .with_turn_started_at(self.time_source.now())
    }

    /// Removes `player`'s open search if one exists.
    ///
    /// Returns the now-live session when the search was claimed between
    /// lookup and delete, so the caller can hand it back instead of
    /// searching again.
    async fn clear_open_search(&self, player: &PlayerId) -> Result<Option<Session>, MatchError> {
        let Some(stale) = self.store.waiting_owned_by(player) else {
            return Ok(None);
        };

        let guard = SessionGuard::any()
            .with_status(SessionStatus::Waiting)
            .with_owner(*player)
            .unclaimed();

        match self.store.delete(&stale.id, &guard) {
            Ok(removed) => {
                debug!(session_id = %removed.id, owner = %player, "Stale search removed");
                self.bus
                    .publish(SessionEvent::SessionDeleted {
                        session_id: removed.id,
                    })
                    .await;
                Ok(None)
            }
            Err(StoreError::Conflict { .. }) => {
                // An opponent arrived while we were cleaning up.
                let live = self.store.get(&stale.id)?;
                if live.status == SessionStatus::Playing && live.player_a == *player {
                    Ok(Some(live))
                } else {
                    Ok(None)
                }
            }
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<S, P> MatchmakerApi for MatchmakerService<S, P>
where
    S: SessionStoreApi,
    P: EventPublisher,
{
    async fn request_match(&self, player: &PlayerId) -> Result<MatchTicket, MatchError> {
        // Step 1: this request supersedes any previous search by the same
        // player. If that search was claimed mid-cleanup, the player already
        // has a live game; hand it back.
        if let Some(live) = self.clear_open_search(player).await? {
            self.metrics.record_rejoin();
            info!(session_id = %live.id, player = %player, "Search was claimed mid-flight, rejoining");
            return Ok(MatchTicket {
                session: live,
                role: PlayerRole::Owner,
            });
        }

        // Steps 2-3: claim the FIFO head, retrying past lost races.
        for attempt in 0..=self.config.claim_retries {
            let Some(candidate) = self.store.oldest_claimable(player) else {
                break;
            };

            let guard = SessionGuard::any()
                .with_status(SessionStatus::Waiting)
                .unclaimed();

            match self
                .store
                .conditional_update(&candidate.id, &guard, self.claim_patch(player))
            {
                Ok(session) => {
                    self.metrics.record_claim_won();
                    info!(
                        session_id = %session.id,
                        joiner = %player,
                        attempt,
                        "Claimed open session"
                    );
                    self.bus
                        .publish(SessionEvent::SessionClaimed {
                            session: session.clone(),
                        })
                        .await;
                    return Ok(MatchTicket {
                        session,
                        role: PlayerRole::Joiner,
                    });
                }
                Err(StoreError::Conflict { .. } | StoreError::NotFound(_)) => {
                    self.metrics.record_claim_conflict();
                    debug!(session_id = %candidate.id, attempt, "Lost claim race, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Step 4: nothing claimable (or churn exhausted the retries); open a
        // new search.
        let draft = SessionDraft::new(
            *player,
            self.config.board_size,
            self.config.initial_time_ms,
        );
        let session = match self.store.create(draft) {
            Ok(session) => session,
            Err(StoreError::Conflict { id, .. }) => {
                // A concurrent request from the same player created one.
                let existing = self.store.get(&id)?;
                debug!(session_id = %existing.id, player = %player, "Reusing concurrent search");
                return Ok(MatchTicket {
                    session: existing,
                    role: PlayerRole::Owner,
                });
            }
            Err(e) => return Err(e.into()),
        };

        self.metrics.record_search_opened();
        info!(session_id = %session.id, owner = %player, "Opened new search");
        self.bus
            .publish(SessionEvent::SessionCreated {
                session: session.clone(),
            })
            .await;
        Ok(MatchTicket {
            session,
            role: PlayerRole::Owner,
        })
    }

    async fn cancel_match(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
    ) -> Result<CancelOutcome, MatchError> {
        let guard = SessionGuard::any()
            .with_status(SessionStatus::Waiting)
            .with_owner(*player)
            .unclaimed();

        match self.store.delete(session_id, &guard) {
            Ok(removed) => {
                self.metrics.record_cancellation();
                info!(session_id = %removed.id, owner = %player, "Search cancelled");
                self.bus
                    .publish(SessionEvent::SessionDeleted {
                        session_id: removed.id,
                    })
                    .await;
                Ok(CancelOutcome::Cancelled)
            }
            Err(StoreError::Conflict { .. }) => {
                let session = self.store.get(session_id)?;
                if session.player_a != *player {
                    return Err(MatchError::NotYourSession);
                }
                // An opponent claimed the seat first; cancellation arrives
                // too late and the caller learns they have a live game.
                self.metrics.record_cancel_too_late();
                info!(session_id = %session.id, owner = %player, "Cancel lost to a claim");
                Ok(CancelOutcome::AlreadyMatched(session))
            }
            // Already reclaimed elsewhere; cancellation is idempotent.
            Err(StoreError::NotFound(_)) => Ok(CancelOutcome::Cancelled),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_private(&self, player: &PlayerId) -> Result<MatchTicket, MatchError> {
        // A new invite supersedes any previous open search.
        let _ = self.clear_open_search(player).await?;

        for _ in 0..self.config.join_code_attempts {
            let code = join_code::generate(&mut rand::thread_rng(), self.config.join_code_len);
            let draft = SessionDraft::new(
                *player,
                self.config.board_size,
                self.config.initial_time_ms,
            )
            .with_join_code(code);

            match self.store.create(draft) {
                Ok(session) => {
                    self.metrics.record_private_created();
                    info!(session_id = %session.id, owner = %player, "Private session created");
                    self.bus
                        .publish(SessionEvent::SessionCreated {
                            session: session.clone(),
                        })
                        .await;
                    return Ok(MatchTicket {
                        session,
                        role: PlayerRole::Owner,
                    });
                }
                Err(StoreError::Conflict { id, .. }) => {
                    // Either a concurrent search by the same player (reuse
                    // it) or a code collision (roll a new code).
                    if let Ok(existing) = self.store.get(&id) {
                        if existing.player_a == *player && existing.status == SessionStatus::Waiting
                        {
                            return Ok(MatchTicket {
                                session: existing,
                                role: PlayerRole::Owner,
                            });
                        }
                    }
                    debug!(owner = %player, "Invite code collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(MatchError::CodeSpaceExhausted)
    }

    async fn join_by_code(
        &self,
        player: &PlayerId,
        code: &str,
    ) -> Result<MatchTicket, MatchError> {
        let Some(candidate) = self.store.find_by_join_code(code) else {
            return Err(MatchError::CodeNotFound(code.to_uppercase()));
        };
        if candidate.player_a == *player {
            return Err(MatchError::SelfJoin);
        }

        let guard = SessionGuard::any()
            .with_status(SessionStatus::Waiting)
            .unclaimed();

        match self
            .store
            .conditional_update(&candidate.id, &guard, self.claim_patch(player))
        {
            Ok(session) => {
                self.metrics.record_code_join();
                info!(session_id = %session.id, joiner = %player, "Joined by invite code");
                self.bus
                    .publish(SessionEvent::SessionClaimed {
                        session: session.clone(),
                    })
                    .await;
                Ok(MatchTicket {
                    session,
                    role: PlayerRole::Joiner,
                })
            }
            Err(StoreError::Conflict { .. } | StoreError::NotFound(_)) => {
                Err(MatchError::CodeAlreadyClaimed(code.to_uppercase()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
