//! Inbound (Driving) port for the Matchmaker subsystem.

use crate::domain::{CancelOutcome, MatchError, MatchTicket};
use async_trait::async_trait;
use shared_types::entities::{PlayerId, SessionId};

/// Matchmaking operations offered to client session controllers.
///
/// All claim-race conflicts are consumed internally; callers never need a
/// retry loop of their own.
#[async_trait]
pub trait MatchmakerApi: Send + Sync {
    /// Finds an opponent for `player`: claims the oldest open seat, or
    /// opens a new search when none is claimable.
    ///
    /// # Returns
    /// - `Ok(ticket)` with role `Joiner` when a seat was claimed (the game
    ///   is live) or `Owner` when a new search was opened.
    async fn request_match(&self, player: &PlayerId) -> Result<MatchTicket, MatchError>;

    /// Cancels `player`'s open search on `session_id`.
    ///
    /// # Returns
    /// - `Ok(Cancelled)`: The record was removed, or was already gone.
    /// - `Ok(AlreadyMatched)`: An opponent claimed the seat first.
    /// - `Err(NotYourSession)`: The caller does not own the record.
    async fn cancel_match(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
    ) -> Result<CancelOutcome, MatchError>;

    /// Opens a private session guarded by a generated invite code. The
    /// session never enters the public queue.
    async fn create_private(&self, player: &PlayerId) -> Result<MatchTicket, MatchError>;

    /// Claims the open seat of the private session carrying `code`
    /// (case-insensitive).
    async fn join_by_code(&self, player: &PlayerId, code: &str)
        -> Result<MatchTicket, MatchError>;
}
