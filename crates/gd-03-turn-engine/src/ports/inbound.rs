//! Inbound (Driving) port for the Turn Engine subsystem.

use crate::domain::TurnError;
use async_trait::async_trait;
use shared_types::entities::{PlayerId, Session, SessionId};

/// Gameplay operations offered to client session controllers.
#[async_trait]
pub trait TurnEngineApi: Send + Sync {
    /// Validates and applies `player`'s move at `(x, y)`.
    ///
    /// Checks run in a fixed order (existence, liveness, seat, turn, clock,
    /// bounds, occupancy) so a given bad move always fails the same way.
    /// A move that ends the game also records the outcome.
    ///
    /// # Returns
    /// - `Ok(session)`: The updated record, turn flipped or match decided.
    /// - `Err(BudgetExhausted)`: The mover ran out of time; the match is
    ///   completed in the opponent's favor as a side effect.
    /// - `Err(MoveConflict)`: The record changed between validation and
    ///   write; the caller refreshes and decides again.
    async fn submit_move(
        &self,
        player: &PlayerId,
        session_id: &SessionId,
        x: u8,
        y: u8,
    ) -> Result<Session, TurnError>;

    /// Concedes the match. The opponent wins immediately; the mover's
    /// remaining budget is irrelevant.
    async fn resign(&self, player: &PlayerId, session_id: &SessionId)
        -> Result<Session, TurnError>;
}
