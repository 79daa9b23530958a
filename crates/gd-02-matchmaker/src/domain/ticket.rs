//! Matchmaking outcomes.

use serde::{Deserialize, Serialize};
use shared_types::entities::Session;

/// Which seat the requester ended up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRole {
    /// Opened a new search and is waiting for an opponent.
    Owner,
    /// Claimed an existing open seat; the game is live.
    Joiner,
}

/// The result of a successful match request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTicket {
    /// The session the requester now participates in.
    pub session: Session,
    /// The requester's seat.
    pub role: PlayerRole,
}

/// The result of a cancellation attempt.
///
/// Losing the race against a claim is an outcome, not an error: the caller
/// finds out they already have an opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The open search was removed (or was already gone).
    Cancelled,
    /// An opponent claimed the seat first; here is the live session.
    AlreadyMatched(Session),
}
