//! Partial updates applied under a guard.

use shared_types::entities::{
    Board, LastMove, PlayerId, PlayerMark, Session, SessionStatus, Timestamp, Winner,
};

/// The fields a guarded mutation may change.
///
/// Unset fields are left untouched. The patch never touches `id`,
/// `player_a`, `created_at`, `join_code`, or `revision`; the store bumps
/// the revision itself when it accepts a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    /// New lifecycle status.
    pub status: Option<SessionStatus>,
    /// Fill the joiner seat. Claims are one-way; there is no un-claim.
    pub player_b: Option<PlayerId>,
    /// Replace the board.
    pub board: Option<Board>,
    /// Hand the turn over.
    pub current_turn: Option<PlayerMark>,
    /// New owner clock, in milliseconds.
    pub time_left_a: Option<u64>,
    /// New joiner clock, in milliseconds.
    pub time_left_b: Option<u64>,
    /// Restart the turn clock at this instant.
    pub turn_started_at: Option<Timestamp>,
    /// Record the outcome.
    pub winner: Option<Winner>,
    /// Record the latest move.
    pub last_move: Option<LastMove>,
    /// Stamp (`Some(Some(t))`) or clear (`Some(None)`) the owner's
    /// disconnect marker.
    pub disconnected_a: Option<Option<Timestamp>>,
    /// Stamp or clear the joiner's disconnect marker.
    pub disconnected_b: Option<Option<Timestamp>>,
}

impl SessionPatch {
    /// A patch changing nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Fill the joiner seat.
    #[must_use]
    pub fn with_joiner(mut self, player: PlayerId) -> Self {
        self.player_b = Some(player);
        self
    }

    /// Replace the board.
    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Hand the turn to `mark`.
    #[must_use]
    pub fn with_turn(mut self, mark: PlayerMark) -> Self {
        self.current_turn = Some(mark);
        self
    }

    /// Set the remaining clock for `mark`.
    #[must_use]
    pub fn with_time_left(mut self, mark: PlayerMark, ms: u64) -> Self {
        match mark {
            PlayerMark::A => self.time_left_a = Some(ms),
            PlayerMark::B => self.time_left_b = Some(ms),
        }
        self
    }

    /// Restart the turn clock at `now`.
    #[must_use]
    pub fn with_turn_started_at(mut self, now: Timestamp) -> Self {
        self.turn_started_at = Some(now);
        self
    }

    /// Record the outcome.
    #[must_use]
    pub fn with_winner(mut self, winner: Winner) -> Self {
        self.winner = Some(winner);
        self
    }

    /// Record the latest move.
    #[must_use]
    pub fn with_last_move(mut self, last_move: LastMove) -> Self {
        self.last_move = Some(last_move);
        self
    }

    /// Stamp the disconnect marker for `mark` at `now`.
    #[must_use]
    pub fn with_disconnect(mut self, mark: PlayerMark, now: Timestamp) -> Self {
        match mark {
            PlayerMark::A => self.disconnected_a = Some(Some(now)),
            PlayerMark::B => self.disconnected_b = Some(Some(now)),
        }
        self
    }

    /// Clear the disconnect marker for `mark`.
    #[must_use]
    pub fn with_reconnect(mut self, mark: PlayerMark) -> Self {
        match mark {
            PlayerMark::A => self.disconnected_a = Some(None),
            PlayerMark::B => self.disconnected_b = Some(None),
        }
        self
    }

    /// Returns true when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every set field into `session`. Does not bump the revision;
    /// that is the store's job.
    pub fn apply(&self, session: &mut Session) {
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(player_b) = self.player_b {
            session.player_b = Some(player_b);
        }
        if let Some(board) = &self.board {
            session.board = board.clone();
        }
        if let Some(turn) = self.current_turn {
            session.current_turn = turn;
        }
        if let Some(ms) = self.time_left_a {
            session.time_left_a = ms;
        }
        if let Some(ms) = self.time_left_b {
            session.time_left_b = ms;
        }
        if let Some(at) = self.turn_started_at {
            session.turn_started_at = at;
        }
        if let Some(winner) = self.winner {
            session.winner = Some(winner);
        }
        if let Some(last_move) = self.last_move {
            session.last_move = Some(last_move);
        }
        if let Some(stamp) = self.disconnected_a {
            session.disconnected_a = stamp;
        }
        if let Some(stamp) = self.disconnected_b {
            session.disconnected_b = stamp;
        }
    }
}
