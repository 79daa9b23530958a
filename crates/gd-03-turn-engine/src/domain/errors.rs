//! Turn engine errors.
//!
//! Unlike matchmaking, a lost write race here *is* surfaced: the caller's
//! view of the board was stale, and silently replaying the move against the
//! new position could land it on a different game state than the one the
//! player saw. They refresh and decide again.

use shared_types::errors::{ArenaError, StoreError};
use thiserror::Error;

/// Errors surfaced by move submission and resignation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TurnError {
    /// The session store failed underneath the engine.
    #[error("storage: {0}")]
    Store(#[from] StoreError),

    /// The session is not in the `Playing` state.
    #[error("match is not active")]
    MatchNotActive,

    /// The caller holds no seat in this session.
    #[error("caller is not a participant")]
    NotAParticipant,

    /// It is the opponent's turn.
    #[error("not your turn")]
    NotYourTurn,

    /// The move-time budget ran out; the match is decided on time.
    #[error("move-time budget exhausted")]
    BudgetExhausted,

    /// The coordinates fall outside the board.
    #[error("cell ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: u8, y: u8, size: u8 },

    /// The target cell already holds a mark.
    #[error("cell ({x}, {y}) is already occupied")]
    CellOccupied { x: u8, y: u8 },

    /// The session changed between validation and write. The caller's view
    /// is stale; refresh and resubmit.
    #[error("session changed underneath the move")]
    MoveConflict,
}

impl From<TurnError> for ArenaError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::Store(store) => store.into(),
            TurnError::MatchNotActive => Self::Forbidden("match is not active".into()),
            TurnError::NotAParticipant => Self::Forbidden("caller is not a participant".into()),
            TurnError::NotYourTurn => Self::Forbidden("not your turn".into()),
            TurnError::BudgetExhausted => Self::Timeout("move-time budget exhausted".into()),
            TurnError::OutOfBounds { x, y, size } => Self::Validation(format!(
                "cell ({x}, {y}) is outside the {size}x{size} board"
            )),
            TurnError::CellOccupied { x, y } => {
                Self::Validation(format!("cell ({x}, {y}) is already occupied"))
            }
            TurnError::MoveConflict => {
                Self::Conflict("session changed underneath the move".into())
            }
        }
    }
}
