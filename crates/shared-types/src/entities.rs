//! # Core Domain Entities
//!
//! Defines the session record and grid primitives shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity & Time**: `SessionId`, `PlayerId`, `Timestamp`
//! - **The Grid**: `PlayerMark`, `CellState`, `Board`
//! - **Sessions**: `SessionStatus`, `Winner`, `LastMove`, `Session`

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// CLUSTER A: IDENTITY & TIME
// =============================================================================

/// A millisecond-precision Unix timestamp.
pub type Timestamp = u64;

/// Unique identifier for a game session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a participant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// CLUSTER B: THE GRID
// =============================================================================

/// The two marks placed on the grid. The session owner plays `A`, the
/// joiner plays `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerMark {
    A,
    B,
}

impl PlayerMark {
    /// The other side's mark.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for PlayerMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// The contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CellState {
    /// No mark has been placed here.
    #[default]
    Empty,
    /// Marked by the session owner.
    MarkA,
    /// Marked by the joiner.
    MarkB,
}

impl CellState {
    /// Returns true if no mark occupies this cell.
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The mark occupying this cell, if any.
    #[must_use]
    pub fn mark(self) -> Option<PlayerMark> {
        match self {
            Self::Empty => None,
            Self::MarkA => Some(PlayerMark::A),
            Self::MarkB => Some(PlayerMark::B),
        }
    }
}

impl From<PlayerMark> for CellState {
    fn from(mark: PlayerMark) -> Self {
        match mark {
            PlayerMark::A => Self::MarkA,
            PlayerMark::B => Self::MarkB,
        }
    }
}

/// A square grid of cells, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Side length of the square grid.
    pub size: u8,
    /// Cell contents, `size * size` entries, row-major.
    pub cells: Vec<CellState>,
}

impl Board {
    /// Creates an empty board of the given side length.
    #[must_use]
    pub fn new(size: u8) -> Self {
        let n = usize::from(size);
        Self {
            size,
            cells: vec![CellState::Empty; n * n],
        }
    }

    fn index(&self, x: u8, y: u8) -> usize {
        usize::from(y) * usize::from(self.size) + usize::from(x)
    }

    /// Returns true if `(x, y)` lies on the grid.
    #[must_use]
    pub fn contains(&self, x: u8, y: u8) -> bool {
        x < self.size && y < self.size
    }

    /// The cell at `(x, y)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, x: u8, y: u8) -> Option<CellState> {
        if self.contains(x, y) {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Places a mark at `(x, y)`. Returns false when out of bounds.
    pub fn place(&mut self, x: u8, y: u8, mark: PlayerMark) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = CellState::from(mark);
        true
    }

    /// Returns true when no empty cell remains.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled_cells(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

// =============================================================================
// CLUSTER C: SESSIONS
// =============================================================================

/// The lifecycle status of a session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Open search: owner is waiting for an opponent to claim the slot.
    Waiting,
    /// Both seats filled, moves are being exchanged.
    Playing,
    /// Terminal: win, draw, resignation, or clock exhaustion.
    Completed,
    /// Terminal: a participant left and did not return within the grace period.
    Abandoned,
}

impl SessionStatus {
    /// Terminal statuses accept no further gameplay mutation.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Playing => write!(f, "playing"),
            Self::Completed => write!(f, "completed"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// The named participant won.
    Player(PlayerId),
    /// Full board with no winning line.
    Draw,
}

/// The most recently applied move, kept for reconnection resync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// Column of the placed mark.
    pub x: u8,
    /// Row of the placed mark.
    pub y: u8,
    /// Which mark was placed.
    pub mark: PlayerMark,
}

/// A game session record.
///
/// This is the unit of storage and synchronization: every mutation flows
/// through the session store's guarded operations, and every accepted
/// mutation bumps `revision` so observers can deduplicate redundant
/// deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// The owner (created the session, plays `MarkA`).
    pub player_a: PlayerId,
    /// The joiner (claimed the open slot, plays `MarkB`). `None` until claimed.
    pub player_b: Option<PlayerId>,
    /// The shared grid.
    pub board: Board,
    /// Whose mark may move next.
    pub current_turn: PlayerMark,
    /// Remaining move-time budget for the owner, in milliseconds.
    pub time_left_a: u64,
    /// Remaining move-time budget for the joiner, in milliseconds.
    pub time_left_b: u64,
    /// When `current_turn` last changed hands; elapsed time since this
    /// instant is charged against the player to move.
    pub turn_started_at: Timestamp,
    /// Outcome, set exactly when the session completes.
    pub winner: Option<Winner>,
    /// Most recently applied move.
    pub last_move: Option<LastMove>,
    /// Creation instant; the matchmaking queue is FIFO over this field.
    pub created_at: Timestamp,
    /// Invite code for private sessions. Sessions carrying a code are
    /// invisible to the public matchmaking queue.
    pub join_code: Option<String>,
    /// Set while the owner is away; cleared on reconnection.
    pub disconnected_a: Option<Timestamp>,
    /// Set while the joiner is away; cleared on reconnection.
    pub disconnected_b: Option<Timestamp>,
    /// Monotonic change counter, bumped by every accepted mutation.
    pub revision: u64,
}

impl Session {
    /// The mark played by `player`, or `None` for non-participants.
    #[must_use]
    pub fn mark_of(&self, player: &PlayerId) -> Option<PlayerMark> {
        if self.player_a == *player {
            Some(PlayerMark::A)
        } else if self.player_b.as_ref() == Some(player) {
            Some(PlayerMark::B)
        } else {
            None
        }
    }

    /// The participant playing `mark`, if that seat is filled.
    #[must_use]
    pub fn player_with(&self, mark: PlayerMark) -> Option<PlayerId> {
        match mark {
            PlayerMark::A => Some(self.player_a),
            PlayerMark::B => self.player_b,
        }
    }

    /// Returns true if `player` occupies either seat.
    #[must_use]
    pub fn is_participant(&self, player: &PlayerId) -> bool {
        self.mark_of(player).is_some()
    }

    /// Returns true once the session reached a terminal status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Remaining budget for the given mark, in milliseconds.
    #[must_use]
    pub fn time_left(&self, mark: PlayerMark) -> u64 {
        match mark {
            PlayerMark::A => self.time_left_a,
            PlayerMark::B => self.time_left_b,
        }
    }

    /// Disconnect stamp for the given mark, if that player is away.
    #[must_use]
    pub fn disconnected_since(&self, mark: PlayerMark) -> Option<Timestamp> {
        match mark {
            PlayerMark::A => self.disconnected_a,
            PlayerMark::B => self.disconnected_b,
        }
    }

    /// Private sessions carry an invite code and skip the public queue.
    #[must_use]
    pub fn is_private(&self) -> bool {
        self.join_code.is_some()
    }
}
