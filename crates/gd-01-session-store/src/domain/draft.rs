//! Create requests.

use shared_types::entities::PlayerId;

/// A request to open a new waiting session.
///
/// The store fills in everything else: identifier, timestamps, an empty
/// board, and `revision = 1`. Field validation (board size, clock budget)
/// belongs to the ruleset that produced the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    /// The owner opening the search. Plays `MarkA` and moves first.
    pub player_a: PlayerId,
    /// Side length of the board to play on.
    pub board_size: u8,
    /// Starting move-time budget per player, in milliseconds.
    pub initial_time_ms: u64,
    /// Invite code for a private session; `None` joins the public queue.
    pub join_code: Option<String>,
}

impl SessionDraft {
    /// A public-queue draft with the given owner and rules.
    #[must_use]
    pub fn new(player_a: PlayerId, board_size: u8, initial_time_ms: u64) -> Self {
        Self {
            player_a,
            board_size,
            initial_time_ms,
            join_code: None,
        }
    }

    /// Attaches an invite code, making the session private.
    #[must_use]
    pub fn with_join_code(mut self, code: impl Into<String>) -> Self {
        self.join_code = Some(code.into());
        self
    }
}
