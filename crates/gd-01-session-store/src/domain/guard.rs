//! Expected-state predicates for conditional mutation.

use shared_types::entities::{PlayerId, PlayerMark, Session, SessionStatus};

/// The caller's expectation of what a record looks like.
///
/// Every field is optional; unset fields are unconstrained, so the empty
/// guard always holds. A mutation proceeds only while every set expectation
/// still matches the live record, which is what makes claim races, cancel
/// races, and duplicate move submissions resolve to a single winner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionGuard {
    /// Expected lifecycle status.
    pub status: Option<SessionStatus>,
    /// Expected owner.
    pub player_a: Option<PlayerId>,
    /// Expected joiner seat: `Some(None)` demands the seat is still open,
    /// `Some(Some(p))` demands it is held by `p`.
    pub player_b: Option<Option<PlayerId>>,
    /// Expected player to move.
    pub current_turn: Option<PlayerMark>,
    /// Expected change counter.
    pub revision: Option<u64>,
}

impl SessionGuard {
    /// A guard with no expectations; always holds.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Expect the given status.
    #[must_use]
    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Expect the given owner.
    #[must_use]
    pub fn with_owner(mut self, player: PlayerId) -> Self {
        self.player_a = Some(player);
        self
    }

    /// Expect the joiner seat to still be open.
    #[must_use]
    pub fn unclaimed(mut self) -> Self {
        self.player_b = Some(None);
        self
    }

    /// Expect the joiner seat to be held by `player`.
    #[must_use]
    pub fn with_joiner(mut self, player: PlayerId) -> Self {
        self.player_b = Some(Some(player));
        self
    }

    /// Expect the given player to move.
    #[must_use]
    pub fn with_turn(mut self, mark: PlayerMark) -> Self {
        self.current_turn = Some(mark);
        self
    }

    /// Expect the given change counter.
    #[must_use]
    pub fn with_revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }

    /// The first expectation the record violates, if any.
    ///
    /// The returned label feeds `Conflict` reasons, so it names the field
    /// rather than the values.
    #[must_use]
    pub fn violation(&self, session: &Session) -> Option<&'static str> {
        if let Some(expected) = self.status {
            if session.status != expected {
                return Some("status changed");
            }
        }
        if let Some(expected) = self.player_a {
            if session.player_a != expected {
                return Some("owner mismatch");
            }
        }
        match self.player_b {
            Some(None) if session.player_b.is_some() => return Some("seat already claimed"),
            Some(Some(expected)) if session.player_b != Some(expected) => {
                return Some("joiner mismatch");
            }
            _ => {}
        }
        if let Some(expected) = self.current_turn {
            if session.current_turn != expected {
                return Some("turn changed hands");
            }
        }
        if let Some(expected) = self.revision {
            if session.revision != expected {
                return Some("record was modified");
            }
        }
        None
    }

    /// Returns true while every set expectation matches the record.
    #[must_use]
    pub fn holds(&self, session: &Session) -> bool {
        self.violation(session).is_none()
    }
}
