//! Lifecycle phase derived from a session record.

use shared_types::entities::{Session, SessionStatus};

/// Where a session stands in its life, from the lifecycle manager's view.
///
/// This is a projection of [`SessionStatus`], not separate state: there is
/// nothing to keep in sync and nothing that can disagree with the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Waiting for an opponent.
    Searching,
    /// Both seats filled, game in progress.
    Active,
    /// Decided: win, draw, resignation, or clock exhaustion.
    Completed,
    /// Retired after a participant stayed away past the grace period.
    Abandoned,
}

impl LifecyclePhase {
    /// The phase `session` is currently in.
    #[must_use]
    pub fn of(session: &Session) -> Self {
        match session.status {
            SessionStatus::Waiting => Self::Searching,
            SessionStatus::Playing => Self::Active,
            SessionStatus::Completed => Self::Completed,
            SessionStatus::Abandoned => Self::Abandoned,
        }
    }

    /// Whether the phase admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Searching => "searching",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        };
        write!(f, "{s}")
    }
}
