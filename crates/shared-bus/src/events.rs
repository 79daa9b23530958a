//! # Session Events
//!
//! Defines all event types that flow through the shared bus.
//!
//! Every event that describes a surviving record carries the full `Session`
//! snapshot taken right after the mutation was accepted, so subscribers can
//! apply state directly instead of fetching it back. `SessionDeleted` is the
//! one exception: the record no longer exists.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Session, SessionId};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    // =========================================================================
    // MATCHMAKING
    // =========================================================================
    /// A new waiting session was opened by a searching player.
    SessionCreated {
        /// Snapshot taken after the create was accepted.
        session: Session,
    },

    /// A waiting session's open seat was claimed; the game is now live.
    SessionClaimed {
        /// Snapshot taken after the claim was accepted.
        session: Session,
    },

    /// A session record was removed (cancellation or stale-search cleanup).
    SessionDeleted {
        /// Identifier of the removed record.
        session_id: SessionId,
    },

    // =========================================================================
    // GAMEPLAY
    // =========================================================================
    /// A move passed validation and was applied to the board.
    MoveApplied {
        /// Snapshot taken after the move was accepted.
        session: Session,
    },

    /// The session reached `Completed`: win, draw, resignation, or clock
    /// exhaustion.
    SessionCompleted {
        /// Terminal snapshot including the outcome.
        session: Session,
    },

    // =========================================================================
    // LIFECYCLE
    // =========================================================================
    /// The session was reclaimed after a participant stayed away past the
    /// grace period.
    SessionAbandoned {
        /// Terminal snapshot.
        session: Session,
    },
}

impl SessionEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::SessionCreated { .. } | Self::SessionClaimed { .. } | Self::SessionDeleted { .. } => {
                EventTopic::Matchmaking
            }
            Self::MoveApplied { .. } | Self::SessionCompleted { .. } => EventTopic::Gameplay,
            Self::SessionAbandoned { .. } => EventTopic::Lifecycle,
        }
    }

    /// The session this event concerns.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::SessionCreated { session }
            | Self::SessionClaimed { session }
            | Self::MoveApplied { session }
            | Self::SessionCompleted { session }
            | Self::SessionAbandoned { session } => session.id,
            Self::SessionDeleted { session_id } => *session_id,
        }
    }

    /// The embedded snapshot, if the record still exists.
    #[must_use]
    pub fn snapshot(&self) -> Option<&Session> {
        match self {
            Self::SessionCreated { session }
            | Self::SessionClaimed { session }
            | Self::MoveApplied { session }
            | Self::SessionCompleted { session }
            | Self::SessionAbandoned { session } => Some(session),
            Self::SessionDeleted { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Session creation, claiming, and removal.
    Matchmaking,
    /// Moves and game completion.
    Gameplay,
    /// Presence reclamation.
    Lifecycle,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Sessions to include. Empty means all sessions.
    pub session_ids: Vec<SessionId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            session_ids: Vec::new(),
        }
    }

    /// Create a filter for every event concerning one session.
    #[must_use]
    pub fn for_session(session_id: SessionId) -> Self {
        Self {
            topics: Vec::new(),
            session_ids: vec![session_id],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SessionEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let session_match =
            self.session_ids.is_empty() || self.session_ids.contains(&event.session_id());

        topic_match && session_match
    }
}
