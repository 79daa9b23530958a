//! Matchmaker errors.
//!
//! Claim conflicts never appear here: the service consumes them through its
//! retry loop or folds them into a [`crate::domain::CancelOutcome`].

use shared_types::errors::{ArenaError, StoreError};
use thiserror::Error;

/// Errors surfaced by matchmaking operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    /// The session store failed in a way the retry loop does not absorb.
    #[error("storage: {0}")]
    Store(#[from] StoreError),

    /// The caller tried to join a session they own.
    #[error("cannot join your own session")]
    SelfJoin,

    /// No open session carries this invite code.
    #[error("no open session matches code {0}")]
    CodeNotFound(String),

    /// The invited seat was taken between lookup and claim.
    #[error("session for code {0} was just claimed")]
    CodeAlreadyClaimed(String),

    /// Repeated invite-code collisions; practically unreachable with the
    /// default code length.
    #[error("could not allocate a unique join code")]
    CodeSpaceExhausted,

    /// The caller tried to cancel a session they do not own.
    #[error("session is not owned by the caller")]
    NotYourSession,
}

impl From<MatchError> for ArenaError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::Store(store) => store.into(),
            MatchError::SelfJoin => Self::Validation("cannot join your own session".into()),
            MatchError::CodeNotFound(code) => {
                Self::NotFound(format!("no open session matches code {code}"))
            }
            MatchError::CodeAlreadyClaimed(code) => {
                Self::Conflict(format!("session for code {code} was just claimed"))
            }
            MatchError::CodeSpaceExhausted => {
                Self::Transient("could not allocate a unique join code".into())
            }
            MatchError::NotYourSession => {
                Self::Forbidden("session is not owned by the caller".into())
            }
        }
    }
}
