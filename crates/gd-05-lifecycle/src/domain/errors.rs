//! Lifecycle errors.

use shared_types::errors::{ArenaError, StoreError};
use thiserror::Error;

/// Errors surfaced by presence operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The session store failed underneath the operation.
    #[error("storage: {0}")]
    Store(#[from] StoreError),

    /// The caller holds no seat in this session.
    #[error("caller is not a participant")]
    NotAParticipant,
}

impl From<LifecycleError> for ArenaError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Store(store) => store.into(),
            LifecycleError::NotAParticipant => {
                Self::Forbidden("caller is not a participant".into())
            }
        }
    }
}
