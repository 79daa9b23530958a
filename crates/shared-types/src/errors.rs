//! # Error Types
//!
//! Defines error types used across subsystems: the session store's outcome
//! type and the taxonomy every error is mapped into at the client boundary.

use crate::entities::SessionId;
use thiserror::Error;

/// Errors surfaced by session store operations.
///
/// `Conflict` is the ordinary currency of optimistic concurrency here, not
/// an exceptional condition: matchmaking retries it, cancellation folds it
/// into an outcome, and only move submission surfaces it to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No record exists under this identifier.
    #[error("session not found: {0}")]
    NotFound(SessionId),

    /// The guard predicate no longer held when the mutation was attempted.
    #[error("conflict on session {id}: {reason}")]
    Conflict {
        /// The contested session.
        id: SessionId,
        /// Which expectation failed, for logs and diagnostics.
        reason: String,
    },

    /// The backing store did not answer within its internal deadline.
    ///
    /// The in-memory adapter never emits this; remote-backed adapters do.
    #[error("store backend unavailable: {0}")]
    Transient(String),
}

impl StoreError {
    /// Shorthand for a guard failure on `id`.
    #[must_use]
    pub fn conflict(id: SessionId, reason: impl Into<String>) -> Self {
        Self::Conflict {
            id,
            reason: reason.into(),
        }
    }
}

/// The error taxonomy exposed to collaborator and UI code.
///
/// Every subsystem error converts into exactly one of these kinds at the
/// client session controller; internal retry loops (claim races, cancel
/// races) are consumed before reaching this boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArenaError {
    /// A malformed or illegal request (bad coordinates, occupied cell).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A guarded update lost its race; refresh state before retrying.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced session does not exist (or was reclaimed).
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller may not perform this operation (not a participant,
    /// not their turn, session not active).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A move-time budget ran out.
    #[error("timeout: {0}")]
    Timeout(String),

    /// A dependency failed transiently; the operation may be retried.
    #[error("transient failure: {0}")]
    Transient(String),
}

impl ArenaError {
    /// Stable kind label for structured log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Forbidden(_) => "forbidden",
            Self::Timeout(_) => "timeout",
            Self::Transient(_) => "transient",
        }
    }
}

impl From<StoreError> for ArenaError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(format!("session {id}")),
            StoreError::Conflict { id, reason } => {
                Self::Conflict(format!("session {id}: {reason}"))
            }
            StoreError::Transient(msg) => Self::Transient(msg),
        }
    }
}
