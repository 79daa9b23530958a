//! Inbound (Driving) port for the Session Store subsystem.
//!
//! This is the contract the matchmaker, turn engine, and lifecycle manager
//! program against. Implementations must make each mutating call atomic:
//! guard evaluation and patch application happen as one step with no
//! interleaving writer.

use crate::domain::{SessionDraft, SessionGuard, SessionPatch};
use shared_types::entities::{PlayerId, Session, SessionId, SessionStatus};
use shared_types::errors::StoreError;

/// Session record store with predicate-guarded mutation.
///
/// Methods are synchronous: implementations hold the record map behind a
/// short-lived lock and never perform I/O inside it. A remote-backed
/// implementation would surface `StoreError::Transient` when its internal
/// deadline expires; callers retry or degrade rather than block.
pub trait SessionStoreApi: Send + Sync {
    /// Creates a new waiting session from a draft.
    ///
    /// # Returns
    /// - `Ok(session)`: The stored record, with id, timestamps, and
    ///   `revision = 1` assigned.
    /// - `Err(Conflict)`: The owner already has an open search, or the
    ///   join code is in use.
    /// - `Err(Transient)`: The store is at capacity.
    fn create(&self, draft: SessionDraft) -> Result<Session, StoreError>;

    /// Fetches a session by id.
    fn get(&self, id: &SessionId) -> Result<Session, StoreError>;

    /// Applies `patch` to the record iff `guard` still holds, atomically,
    /// and bumps the revision.
    ///
    /// # Returns
    /// - `Ok(session)`: The updated record.
    /// - `Err(Conflict)`: The guard no longer holds, or the record is
    ///   terminal.
    /// - `Err(NotFound)`: No record under this id.
    fn conditional_update(
        &self,
        id: &SessionId,
        guard: &SessionGuard,
        patch: SessionPatch,
    ) -> Result<Session, StoreError>;

    /// Removes the record iff `guard` still holds, returning it.
    ///
    /// Deletion is the one mutation terminal records accept.
    fn delete(&self, id: &SessionId, guard: &SessionGuard) -> Result<Session, StoreError>;

    /// The oldest public waiting session with an open seat not owned by
    /// `exclude`. This is the FIFO head of the matchmaking queue.
    fn oldest_claimable(&self, exclude: &PlayerId) -> Option<Session>;

    /// The open search owned by `player`, public or private, if any.
    fn waiting_owned_by(&self, player: &PlayerId) -> Option<Session>;

    /// The open private session carrying `code` (case-insensitive), if any.
    fn find_by_join_code(&self, code: &str) -> Option<Session>;

    /// Every record currently in `status`, ordered by creation time.
    fn sessions_in_status(&self, status: SessionStatus) -> Vec<Session>;

    /// Number of live records.
    fn len(&self) -> usize;

    /// Returns true when no records exist.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
