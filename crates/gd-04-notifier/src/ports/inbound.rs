//! Inbound (Driving) port for the Change Notifier subsystem.

use crate::domain::WatchHandle;
use shared_types::entities::SessionId;
use shared_types::errors::StoreError;

/// Watch operations offered to client session controllers.
pub trait SessionWatchApi: Send + Sync {
    /// Starts watching `session_id`.
    ///
    /// The current snapshot is delivered first, then every newer revision
    /// as it becomes visible, through push or poll.
    ///
    /// # Returns
    /// - `Ok(handle)`: The watch is running.
    /// - `Err(NotFound)`: No record under this id.
    fn watch(&self, session_id: &SessionId) -> Result<WatchHandle, StoreError>;
}
