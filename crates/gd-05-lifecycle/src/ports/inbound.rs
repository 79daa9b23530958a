//! Inbound (Driving) port for the Lifecycle Manager subsystem.

use crate::domain::LifecycleError;
use shared_types::entities::{PlayerId, Session, SessionId};

/// Presence operations offered to client session controllers.
///
/// Both operations are idempotent: repeating one, or applying it to a
/// session that is not live, changes nothing and succeeds with the current
/// record.
pub trait LifecycleApi: Send + Sync {
    /// Stamps `player` as disconnected from a live session. The first stamp
    /// starts the grace clock; repeats keep the original stamp.
    fn mark_disconnected(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
    ) -> Result<Session, LifecycleError>;

    /// Clears `player`'s disconnect stamp, stopping the grace clock.
    fn mark_reconnected(
        &self,
        session_id: &SessionId,
        player: &PlayerId,
    ) -> Result<Session, LifecycleError>;
}
