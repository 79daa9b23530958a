//! Idempotent snapshot application.

use shared_types::entities::Session;

/// Applies incoming snapshots in revision order, once each.
///
/// Push and poll both hand their snapshots here, which is what makes the
/// two paths safe to run together: a snapshot observed through both arrives
/// with the same revision and the second copy is dropped, and a poll result
/// that raced behind a fresher push is dropped as stale.
#[derive(Debug, Default)]
pub struct StateApplier {
    last_revision: Option<u64>,
}

impl StateApplier {
    /// Creates an applier that accepts the first snapshot it sees.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `snapshot` if it is newer than everything seen so far.
    ///
    /// # Returns
    /// - `Some(snapshot)`: Strictly newer; deliver it.
    /// - `None`: Duplicate or stale; drop it.
    pub fn observe(&mut self, snapshot: Session) -> Option<Session> {
        match self.last_revision {
            Some(seen) if snapshot.revision <= seen => None,
            _ => {
                self.last_revision = Some(snapshot.revision);
                Some(snapshot)
            }
        }
    }

    /// Revision of the newest snapshot accepted so far.
    #[must_use]
    pub fn last_revision(&self) -> Option<u64> {
        self.last_revision
    }
}
