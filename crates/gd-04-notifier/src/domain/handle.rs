//! Consumer side of a session watch.

use shared_types::entities::{Session, SessionId};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

/// Handle to a running session watch.
///
/// Snapshots arrive in revision order, each at most once. The stream ends
/// (`recv` returns `None`) after a terminal snapshot was delivered, or when
/// the record was deleted, or after [`WatchHandle::stop`]. Dropping the
/// handle also winds the watch task down; it notices the closed channel on
/// its next wakeup.
pub struct WatchHandle {
    session_id: SessionId,
    receiver: mpsc::Receiver<Session>,
    task: JoinHandle<()>,
}

impl WatchHandle {
    pub(crate) fn new(
        session_id: SessionId,
        receiver: mpsc::Receiver<Session>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            session_id,
            receiver,
            task,
        }
    }

    /// The session this watch follows.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Receives the next snapshot. `None` means the watch ended.
    pub async fn recv(&mut self) -> Option<Session> {
        self.receiver.recv().await
    }

    /// Receives a snapshot if one is already buffered.
    pub fn try_recv(&mut self) -> Option<Session> {
        self.receiver.try_recv().ok()
    }

    /// Converts the handle into a `Stream` of snapshots. The detached watch
    /// task keeps running until the stream is dropped or ends itself.
    #[must_use]
    pub fn into_stream(self) -> ReceiverStream<Session> {
        ReceiverStream::new(self.receiver)
    }

    /// Stops the watch and waits for its task to finish.
    pub async fn stop(self) {
        drop(self.receiver);
        let _ = self.task.await;
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}
