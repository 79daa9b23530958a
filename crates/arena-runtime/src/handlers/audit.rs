//! # Event Audit Handler
//!
//! Tails the event bus and writes one structured log line per session
//! event. This is the operator's view of the arena: pairings, moves,
//! outcomes, and reclamations all pass through here.
//!
//! The auditor is a pure observer. It never publishes and never touches
//! the store, so it can lag or die without affecting gameplay.

use gd_05_lifecycle::LifecyclePhase;
use shared_bus::{EventFilter, SessionEvent, Subscription};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::container::ArenaContainer;

/// Handler that logs every event crossing the bus.
pub struct EventAuditHandler {
    subscription: Subscription,
}

impl EventAuditHandler {
    /// Create a new audit handler subscribed to all topics.
    pub fn new(container: &Arc<ArenaContainer>) -> Self {
        let subscription = container.event_bus.subscribe(EventFilter::all());
        Self { subscription }
    }

    /// Start tailing the bus.
    ///
    /// Should be spawned as a background task; returns when the bus closes.
    #[instrument(skip(self), name = "event_audit")]
    pub async fn run(mut self) {
        info!("[audit] Started tailing session events");

        loop {
            match self.subscription.recv().await {
                Some(event) => Self::log(&event),
                None => {
                    error!("[audit] Event bus closed, shutting down");
                    break;
                }
            }
        }
    }

    fn log(event: &SessionEvent) {
        let session_id = event.session_id();
        match event.snapshot() {
            Some(session) => {
                info!(
                    session_id = %session_id,
                    topic = ?event.topic(),
                    phase = %LifecyclePhase::of(session),
                    revision = session.revision,
                    "Session event"
                );
            }
            None => {
                info!(
                    session_id = %session_id,
                    topic = ?event.topic(),
                    "Session deleted"
                );
            }
        }
    }
}
