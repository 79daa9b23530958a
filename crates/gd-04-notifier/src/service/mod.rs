//! Watch service: one task per watched session.
//!
//! Each task selects over three things: the consumer going away, the next
//! bus event, and a jittered poll timer. Deliveries from the event arm and
//! the poll arm go through the same `StateApplier`, so the consumer sees
//! each revision once no matter which path carried it.

use crate::domain::{NotifierConfig, StateApplier, WatchHandle};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::ports::SessionWatchApi;
use gd_01_session_store::SessionStoreApi;
use rand::Rng;
use shared_bus::{EventFilter, EventSubscriber, SessionEvent, Subscription};
use shared_types::entities::{Session, SessionId};
use shared_types::errors::StoreError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Session watch service.
pub struct SessionWatchService<S, B>
where
    S: SessionStoreApi + 'static,
    B: EventSubscriber,
{
    store: Arc<S>,
    bus: Arc<B>,
    config: NotifierConfig,
    metrics: Arc<Metrics>,
}

/// Dependencies for `SessionWatchService`.
pub struct SessionWatchDependencies<S, B> {
    pub store: Arc<S>,
    pub bus: Arc<B>,
    pub config: NotifierConfig,
}

impl<S, B> SessionWatchService<S, B>
where
    S: SessionStoreApi + 'static,
    B: EventSubscriber,
{
    /// Create a new `SessionWatchService`.
    pub fn new(deps: SessionWatchDependencies<S, B>) -> Self {
        Self {
            store: deps.store,
            bus: deps.bus,
            config: deps.config,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Current delivery counters.
    #[must_use]
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

impl<S, B> SessionWatchApi for SessionWatchService<S, B>
where
    S: SessionStoreApi + 'static,
    B: EventSubscriber,
{
    fn watch(&self, session_id: &SessionId) -> Result<WatchHandle, StoreError> {
        // Subscribe before the snapshot read so no change can fall into the
        // gap between them.
        let subscription = self.bus.subscribe(EventFilter::for_session(*session_id));
        let initial = self.store.get(session_id)?;

        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        self.metrics.record_watch_started();
        debug!(session_id = %session_id, "Watch started");

        let task = tokio::spawn(watch_loop(
            self.store.clone(),
            subscription,
            tx,
            *session_id,
            initial,
            self.config.clone(),
            self.metrics.clone(),
        ));

        Ok(WatchHandle::new(*session_id, rx, task))
    }
}

async fn watch_loop<S: SessionStoreApi + 'static>(
    store: Arc<S>,
    mut subscription: Subscription,
    tx: mpsc::Sender<Session>,
    session_id: SessionId,
    initial: Session,
    config: NotifierConfig,
    metrics: Arc<Metrics>,
) {
    let mut applier = StateApplier::new();
    let mut push_alive = true;

    // The opening snapshot goes out before anything else.
    if let Some(first) = applier.observe(initial) {
        let terminal = first.is_terminal();
        if tx.send(first).await.is_err() || terminal {
            metrics.record_watch_ended();
            return;
        }
    }

    loop {
        // The poll clock restarts after every wakeup; it matters precisely
        // when the push path has gone quiet.
        let poll_after = config.poll_interval
            + Duration::from_millis(rand::thread_rng().gen_range(0..=config.poll_jitter_ms));

        tokio::select! {
            () = tx.closed() => break,

            event = subscription.recv(), if push_alive => match event {
                Some(SessionEvent::SessionDeleted { .. }) => {
                    debug!(session_id = %session_id, "Record deleted, watch ends");
                    break;
                }
                Some(event) => {
                    if let Some(snapshot) = event.snapshot().cloned() {
                        if let Some(fresh) = applier.observe(snapshot) {
                            metrics.record_push_delivered();
                            let terminal = fresh.is_terminal();
                            if tx.send(fresh).await.is_err() || terminal {
                                break;
                            }
                        } else {
                            metrics.record_stale_skip();
                        }
                    }
                }
                None => {
                    // Bus gone; the poll arm carries the watch alone.
                    warn!(session_id = %session_id, "Event bus closed, polling only");
                    push_alive = false;
                }
            },

            () = tokio::time::sleep(poll_after) => {
                metrics.record_poll();
                match store.get(&session_id) {
                    Ok(current) => {
                        if let Some(fresh) = applier.observe(current) {
                            metrics.record_poll_delivery();
                            let terminal = fresh.is_terminal();
                            if tx.send(fresh).await.is_err() || terminal {
                                break;
                            }
                        }
                    }
                    Err(StoreError::NotFound(_)) => {
                        debug!(session_id = %session_id, "Record gone, watch ends");
                        break;
                    }
                    Err(e) => {
                        metrics.record_transient_poll_failure();
                        warn!(session_id = %session_id, error = %e, "Poll failed, retrying on cadence");
                    }
                }
            }
        }
    }

    metrics.record_watch_ended();
    debug!(session_id = %session_id, "Watch ended");
}
