//! # Change Notifier Subsystem
//!
//! ## Purpose
//!
//! Gives each client one ordered stream of session snapshots, regardless of
//! how a change became visible. Bus events push snapshots the moment they
//! happen; a jittered poll re-reads the store to recover anything the push
//! path dropped. Both paths funnel through one revision-checked applier, so
//! a snapshot that arrives twice is delivered once, and a snapshot that
//! arrives late is not delivered at all.
//!
//! ## Delivery Model
//!
//! ```text
//!               ┌──────────────┐  events   ┌─────────────────────────┐
//!               │  shared-bus  ├──────────►│                         │
//!               └──────────────┘           │  watch task             │
//!                                          │  ┌───────────────────┐  │ snapshots
//!               ┌──────────────┐  get()    │  │   StateApplier    │  ├──────────► WatchHandle
//!               │ session store├──────────►│  │ (revision dedup)  │  │
//!               └──────────────┘  poll     │  └───────────────────┘  │
//!                 every 2s ± jitter        └─────────────────────────┘
//! ```
//!
//! The stream ends itself: a terminal snapshot (completed or abandoned) is
//! delivered and then the channel closes, and a deleted record closes the
//! channel without a final snapshot. A transient store failure during a poll
//! ends nothing; the watcher just polls again.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - SessionWatchApi trait                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/mod.rs - SessionWatchService<S, B>, watch task         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/applier.rs - StateApplier (idempotent snapshot apply)   │
//! │  domain/handle.rs  - WatchHandle (consumer side of a watch)     │
//! │  domain/config.rs  - NotifierConfig                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{NotifierConfig, StateApplier, WatchHandle};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::SessionWatchApi;
pub use service::{SessionWatchDependencies, SessionWatchService};
