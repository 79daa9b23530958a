//! # Lifecycle Manager Subsystem
//!
//! ## Purpose
//!
//! Tracks participant presence and reclaims sessions nobody is coming back
//! for. Presence is a pair of timestamps on the record itself, stamped and
//! cleared through the same guarded updates every other subsystem uses; the
//! reclamation sweeper is the only background task in the system, and it
//! only ever applies transitions the record's own state already justifies.
//!
//! ## Phase Machine
//!
//! ```text
//!                 claim                    terminal move / resign /
//!   Searching ───────────────► Active ────clock exhaustion──────► Completed
//!       │                        │
//!       │ cancel / waiting TTL   │ disconnect past grace (30s)
//!       ▼                        ▼
//!    (deleted)               Abandoned
//! ```
//!
//! A disconnect stamp never decides anything by itself: the participant can
//! return any time inside the grace period, reconnect, and resume from the
//! live record. Only the sweeper, observing a stamp older than the grace
//! period, retires the session.
//!
//! Presence stamps bump the record revision but publish no event; watchers
//! pick them up through their polling fallback.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - LifecycleApi trait                         │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/mod.rs     - LifecycleService<S>                       │
//! │  service/sweeper.rs - ReclamationSweeper<S, P>                  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/phase.rs  - LifecyclePhase                              │
//! │  domain/errors.rs - LifecycleError                              │
//! │  domain/config.rs - LifecycleConfig                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{LifecycleConfig, LifecycleError, LifecyclePhase};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::LifecycleApi;
pub use service::{LifecycleDependencies, LifecycleService, ReclamationSweeper, SweepReport};
