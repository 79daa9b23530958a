//! # Shared Bus - Event Bus for Session Change Notification
//!
//! In-process push channel carrying session change events from the mutating
//! subsystems (matchmaker, turn engine, lifecycle) to any number of watchers.
//!
//! ## Delivery Model
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │  Matchmaker  │                    │   Watcher    │
//! │  Turn Engine │    publish()       │  (notifier)  │
//! │  Lifecycle   │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Publishing is fire-and-forget: a send with zero receivers is not an
//! error, and a slow receiver may lose intermediate events to channel lag.
//! Delivery is therefore at-least-once with possible duplication and
//! possible loss; consumers must apply events idempotently and must not
//! treat this channel as their sole source of truth. Every snapshot-carrying
//! event embeds the full session record so push and poll observations can
//! funnel through one application path.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, SessionEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lag drops the oldest.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
