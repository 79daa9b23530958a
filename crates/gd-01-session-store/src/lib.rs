//! # Session Store Subsystem
//!
//! ## Purpose
//!
//! Holds every session record and is the single authority over session
//! mutation. All writes are conditional: the caller states what it believes
//! the record looks like (a [`domain::SessionGuard`]) and what it wants to
//! change (a [`domain::SessionPatch`]); the store applies the patch only if
//! the guard still holds, atomically. Matchmaking claims, move application,
//! cancellation, and lifecycle reclamation are all built on this one
//! primitive, so races anywhere in the system resolve to exactly one winner
//! per record.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Guard-checked mutation (single winner per record) | `service/session_store.rs` - `conditional_update()` / `delete()` under one write lock |
//! | One open search per player | `service/session_store.rs` - `create()` duplicate check |
//! | Unique join codes among open sessions | `service/session_store.rs` - `create()` code check |
//! | Terminal records immutable (deletion excepted) | `service/session_store.rs` - terminal check in `conditional_update()` |
//! | `revision` strictly increases by 1 per accepted write | `service/session_store.rs` - bump after `patch.apply()` |
//!
//! ## Conditional Update Protocol
//!
//! ```text
//! [load record] ──guard holds──→ [apply patch] ──→ [revision += 1] ──→ Ok(updated)
//!       │
//!       └── guard violated ──→ Err(Conflict { reason })
//! ```
//!
//! Callers treat `Conflict` as ordinary control flow: the matchmaker retries
//! against the next candidate, cancellation reinterprets it as "already
//! matched", and the turn engine surfaces it so the client refreshes.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - SessionStoreApi trait                      │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/session_store.rs - InMemorySessionStore                │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/guard.rs  - SessionGuard (expected-state predicate)     │
//! │  domain/patch.rs  - SessionPatch (partial update)               │
//! │  domain/draft.rs  - SessionDraft (create request)               │
//! │  domain/config.rs - StoreConfig                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::*;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::SessionStoreApi;
pub use service::InMemorySessionStore;
