//! # Matchmaker Subsystem
//!
//! ## Purpose
//!
//! Pairs searching players into sessions. The matchmaker never holds its own
//! queue state: the set of `Waiting` records in the session store *is* the
//! queue, ordered FIFO by `created_at`, and claiming a seat is a guarded
//! update that exactly one contender can win. Lost races are retried
//! internally; the caller only ever sees a ticket or an error, never a raw
//! conflict.
//!
//! ## Claim Loop
//!
//! ```text
//! request_match(p)
//!   │
//!   ├─ 1. delete p's stale open search (claimed mid-flight? → rejoin it)
//!   │
//!   ├─ 2. oldest claimable session ──none──→ 4. create new Waiting (Owner)
//!   │         │
//!   └─ 3. guarded claim (seat := p, status := Playing)
//!             │
//!             ├── Ok ──→ ticket (Joiner)
//!             └── Conflict ──→ back to 2 (bounded retries, then 4)
//! ```
//!
//! Cancellation runs the mirror image: a guarded delete that demands the
//! seat is still open. Losing that race is not an error; it means an
//! opponent arrived first, and the caller gets the live session back as
//! `CancelOutcome::AlreadyMatched`.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - MatchmakerApi trait                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/mod.rs - MatchmakerService<S, P>                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ticket.rs    - MatchTicket, PlayerRole, CancelOutcome   │
//! │  domain/join_code.rs - invite code generation                   │
//! │  domain/errors.rs    - MatchError                               │
//! │  domain/config.rs    - MatchmakerConfig                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::*;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::MatchmakerApi;
pub use service::{MatchmakerDependencies, MatchmakerService};
