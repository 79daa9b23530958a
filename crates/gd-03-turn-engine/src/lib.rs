//! # Turn Engine Subsystem
//!
//! ## Purpose
//!
//! Validates and applies moves for live sessions. A move passes a fixed
//! pipeline of checks, is charged against the mover's clock, and lands in
//! the store as one guarded update. Two copies of the same move can both
//! pass validation; the guard makes sure only one of them lands.
//!
//! ## Validation Pipeline
//!
//! ```text
//! submit_move(p, id, x, y)
//!   1. record exists              → NotFound
//!   2. status == Playing          → MatchNotActive
//!   3. p is seated                → NotAParticipant
//!   4. it is p's turn             → NotYourTurn
//!   5. clock not exhausted        → BudgetExhausted (completes the match)
//!   6. (x, y) on the board        → OutOfBounds
//!   7. target cell empty          → CellOccupied
//!   ─────────────────────────────────────────────────
//!   place mark, charge clock, detect win/draw, flip turn
//!   guarded write (status + turn + revision)
//!                                 → MoveConflict if anything moved first
//! ```
//!
//! The clock check runs before legality on purpose: a player whose budget
//! ran out mid-think loses on time even if the square they finally picked
//! was taken. Exhaustion is applied here rather than waiting for the
//! reclamation sweep, so the loss is visible on the very next interaction.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - TurnEngineApi trait                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service/mod.rs - TurnEngineService<S, P>                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ruleset.rs - board geometry, win/draw detection         │
//! │  domain/errors.rs  - TurnError                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::*;
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::TurnEngineApi;
pub use service::{TurnEngineDependencies, TurnEngineService};
