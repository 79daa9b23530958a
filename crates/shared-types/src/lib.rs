//! # Shared Types Crate
//!
//! This crate contains all domain entities shared across subsystems: session
//! records, board primitives, identifiers, the clock abstraction, and the
//! error taxonomy exposed at the client boundary.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Guarded Mutation**: The `Session` record is only ever mutated through
//!   the session store's predicate-guarded operations; nothing in this crate
//!   mutates shared state.
//! - **Deterministic Time**: All time-dependent logic reads the clock through
//!   the [`clock::TimeSource`] trait so tests can drive time explicitly.

pub mod clock;
pub mod entities;
pub mod errors;

pub use clock::*;
pub use entities::*;
pub use errors::*;
