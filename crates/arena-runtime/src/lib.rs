//! # Arena Runtime Library
//!
//! This library exposes the internal modules of the arena runtime for
//! testing. The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **Guarded store**: all state changes are predicate-guarded CAS writes
//! - **Hexagonal Architecture**: ports define contracts, services implement them
//! - **Push with poll fallback**: watchers stay correct when events are lost

pub mod container;
pub mod gateway;
pub mod handlers;

pub use container::{ArenaConfig, ArenaContainer, ConfigError};
pub use gateway::{SessionGateway, SessionView};
pub use handlers::EventAuditHandler;
