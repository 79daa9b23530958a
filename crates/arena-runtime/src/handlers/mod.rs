//! # Event Handlers
//!
//! Background tasks the runtime spawns next to the client-facing services.

pub mod audit;

pub use audit::EventAuditHandler;
