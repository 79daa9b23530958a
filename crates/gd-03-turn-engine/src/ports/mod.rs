//! Port definitions for the Turn Engine subsystem.

pub mod inbound;

pub use inbound::TurnEngineApi;
