//! Port definitions for the Change Notifier subsystem.

pub mod inbound;

pub use inbound::SessionWatchApi;
