//! Port definitions for the Session Store subsystem.

pub mod inbound;

pub use inbound::SessionStoreApi;
