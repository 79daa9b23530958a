//! Port definitions for the Lifecycle Manager subsystem.

pub mod inbound;

pub use inbound::LifecycleApi;
