//! Service layer: the in-memory store implementation.

pub mod session_store;

pub use session_store::InMemorySessionStore;
