//! Concurrency tests: many tasks hammering the same guarded store.

pub mod contention;
