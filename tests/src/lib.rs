//! # Grid-Duel Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Cross-subsystem flows
//! │   ├── flows.rs      # Pairing, gameplay, notification, reclamation
//! │   └── e2e_arena.rs  # Whole-container flows through the gateway
//! │
//! └── races/            # Concurrency properties
//!     └── contention.rs # Claim races, cancel races, duplicate moves
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gd-tests
//!
//! # By category
//! cargo test -p gd-tests integration::
//! cargo test -p gd-tests races::
//!
//! # Benchmarks
//! cargo bench -p gd-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod races;
