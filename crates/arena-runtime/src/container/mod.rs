//! # Subsystem Container
//!
//! Central container holding all subsystem instances with proper lifetime
//! management and dependency injection.
//!
//! - Subsystems are initialized against one shared store and event bus
//! - Clients reach them through the session gateway, never directly

pub mod config;
pub mod subsystems;

pub use config::{ArenaConfig, ConfigError};
pub use subsystems::ArenaContainer;
