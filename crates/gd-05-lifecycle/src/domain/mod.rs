//! Domain layer: lifecycle phases, configuration, errors.

pub mod config;
pub mod errors;
pub mod phase;

pub use config::LifecycleConfig;
pub use errors::LifecycleError;
pub use phase::LifecyclePhase;
