//! Domain layer: snapshot application, watch handles, configuration.

pub mod applier;
pub mod config;
pub mod handle;

pub use applier::StateApplier;
pub use config::NotifierConfig;
pub use handle::WatchHandle;
