//! Domain layer: the guard/patch vocabulary of conditional mutation.

pub mod config;
pub mod draft;
pub mod guard;
pub mod patch;

pub use config::StoreConfig;
pub use draft::SessionDraft;
pub use guard::SessionGuard;
pub use patch::SessionPatch;
