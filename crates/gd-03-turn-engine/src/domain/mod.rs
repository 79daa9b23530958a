//! Domain layer: rules of the game and move errors.

pub mod errors;
pub mod ruleset;

pub use errors::TurnError;
pub use ruleset::Ruleset;
