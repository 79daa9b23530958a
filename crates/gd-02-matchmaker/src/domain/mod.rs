//! Domain layer: tickets, invite codes, configuration, errors.

pub mod config;
pub mod errors;
pub mod join_code;
pub mod ticket;

pub use config::MatchmakerConfig;
pub use errors::MatchError;
pub use ticket::{CancelOutcome, MatchTicket, PlayerRole};
