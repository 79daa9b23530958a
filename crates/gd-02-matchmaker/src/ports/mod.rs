//! Port definitions for the Matchmaker subsystem.

pub mod inbound;

pub use inbound::MatchmakerApi;
