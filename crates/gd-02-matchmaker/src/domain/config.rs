//! Matchmaker configuration.

/// Configuration for matchmaking and session creation.
#[derive(Debug, Clone)]
pub struct MatchmakerConfig {
    /// Side length of the board new sessions play on.
    pub board_size: u8,
    /// Starting move-time budget per player, in milliseconds.
    pub initial_time_ms: u64,
    /// How many times a lost claim race is retried against the next
    /// candidate before the requester opens a new search instead.
    pub claim_retries: u32,
    /// Length of generated invite codes.
    pub join_code_len: usize,
    /// How many code collisions are tolerated before giving up.
    pub join_code_attempts: u32,
}

impl Default for MatchmakerConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            initial_time_ms: 120_000,
            claim_retries: 4,
            join_code_len: 6,
            join_code_attempts: 8,
        }
    }
}
