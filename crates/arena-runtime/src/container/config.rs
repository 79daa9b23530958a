//! # Arena Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! Every value has a sane default; `load_config` in `main.rs` applies
//! environment overrides on top.

use thiserror::Error;

/// Complete arena configuration.
#[derive(Debug, Clone, Default)]
pub struct ArenaConfig {
    /// Board and clock rules new sessions are created with.
    pub rules: RulesConfig,
    /// Matchmaking queue configuration.
    pub matchmaking: MatchmakingConfig,
    /// Change-notification configuration.
    pub notifier: NotifierSection,
    /// Presence and reclamation configuration.
    pub lifecycle: LifecycleSection,
    /// Session store configuration.
    pub store: StoreSection,
}

impl ArenaConfig {
    /// Validate configuration before wiring subsystems.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the board rules are internally inconsistent (size, line length,
    ///   or a zero time budget)
    /// - any background cadence is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.as_ruleset().validate().map_err(ConfigError::InvalidRules)?;
        if self.notifier.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroCadence("GD_POLL_INTERVAL_MS"));
        }
        if self.lifecycle.sweep_interval_ms == 0 {
            return Err(ConfigError::ZeroCadence("GD_SWEEP_INTERVAL_MS"));
        }
        if self.lifecycle.grace_period_ms == 0 {
            return Err(ConfigError::ZeroCadence("GD_GRACE_PERIOD_MS"));
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The board rules cannot produce a playable game.
    #[error("invalid game rules: {0}")]
    InvalidRules(String),

    /// A periodic task was configured to run never.
    #[error("{0} must be greater than zero")]
    ZeroCadence(&'static str),
}

/// Game rules applied to every new session.
#[derive(Debug, Clone)]
pub struct RulesConfig {
    /// Side length of the square board.
    pub board_size: u8,
    /// Marks in a row needed to win.
    pub win_length: u8,
    /// Starting move-time budget per player, in milliseconds.
    pub initial_time_ms: u64,
}

impl RulesConfig {
    /// The turn engine's view of these rules.
    pub fn as_ruleset(&self) -> gd_03_turn_engine::Ruleset {
        gd_03_turn_engine::Ruleset {
            board_size: self.board_size,
            win_length: self.win_length,
            initial_time_ms: self.initial_time_ms,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            board_size: 9,
            win_length: 5,
            initial_time_ms: 120_000,
        }
    }
}

/// Matchmaking queue configuration.
#[derive(Debug, Clone)]
pub struct MatchmakingConfig {
    /// Lost claim races retried before opening a new search.
    pub claim_retries: u32,
    /// Length of generated invite codes.
    pub join_code_len: usize,
    /// Invite-code collisions tolerated before giving up.
    pub join_code_attempts: u32,
}

impl Default for MatchmakingConfig {
    fn default() -> Self {
        Self {
            claim_retries: 4,
            join_code_len: 6,
            join_code_attempts: 8,
        }
    }
}

/// Change-notification configuration.
#[derive(Debug, Clone)]
pub struct NotifierSection {
    /// Base interval between fallback polls, in milliseconds.
    pub poll_interval_ms: u64,
    /// Upper bound of the random extra poll delay, in milliseconds.
    pub poll_jitter_ms: u64,
    /// Capacity of each watcher's snapshot channel.
    pub channel_capacity: usize,
}

impl Default for NotifierSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2_000,
            poll_jitter_ms: 500,
            channel_capacity: 32,
        }
    }
}

/// Presence and reclamation configuration.
#[derive(Debug, Clone)]
pub struct LifecycleSection {
    /// How long a disconnected seat is held open, in milliseconds.
    pub grace_period_ms: u64,
    /// How long an unclaimed search survives, in milliseconds.
    pub waiting_ttl_ms: u64,
    /// Cadence of the reclamation sweeper, in milliseconds.
    pub sweep_interval_ms: u64,
}

impl Default for LifecycleSection {
    fn default() -> Self {
        Self {
            grace_period_ms: 30_000,
            waiting_ttl_ms: 300_000,
            sweep_interval_ms: 1_000,
        }
    }
}

/// Session store configuration.
#[derive(Debug, Clone)]
pub struct StoreSection {
    /// Maximum live session records before creates are refused.
    pub max_sessions: usize,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
        }
    }
}
