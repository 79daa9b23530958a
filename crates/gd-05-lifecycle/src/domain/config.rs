//! Lifecycle configuration.

use std::time::Duration;

/// Configuration for presence tracking and reclamation.
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// How long a disconnected participant may stay away before their live
    /// session is abandoned, in milliseconds.
    pub grace_period_ms: u64,
    /// How long an unclaimed search may sit in the store before it is
    /// reclaimed, in milliseconds.
    pub waiting_ttl_ms: u64,
    /// Cadence of the reclamation sweep.
    pub sweep_interval: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            grace_period_ms: 30_000,
            waiting_ttl_ms: 300_000,
            sweep_interval: Duration::from_secs(1),
        }
    }
}
