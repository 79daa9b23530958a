//! Notifier configuration.

use std::time::Duration;

/// Configuration for session watchers.
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// Base interval between fallback polls of the store.
    pub poll_interval: Duration,
    /// Upper bound of the random extra delay added to each poll, in
    /// milliseconds. Spreads watcher polls apart so they do not hit the
    /// store in lockstep.
    pub poll_jitter_ms: u64,
    /// Capacity of the per-watch snapshot channel. A consumer that falls
    /// further behind than this backpressures its own watch task.
    pub channel_capacity: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            poll_jitter_ms: 500,
            channel_capacity: 32,
        }
    }
}
