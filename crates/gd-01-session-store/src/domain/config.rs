//! Store configuration.

/// Configuration for the in-memory session store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of live session records. Creates past this bound are
    /// rejected as transient so callers back off instead of growing the map
    /// without limit.
    pub max_sessions: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
        }
    }
}
