//! # Subsystem Container
//!
//! Holds all core subsystem instances and manages their lifecycle.
//!
//! ## Initialization Order
//!
//! Subsystems are initialized in strict dependency order:
//!
//! ```text
//! Level 0: Event Bus, Session Store (shared infrastructure)
//! Level 1: Matchmaker, Turn Engine, Notifier, Lifecycle (all lean on Level 0)
//! ```
//!
//! ## Thread Safety
//!
//! - All subsystems are wrapped in `Arc` for shared ownership
//! - Services own no per-call state, so no outer lock is needed; the store
//!   serializes writers internally

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use gd_01_session_store::{InMemorySessionStore, StoreConfig};
use gd_02_matchmaker::{MatchmakerConfig, MatchmakerDependencies, MatchmakerService};
use gd_03_turn_engine::{TurnEngineDependencies, TurnEngineService};
use gd_04_notifier::{NotifierConfig, SessionWatchDependencies, SessionWatchService};
use gd_05_lifecycle::{LifecycleConfig, LifecycleDependencies, LifecycleService};
use shared_bus::InMemoryEventBus;
use shared_types::clock::SystemTimeSource;

use crate::container::config::ArenaConfig;

/// Concrete matchmaker wired against the in-memory backends.
pub type ConcreteMatchmaker = MatchmakerService<InMemorySessionStore, InMemoryEventBus>;
/// Concrete turn engine wired against the in-memory backends.
pub type ConcreteTurnEngine = TurnEngineService<InMemorySessionStore, InMemoryEventBus>;
/// Concrete notifier wired against the in-memory backends.
pub type ConcreteNotifier = SessionWatchService<InMemorySessionStore, InMemoryEventBus>;
/// Concrete lifecycle manager wired against the in-memory backend.
pub type ConcreteLifecycle = LifecycleService<InMemorySessionStore>;

/// Central container holding all subsystem instances.
///
/// This is the main integration point where every subsystem is wired to the
/// same store and event bus.
pub struct ArenaContainer {
    /// Matchmaker (Subsystem 2): pairs players into sessions.
    pub matchmaker: Arc<ConcreteMatchmaker>,

    /// Turn Engine (Subsystem 3): validates and applies moves.
    pub turn_engine: Arc<ConcreteTurnEngine>,

    /// Notifier (Subsystem 4): per-session watch streams.
    pub notifier: Arc<ConcreteNotifier>,

    /// Lifecycle Manager (Subsystem 5): presence stamps and reclamation.
    pub lifecycle: Arc<ConcreteLifecycle>,

    /// Session Store (Subsystem 1): the single source of truth.
    pub store: Arc<InMemorySessionStore>,

    /// Event Bus for inter-subsystem notification.
    pub event_bus: Arc<InMemoryEventBus>,

    /// Arena configuration (immutable after initialization).
    pub config: ArenaConfig,
}

impl ArenaContainer {
    /// Create a new container with all subsystems initialized.
    ///
    /// ## Initialization Phases
    ///
    /// 1. Create shared infrastructure (event bus, session store)
    /// 2. Initialize the services against that infrastructure
    #[instrument(name = "subsystem_init", skip(config))]
    pub fn new(config: ArenaConfig) -> Self {
        info!("Initializing Grid-Duel subsystem container");

        info!("Phase 1: Creating shared infrastructure");
        let event_bus = Arc::new(InMemoryEventBus::new());
        let store = Arc::new(InMemorySessionStore::with_config(
            StoreConfig {
                max_sessions: config.store.max_sessions,
            },
            Arc::new(SystemTimeSource),
        ));
        info!(
            "  [1] Session Store initialized (max {} sessions)",
            config.store.max_sessions
        );

        info!("Phase 2: Initializing services");
        let matchmaker = Self::init_matchmaker(&config, &store, &event_bus);
        info!(
            "  [2] Matchmaker initialized (board {size}x{size}, {budget}ms budgets)",
            size = config.rules.board_size,
            budget = config.rules.initial_time_ms
        );

        let turn_engine = Self::init_turn_engine(&config, &store, &event_bus);
        info!(
            "  [3] Turn Engine initialized ({} in a row wins)",
            config.rules.win_length
        );

        let notifier = Self::init_notifier(&config, &store, &event_bus);
        info!(
            "  [4] Notifier initialized (poll every {}ms +{}ms jitter)",
            config.notifier.poll_interval_ms, config.notifier.poll_jitter_ms
        );

        let lifecycle = Self::init_lifecycle(&config, &store);
        info!(
            "  [5] Lifecycle Manager initialized (grace {}ms, waiting TTL {}ms)",
            config.lifecycle.grace_period_ms, config.lifecycle.waiting_ttl_ms
        );

        info!("All subsystems initialized successfully");

        Self {
            matchmaker,
            turn_engine,
            notifier,
            lifecycle,
            store,
            event_bus,
            config,
        }
    }

    /// Create a container for testing with default configuration.
    #[cfg(test)]
    pub fn new_for_testing() -> Self {
        Self::new(ArenaConfig::default())
    }

    fn init_matchmaker(
        config: &ArenaConfig,
        store: &Arc<InMemorySessionStore>,
        bus: &Arc<InMemoryEventBus>,
    ) -> Arc<ConcreteMatchmaker> {
        let matchmaker_config = MatchmakerConfig {
            board_size: config.rules.board_size,
            initial_time_ms: config.rules.initial_time_ms,
            claim_retries: config.matchmaking.claim_retries,
            join_code_len: config.matchmaking.join_code_len,
            join_code_attempts: config.matchmaking.join_code_attempts,
        };
        Arc::new(MatchmakerService::new(MatchmakerDependencies {
            store: Arc::clone(store),
            bus: Arc::clone(bus),
            config: matchmaker_config,
        }))
    }

    fn init_turn_engine(
        config: &ArenaConfig,
        store: &Arc<InMemorySessionStore>,
        bus: &Arc<InMemoryEventBus>,
    ) -> Arc<ConcreteTurnEngine> {
        Arc::new(TurnEngineService::new(TurnEngineDependencies {
            store: Arc::clone(store),
            bus: Arc::clone(bus),
            rules: config.rules.as_ruleset(),
        }))
    }

    fn init_notifier(
        config: &ArenaConfig,
        store: &Arc<InMemorySessionStore>,
        bus: &Arc<InMemoryEventBus>,
    ) -> Arc<ConcreteNotifier> {
        let notifier_config = NotifierConfig {
            poll_interval: Duration::from_millis(config.notifier.poll_interval_ms),
            poll_jitter_ms: config.notifier.poll_jitter_ms,
            channel_capacity: config.notifier.channel_capacity,
        };
        Arc::new(SessionWatchService::new(SessionWatchDependencies {
            store: Arc::clone(store),
            bus: Arc::clone(bus),
            config: notifier_config,
        }))
    }

    fn init_lifecycle(
        config: &ArenaConfig,
        store: &Arc<InMemorySessionStore>,
    ) -> Arc<ConcreteLifecycle> {
        let lifecycle_config = LifecycleConfig {
            grace_period_ms: config.lifecycle.grace_period_ms,
            waiting_ttl_ms: config.lifecycle.waiting_ttl_ms,
            sweep_interval: Duration::from_millis(config.lifecycle.sweep_interval_ms),
        };
        Arc::new(LifecycleService::new(LifecycleDependencies {
            store: Arc::clone(store),
            config: lifecycle_config,
        }))
    }

    /// Get the event bus for publishing/subscribing.
    pub fn event_bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.event_bus)
    }

    /// Get the session store.
    pub fn store(&self) -> Arc<InMemorySessionStore> {
        Arc::clone(&self.store)
    }

    /// Cadence of the reclamation sweeper.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.config.lifecycle.sweep_interval_ms)
    }
}
