//! # Grid-Duel Arena Runtime
//!
//! The main entry point for the Grid-Duel arena node.
//!
//! ## Architecture
//!
//! One process hosts five subsystems around a shared in-memory session
//! store and event bus:
//!
//! ```text
//!                      ┌──────────────────┐
//!  find/cancel/join ──→│  Matchmaker (2)  │──┐
//!                      └──────────────────┘  │  guarded
//!                      ┌──────────────────┐  │  writes      ┌─────────────────┐
//!  submit_move/resign →│ Turn Engine (3)  │──┼─────────────→│ Session Store(1)│
//!                      └──────────────────┘  │              └─────────────────┘
//!                      ┌──────────────────┐  │                      ↑
//!  grace + TTL sweeps ─│ Lifecycle   (5)  │──┘                      │ polls
//!                      └──────────────────┘                         │
//!                              │ events                             │
//!                              ▼                                    │
//!                      ┌──────────────────┐      ┌──────────────────┴┐
//!                      │    Event Bus     │─────→│   Notifier (4)    │──→ watch
//!                      └──────────────────┘ push └───────────────────┘    streams
//! ```
//!
//! ## Modular Structure
//!
//! - `container/` - Subsystem container with dependency injection
//! - `gateway/` - Client-facing facade folding errors into one taxonomy
//! - `handlers/` - Background tasks (event audit)
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults + environment overrides)
//! 2. Validate the game rules and cadences
//! 3. Initialize subsystems against the shared store and bus
//! 4. Spawn background tasks (reclamation sweeper, event audit)
//! 5. Signal ready

pub mod container;
pub mod gateway;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::container::{ArenaConfig, ArenaContainer};
use crate::handlers::EventAuditHandler;

/// The main arena runtime orchestrating all subsystems.
pub struct ArenaRuntime {
    /// Subsystem container with all initialized services.
    container: Arc<ArenaContainer>,
    /// Shutdown signal sender.
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl ArenaRuntime {
    /// Create a new arena runtime with configuration.
    pub fn new(config: ArenaConfig) -> Self {
        info!("Creating Grid-Duel arena runtime");

        let container = Arc::new(ArenaContainer::new(config));
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

        Self {
            container,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Start the arena runtime.
    ///
    /// ## Startup Sequence
    ///
    /// 1. Spawn the reclamation sweeper
    /// 2. Spawn the event audit handler
    /// 3. Signal ready
    pub async fn start(&self) -> Result<()> {
        info!("===========================================");
        info!("  Grid-Duel Arena Runtime v0.1.0");
        info!("===========================================");

        self.start_background_tasks();

        let config = &self.container.config;
        info!("All subsystems initialized and running");
        info!(
            "Board: {size}x{size}, {len} in a row wins",
            size = config.rules.board_size,
            len = config.rules.win_length
        );
        info!("Move budget: {}ms per player", config.rules.initial_time_ms);
        info!(
            "Grace period: {}ms, waiting TTL: {}ms",
            config.lifecycle.grace_period_ms, config.lifecycle.waiting_ttl_ms
        );

        Ok(())
    }

    /// Spawn the long-running tasks, each tied to the shutdown signal.
    fn start_background_tasks(&self) {
        let sweeper = self
            .container
            .lifecycle
            .sweeper(self.container.event_bus());
        let mut sweep_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = sweeper.run() => {}
                _ = sweep_shutdown.changed() => {
                    info!("[gd-05] Shutdown signal received");
                }
            }
        });

        let auditor = EventAuditHandler::new(&self.container);
        let mut audit_shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = auditor.run() => {}
                _ = audit_shutdown.changed() => {
                    info!("[audit] Shutdown signal received");
                }
            }
        });

        info!("Background tasks started");
    }

    /// Shutdown the arena gracefully.
    ///
    /// ## Shutdown Sequence
    ///
    /// 1. Signal shutdown to all background tasks
    /// 2. Give in-flight deliveries time to drain
    /// 3. Exit
    pub async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");

        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }

        // Give tasks time to wind down
        tokio::time::sleep(Duration::from_secs(1)).await;

        info!("Shutdown complete");
    }

    /// Get a reference to the subsystem container.
    pub fn container(&self) -> Arc<ArenaContainer> {
        Arc::clone(&self.container)
    }
}

/// Load configuration from environment overrides on top of defaults.
fn load_config() -> ArenaConfig {
    let mut config = ArenaConfig::default();

    override_u8(&mut config.rules.board_size, "GD_BOARD_SIZE");
    override_u8(&mut config.rules.win_length, "GD_WIN_LENGTH");
    override_u64(&mut config.rules.initial_time_ms, "GD_TIME_BUDGET_MS");
    override_u64(&mut config.lifecycle.grace_period_ms, "GD_GRACE_PERIOD_MS");
    override_u64(&mut config.lifecycle.waiting_ttl_ms, "GD_WAITING_TTL_MS");
    override_u64(
        &mut config.lifecycle.sweep_interval_ms,
        "GD_SWEEP_INTERVAL_MS",
    );
    override_u64(&mut config.notifier.poll_interval_ms, "GD_POLL_INTERVAL_MS");
    override_usize(&mut config.store.max_sessions, "GD_MAX_SESSIONS");

    config
}

fn override_u8(slot: &mut u8, var: &str) {
    if let Ok(raw) = std::env::var(var) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!("{var} is not a valid number, keeping {slot}"),
        }
    }
}

fn override_u64(slot: &mut u64, var: &str) {
    if let Ok(raw) = std::env::var(var) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!("{var} is not a valid number, keeping {slot}"),
        }
    }
}

fn override_usize(slot: &mut usize, var: &str) {
    if let Ok(raw) = std::env::var(var) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!("{var} is not a valid number, keeping {slot}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load and validate configuration
    let config = load_config();
    config.validate().context("invalid arena configuration")?;

    // Create and start the arena runtime
    let runtime = ArenaRuntime::new(config);
    runtime.start().await?;

    // Keep the arena running
    info!("Arena is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    // Graceful shutdown
    runtime.shutdown().await;

    Ok(())
}
