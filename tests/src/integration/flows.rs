//! # Integration Test Flows
//!
//! Tests that the matchmaker, turn engine, notifier, and lifecycle manager
//! work together correctly through the shared session store and event bus.
//!
//! ## Flows Tested
//!
//! 1. **Matchmaker (2) → Store (1)**: searches open, claims pair, codes join
//! 2. **Turn Engine (3) → Store (1) → Bus**: moves, wins, draws, resignations
//! 3. **Bus + Store polls → Notifier (4)**: push delivery with poll fallback
//! 4. **Lifecycle (5) sweeps**: grace expiry, clock exhaustion, waiting TTL
//!
//! All tests drive the services with a mock clock, so deadlines are crossed
//! by setting the time rather than sleeping through it.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // Shared infrastructure
    use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, SessionEvent};
    use shared_types::clock::MockTimeSource;
    use shared_types::entities::{PlayerId, PlayerMark, Session, SessionStatus, Winner};
    use shared_types::errors::{ArenaError, StoreError};

    // Subsystem 1: Session Store
    use gd_01_session_store::{InMemorySessionStore, SessionStoreApi};

    // Subsystem 2: Matchmaker
    use gd_02_matchmaker::{
        MatchmakerApi, MatchmakerConfig, MatchmakerDependencies, MatchmakerService, PlayerRole,
    };

    // Subsystem 3: Turn Engine
    use gd_03_turn_engine::{Ruleset, TurnEngineApi, TurnEngineDependencies, TurnEngineService};

    // Subsystem 4: Notifier
    use gd_04_notifier::{
        NotifierConfig, SessionWatchApi, SessionWatchDependencies, SessionWatchService, WatchHandle,
    };

    // Subsystem 5: Lifecycle Manager
    use gd_05_lifecycle::{
        LifecycleApi, LifecycleConfig, LifecycleDependencies, LifecyclePhase, LifecycleService,
    };

    const BUDGET_MS: u64 = 60_000;
    const GRACE_MS: u64 = 30_000;
    const TTL_MS: u64 = 300_000;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Every subsystem wired against one store, bus, and mock clock,
    /// playing 3-in-a-row on a 3x3 board.
    struct TestArena {
        store: Arc<InMemorySessionStore>,
        bus: Arc<InMemoryEventBus>,
        matchmaker: MatchmakerService<InMemorySessionStore, InMemoryEventBus>,
        engine: TurnEngineService<InMemorySessionStore, InMemoryEventBus>,
        lifecycle: LifecycleService<InMemorySessionStore>,
        clock: Arc<MockTimeSource>,
    }

    impl TestArena {
        fn new() -> Self {
            Self::with_budget(BUDGET_MS)
        }

        fn with_budget(budget_ms: u64) -> Self {
            let clock = Arc::new(MockTimeSource::new(0));
            let store = Arc::new(InMemorySessionStore::new(clock.clone()));
            let bus = Arc::new(InMemoryEventBus::new());

            let matchmaker = MatchmakerService::new(MatchmakerDependencies {
                store: store.clone(),
                bus: bus.clone(),
                config: MatchmakerConfig {
                    board_size: 3,
                    initial_time_ms: budget_ms,
                    ..MatchmakerConfig::default()
                },
            })
            .with_time_source(Box::new(clock.clone()));

            let engine = TurnEngineService::new(TurnEngineDependencies {
                store: store.clone(),
                bus: bus.clone(),
                rules: Ruleset {
                    board_size: 3,
                    win_length: 3,
                    initial_time_ms: budget_ms,
                },
            })
            .with_time_source(Box::new(clock.clone()));

            let lifecycle = LifecycleService::new(LifecycleDependencies {
                store: store.clone(),
                config: LifecycleConfig::default(),
            })
            .with_time_source(clock.clone());

            Self {
                store,
                bus,
                matchmaker,
                engine,
                lifecycle,
                clock,
            }
        }

        /// A notifier over this arena with an aggressive poll cadence.
        fn notifier(&self) -> SessionWatchService<InMemorySessionStore, InMemoryEventBus> {
            SessionWatchService::new(SessionWatchDependencies {
                store: self.store.clone(),
                bus: self.bus.clone(),
                config: NotifierConfig {
                    poll_interval: Duration::from_millis(25),
                    poll_jitter_ms: 5,
                    channel_capacity: 16,
                },
            })
        }

        /// Pair two fresh players and return (session, owner, joiner).
        async fn pair(&self) -> (Session, PlayerId, PlayerId) {
            let a = PlayerId::new();
            let b = PlayerId::new();
            self.matchmaker.request_match(&a).await.unwrap();
            let ticket = self.matchmaker.request_match(&b).await.unwrap();
            assert_eq!(ticket.role, PlayerRole::Joiner);
            (ticket.session, a, b)
        }
    }

    async fn recv_within(handle: &mut WatchHandle, ms: u64) -> Session {
        timeout(Duration::from_millis(ms), handle.recv())
            .await
            .expect("timed out waiting for a snapshot")
            .expect("watch stream ended early")
    }

    // =========================================================================
    // MATCHMAKING FLOWS
    // =========================================================================

    /// Scenario A: two searches pair into exactly one live session, and the
    /// bus announces the creation before the claim.
    #[tokio::test]
    async fn two_requests_pair_into_one_live_session() {
        let arena = TestArena::new();
        let mut sub = arena.bus.subscribe(EventFilter::all());
        let a = PlayerId::new();
        let b = PlayerId::new();

        let opened = arena.matchmaker.request_match(&a).await.unwrap();
        assert_eq!(opened.role, PlayerRole::Owner);
        assert_eq!(opened.session.status, SessionStatus::Waiting);

        let claimed = arena.matchmaker.request_match(&b).await.unwrap();
        assert_eq!(claimed.role, PlayerRole::Joiner);
        assert_eq!(claimed.session.id, opened.session.id);

        let live = arena.store.get(&opened.session.id).unwrap();
        assert_eq!(live.status, SessionStatus::Playing);
        assert_eq!(live.player_a, a);
        assert_eq!(live.player_b, Some(b));
        assert_eq!(live.current_turn, PlayerMark::A);
        assert_eq!(arena.store.len(), 1);

        assert!(matches!(
            sub.try_recv().unwrap(),
            Some(SessionEvent::SessionCreated { .. })
        ));
        assert!(matches!(
            sub.try_recv().unwrap(),
            Some(SessionEvent::SessionClaimed { .. })
        ));
    }

    /// Private sessions never enter the public queue; the invite code is
    /// the only way in.
    #[tokio::test]
    async fn invite_codes_bypass_the_public_queue() {
        let arena = TestArena::new();
        let host = PlayerId::new();
        let stranger = PlayerId::new();
        let friend = PlayerId::new();

        let private = arena.matchmaker.create_private(&host).await.unwrap();
        let code = private.session.join_code.clone().unwrap();

        // A public request opens its own search instead of claiming the
        // private session.
        let public = arena.matchmaker.request_match(&stranger).await.unwrap();
        assert_eq!(public.role, PlayerRole::Owner);
        assert_ne!(public.session.id, private.session.id);

        let joined = arena.matchmaker.join_by_code(&friend, &code).await.unwrap();
        assert_eq!(joined.role, PlayerRole::Joiner);
        assert_eq!(joined.session.id, private.session.id);
        assert_eq!(joined.session.status, SessionStatus::Playing);
    }

    /// Scenario E: a cancelled search is gone, and later operations against
    /// it say so.
    #[tokio::test]
    async fn cancelled_searches_disappear() {
        let arena = TestArena::new();
        let a = PlayerId::new();
        let opened = arena.matchmaker.request_match(&a).await.unwrap();

        let outcome = arena
            .matchmaker
            .cancel_match(&a, &opened.session.id)
            .await
            .unwrap();
        assert_eq!(outcome, gd_02_matchmaker::CancelOutcome::Cancelled);

        assert!(matches!(
            arena.store.get(&opened.session.id),
            Err(StoreError::NotFound(_))
        ));

        let err = arena
            .engine
            .submit_move(&a, &opened.session.id, 0, 0)
            .await
            .unwrap_err();
        assert!(matches!(ArenaError::from(err), ArenaError::NotFound(_)));
    }

    // =========================================================================
    // GAMEPLAY FLOWS
    // =========================================================================

    /// Alternating moves, each charged against its mover, up to a win.
    #[tokio::test]
    async fn alternating_moves_reach_a_win() {
        let arena = TestArena::new();
        let (session, a, b) = arena.pair().await;
        let id = session.id;
        let mut sub = arena
            .bus
            .subscribe(EventFilter::topics(vec![shared_bus::EventTopic::Gameplay]));

        // A takes the top row; every move costs its mover 500ms.
        let script = [(a, 0, 0), (b, 0, 1), (a, 1, 0), (b, 1, 1)];
        for (player, x, y) in script {
            arena.clock.advance(500);
            arena.engine.submit_move(&player, &id, x, y).await.unwrap();
        }
        arena.clock.advance(500);
        let finished = arena.engine.submit_move(&a, &id, 2, 0).await.unwrap();

        assert_eq!(finished.status, SessionStatus::Completed);
        assert_eq!(finished.winner, Some(Winner::Player(a)));
        assert_eq!(finished.time_left(PlayerMark::A), BUDGET_MS - 1_500);
        assert_eq!(finished.time_left(PlayerMark::B), BUDGET_MS - 1_000);

        // Four applied moves, then the completion.
        for _ in 0..4 {
            assert!(matches!(
                sub.try_recv().unwrap(),
                Some(SessionEvent::MoveApplied { .. })
            ));
        }
        assert!(matches!(
            sub.try_recv().unwrap(),
            Some(SessionEvent::SessionCompleted { .. })
        ));
    }

    /// A full board with no line is a draw.
    #[tokio::test]
    async fn a_full_board_without_a_line_draws() {
        let arena = TestArena::new();
        let (session, a, b) = arena.pair().await;
        let id = session.id;

        // Ends as:  A B A
        //           B B A
        //           A A B
        let script = [
            (a, 0, 0),
            (b, 1, 0),
            (a, 2, 0),
            (b, 0, 1),
            (a, 2, 1),
            (b, 1, 1),
            (a, 0, 2),
            (b, 2, 2),
            (a, 1, 2),
        ];
        let mut last = None;
        for (player, x, y) in script {
            last = Some(arena.engine.submit_move(&player, &id, x, y).await.unwrap());
        }

        let finished = last.unwrap();
        assert_eq!(finished.status, SessionStatus::Completed);
        assert_eq!(finished.winner, Some(Winner::Draw));
        assert!(finished.board.is_full());
    }

    /// Resignation completes the session in the opponent's favor.
    #[tokio::test]
    async fn resignation_completes_for_the_opponent() {
        let arena = TestArena::new();
        let (session, a, b) = arena.pair().await;

        let finished = arena.engine.resign(&b, &session.id).await.unwrap();
        assert_eq!(finished.status, SessionStatus::Completed);
        assert_eq!(finished.winner, Some(Winner::Player(a)));
    }

    /// Scenario B: an off-turn move is refused as Forbidden and leaves the
    /// board untouched.
    #[tokio::test]
    async fn off_turn_moves_are_forbidden() {
        let arena = TestArena::new();
        let (session, _a, b) = arena.pair().await;

        let err = arena
            .engine
            .submit_move(&b, &session.id, 0, 0)
            .await
            .unwrap_err();
        assert!(matches!(ArenaError::from(err), ArenaError::Forbidden(_)));

        let unchanged = arena.store.get(&session.id).unwrap();
        assert_eq!(unchanged.board.filled_cells(), 0);
        assert_eq!(unchanged.revision, session.revision);
    }

    /// Scenario C: an occupied cell is a validation failure, and the board
    /// keeps its single mark.
    #[tokio::test]
    async fn occupied_cells_are_validation_failures() {
        let arena = TestArena::new();
        let (session, a, b) = arena.pair().await;
        let id = session.id;

        arena.engine.submit_move(&a, &id, 0, 0).await.unwrap();
        let err = arena.engine.submit_move(&b, &id, 0, 0).await.unwrap_err();
        assert!(matches!(ArenaError::from(err), ArenaError::Validation(_)));

        assert_eq!(arena.store.get(&id).unwrap().board.filled_cells(), 1);
    }

    // =========================================================================
    // NOTIFICATION FLOWS
    // =========================================================================

    /// A watcher gets the current snapshot immediately, then pushed updates.
    #[tokio::test]
    async fn watchers_get_snapshot_then_pushes() {
        let arena = TestArena::new();
        let (session, a, _b) = arena.pair().await;
        let notifier = arena.notifier();

        let mut watch = notifier.watch(&session.id).unwrap();
        let opening = recv_within(&mut watch, 200).await;
        assert_eq!(opening.revision, session.revision);

        arena
            .engine
            .submit_move(&a, &session.id, 1, 1)
            .await
            .unwrap();
        let updated = recv_within(&mut watch, 200).await;
        assert!(updated.revision > opening.revision);
        assert_eq!(updated.board.filled_cells(), 1);

        watch.stop().await;
    }

    /// Store mutations that publish no event still reach watchers through
    /// the polling fallback.
    #[tokio::test]
    async fn silent_mutations_arrive_by_poll() {
        let arena = TestArena::new();
        let (session, a, _b) = arena.pair().await;
        let notifier = arena.notifier();

        let mut watch = notifier.watch(&session.id).unwrap();
        let opening = recv_within(&mut watch, 200).await;

        // Presence stamps bump the revision without publishing.
        arena.lifecycle.mark_disconnected(&session.id, &a).unwrap();

        let polled = recv_within(&mut watch, 2_000).await;
        assert!(polled.revision > opening.revision);
        assert!(polled.disconnected_a.is_some());

        watch.stop().await;
    }

    /// Redundant event deliveries collapse into one snapshot per revision.
    #[tokio::test]
    async fn duplicate_events_deliver_once() {
        let arena = TestArena::new();
        let (session, a, _b) = arena.pair().await;
        let notifier = arena.notifier();

        let mut watch = notifier.watch(&session.id).unwrap();
        let opening = recv_within(&mut watch, 200).await;

        // Replay the snapshot the watcher already holds.
        arena
            .bus
            .publish(SessionEvent::MoveApplied {
                session: opening.clone(),
            })
            .await;
        assert!(
            timeout(Duration::from_millis(150), watch.recv())
                .await
                .is_err(),
            "stale replay must not be delivered"
        );

        arena
            .engine
            .submit_move(&a, &session.id, 2, 2)
            .await
            .unwrap();
        let updated = recv_within(&mut watch, 200).await;
        assert!(updated.revision > opening.revision);

        watch.stop().await;
    }

    /// The watch stream delivers the terminal snapshot and then ends.
    #[tokio::test]
    async fn watch_streams_end_on_terminal_snapshots() {
        use tokio_stream::StreamExt;

        let arena = TestArena::new();
        let (session, _a, b) = arena.pair().await;
        let notifier = arena.notifier();

        let mut stream = notifier.watch(&session.id).unwrap().into_stream();
        let opening = timeout(Duration::from_millis(200), stream.next())
            .await
            .expect("snapshot should arrive promptly")
            .unwrap();
        assert_eq!(opening.status, SessionStatus::Playing);

        arena.engine.resign(&b, &session.id).await.unwrap();
        let terminal = timeout(Duration::from_millis(200), stream.next())
            .await
            .expect("terminal snapshot should arrive promptly")
            .unwrap();
        assert_eq!(terminal.status, SessionStatus::Completed);

        let end = timeout(Duration::from_millis(500), stream.next())
            .await
            .expect("stream should close promptly");
        assert!(end.is_none());
    }

    // =========================================================================
    // LIFECYCLE FLOWS
    // =========================================================================

    /// Disconnect, outlive the grace period, get abandoned: no winner.
    #[tokio::test]
    async fn grace_expiry_abandons_the_session() {
        let arena = TestArena::new();
        let (session, a, _b) = arena.pair().await;
        let sweeper = arena.lifecycle.sweeper(arena.bus.clone());

        arena.lifecycle.mark_disconnected(&session.id, &a).unwrap();
        arena.clock.set(GRACE_MS);
        let report = sweeper.sweep_once().await;
        assert_eq!(report.abandoned, 1);

        let retired = arena.store.get(&session.id).unwrap();
        assert_eq!(LifecyclePhase::of(&retired), LifecyclePhase::Abandoned);
        assert_eq!(retired.winner, None);
    }

    /// Reconnecting inside the grace period keeps the session alive.
    #[tokio::test]
    async fn reconnect_within_grace_stays_playing() {
        let arena = TestArena::new();
        let (session, a, _b) = arena.pair().await;
        let sweeper = arena.lifecycle.sweeper(arena.bus.clone());

        arena.lifecycle.mark_disconnected(&session.id, &a).unwrap();
        arena.clock.set(GRACE_MS - 1_000);
        arena.lifecycle.mark_reconnected(&session.id, &a).unwrap();

        // Well past the original stamp's deadline, well short of the clock.
        arena.clock.set(GRACE_MS + 5_000);
        assert!(sweeper.sweep_once().await.is_empty());
        assert_eq!(
            LifecyclePhase::of(&arena.store.get(&session.id).unwrap()),
            LifecyclePhase::Active
        );
    }

    /// Scenario D: an idle mover runs out of clock; the sweeper completes
    /// the session for the opponent.
    #[tokio::test]
    async fn idle_clock_exhaustion_completes_for_the_opponent() {
        let arena = TestArena::with_budget(10_000);
        let (session, _a, b) = arena.pair().await;
        let sweeper = arena.lifecycle.sweeper(arena.bus.clone());

        arena.clock.set(10_000);
        let report = sweeper.sweep_once().await;
        assert_eq!(report.timed_out, 1);

        let finished = arena.store.get(&session.id).unwrap();
        assert_eq!(LifecyclePhase::of(&finished), LifecyclePhase::Completed);
        assert_eq!(finished.winner, Some(Winner::Player(b)));
        assert_eq!(finished.time_left(PlayerMark::A), 0);
    }

    /// Stale searches expire after the waiting TTL; fresh ones survive.
    #[tokio::test]
    async fn waiting_ttl_reclaims_stale_searches() {
        let arena = TestArena::new();
        let sweeper = arena.lifecycle.sweeper(arena.bus.clone());
        let stale = arena
            .matchmaker
            .request_match(&PlayerId::new())
            .await
            .unwrap();

        arena.clock.set(TTL_MS);
        let report = sweeper.sweep_once().await;
        assert_eq!(report.expired, 1);

        assert!(matches!(
            arena.store.get(&stale.session.id),
            Err(StoreError::NotFound(_))
        ));

        // A new search opened after the sweep is untouched.
        let fresh = arena
            .matchmaker
            .request_match(&PlayerId::new())
            .await
            .unwrap();
        assert!(sweeper.sweep_once().await.is_empty());
        assert!(arena.store.get(&fresh.session.id).is_ok());
    }
}
