//! # Contention Tests
//!
//! Race many tasks against the same store and check that the guarded-write
//! discipline holds: no seat is handed out twice, duplicate submissions
//! collapse to a single accepted move, and alternation survives two players
//! spamming the board from separate threads.
//!
//! These run on the multi-threaded runtime so interleavings are real, and
//! they assert invariants rather than fixed outcomes.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use rand::Rng;

    use gd_01_session_store::{InMemorySessionStore, SessionStoreApi};
    use gd_02_matchmaker::{
        CancelOutcome, MatchmakerApi, MatchmakerConfig, MatchmakerDependencies, MatchmakerService,
        PlayerRole,
    };
    use gd_03_turn_engine::{
        Ruleset, TurnEngineApi, TurnEngineDependencies, TurnEngineService, TurnError,
    };
    use shared_bus::InMemoryEventBus;
    use shared_types::clock::SystemTimeSource;
    use shared_types::entities::{CellState, PlayerId, PlayerMark, SessionStatus};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Matchmaker and turn engine sharing one store, on the real clock.
    struct RaceArena {
        store: Arc<InMemorySessionStore>,
        matchmaker: Arc<MatchmakerService<InMemorySessionStore, InMemoryEventBus>>,
        engine: Arc<TurnEngineService<InMemorySessionStore, InMemoryEventBus>>,
    }

    impl RaceArena {
        fn new() -> Self {
            let store = Arc::new(InMemorySessionStore::new(Arc::new(SystemTimeSource)));
            let bus = Arc::new(InMemoryEventBus::new());
            let matchmaker = Arc::new(MatchmakerService::new(MatchmakerDependencies {
                store: store.clone(),
                bus: bus.clone(),
                config: MatchmakerConfig::default(),
            }));
            let engine = Arc::new(TurnEngineService::new(TurnEngineDependencies {
                store: store.clone(),
                bus,
                rules: Ruleset::default(),
            }));
            Self {
                store,
                matchmaker,
                engine,
            }
        }

        /// Pair two fresh players and return them with their session id.
        async fn live_pair(&self) -> (PlayerId, PlayerId, shared_types::entities::SessionId) {
            let a = PlayerId::new();
            let b = PlayerId::new();
            let id = self.matchmaker.request_match(&a).await.unwrap().session.id;
            self.matchmaker.request_match(&b).await.unwrap();
            (a, b, id)
        }
    }

    // =========================================================================
    // MATCHMAKING UNDER CONTENTION
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_requests_never_double_claim() {
        let arena = RaceArena::new();
        let players: Vec<PlayerId> = (0..8).map(|_| PlayerId::new()).collect();

        let handles: Vec<_> = players
            .iter()
            .map(|player| {
                let matchmaker = arena.matchmaker.clone();
                let player = *player;
                tokio::spawn(async move { matchmaker.request_match(&player).await })
            })
            .collect();
        let mut owners = 0usize;
        let mut joiners = 0usize;
        for joined in futures::future::join_all(handles).await {
            match joined.unwrap().unwrap().role {
                PlayerRole::Owner => owners += 1,
                PlayerRole::Joiner => joiners += 1,
            }
        }

        // Every request ended somewhere: paired off or left searching.
        let playing = arena.store.sessions_in_status(SessionStatus::Playing);
        let waiting = arena.store.sessions_in_status(SessionStatus::Waiting);
        assert_eq!(playing.len() * 2 + waiting.len(), players.len());
        assert_eq!(owners, playing.len() + waiting.len());
        assert_eq!(joiners, playing.len());

        // No player was seated twice, and no session seated one player in
        // both chairs.
        let mut seated = HashSet::new();
        for session in &playing {
            let joiner = session.player_b.unwrap();
            assert_ne!(session.player_a, joiner);
            assert!(seated.insert(session.player_a));
            assert!(seated.insert(joiner));
        }
        for session in &waiting {
            assert!(session.player_b.is_none());
            assert!(seated.insert(session.player_a));
        }
        assert_eq!(seated.len(), players.len());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn cancellation_racing_a_claim_settles_cleanly() {
        let arena = RaceArena::new();

        for _ in 0..10 {
            let a = PlayerId::new();
            let b = PlayerId::new();
            let id = arena.matchmaker.request_match(&a).await.unwrap().session.id;

            let canceller = {
                let matchmaker = arena.matchmaker.clone();
                tokio::spawn(async move { matchmaker.cancel_match(&a, &id).await })
            };
            let claimer = {
                let matchmaker = arena.matchmaker.clone();
                tokio::spawn(async move { matchmaker.request_match(&b).await })
            };
            let cancelled = canceller.await.unwrap().unwrap();
            let claimed = claimer.await.unwrap().unwrap();

            match cancelled {
                // The search died first; B fell through to a fresh one.
                CancelOutcome::Cancelled => {
                    assert_eq!(claimed.role, PlayerRole::Owner);
                    assert_ne!(claimed.session.id, id);
                    assert!(arena.store.get(&id).is_err());
                    // Drain B's search so the next round starts empty.
                    arena
                        .matchmaker
                        .cancel_match(&b, &claimed.session.id)
                        .await
                        .unwrap();
                }
                // B got there first; the cancel saw the live session.
                CancelOutcome::AlreadyMatched(session) => {
                    assert_eq!(claimed.role, PlayerRole::Joiner);
                    assert_eq!(claimed.session.id, id);
                    assert_eq!(session.player_b, Some(b));
                }
            }
        }
    }

    // =========================================================================
    // GAMEPLAY UNDER CONTENTION
    // =========================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn duplicate_submissions_collapse_to_one_move() {
        let arena = RaceArena::new();
        let (a, _b, id) = arena.live_pair().await;

        let submit = |engine: Arc<TurnEngineService<InMemorySessionStore, InMemoryEventBus>>| {
            tokio::spawn(async move { engine.submit_move(&a, &id, 0, 0).await })
        };
        let first = submit(arena.engine.clone());
        let second = submit(arena.engine.clone());

        let results = [first.await.unwrap(), second.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let loser = results.iter().find(|r| r.is_err()).unwrap();
        assert!(matches!(
            loser,
            Err(TurnError::NotYourTurn) | Err(TurnError::MoveConflict)
        ));

        // One mark landed, and the turn passed exactly once.
        let session = arena.store.get(&id).unwrap();
        assert_eq!(session.board.filled_cells(), 1);
        assert_eq!(session.board.cell(0, 0), Some(CellState::MarkA));
        assert_eq!(session.current_turn, PlayerMark::B);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn hammering_players_cannot_break_alternation() {
        let arena = RaceArena::new();
        let (a, b, id) = arena.live_pair().await;
        let size = arena.store.get(&id).unwrap().board.size;

        let spam = |engine: Arc<TurnEngineService<InMemorySessionStore, InMemoryEventBus>>,
                    player: PlayerId| {
            tokio::spawn(async move {
                for _ in 0..40 {
                    let (x, y) = {
                        let mut rng = rand::thread_rng();
                        (rng.gen_range(0..size), rng.gen_range(0..size))
                    };
                    // Rejections are the point; only accepted moves matter.
                    let _ = engine.submit_move(&player, &id, x, y).await;
                    tokio::task::yield_now().await;
                }
            })
        };
        let first = spam(arena.engine.clone(), a);
        let second = spam(arena.engine.clone(), b);
        first.await.unwrap();
        second.await.unwrap();

        let session = arena.store.get(&id).unwrap();
        let marks_a = session
            .board
            .cells
            .iter()
            .filter(|c| **c == CellState::MarkA)
            .count();
        let marks_b = session
            .board
            .cells
            .iter()
            .filter(|c| **c == CellState::MarkB)
            .count();

        // A opens, so A leads by at most one and B never leads.
        assert!(
            marks_a == marks_b || marks_a == marks_b + 1,
            "alternation broke: {marks_a} A marks vs {marks_b} B marks"
        );
        if !session.is_terminal() {
            match session.current_turn {
                PlayerMark::A => assert_eq!(marks_a, marks_b),
                PlayerMark::B => assert_eq!(marks_a, marks_b + 1),
            }
        }
    }
}
