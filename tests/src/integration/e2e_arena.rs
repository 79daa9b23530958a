//! # End-to-End Arena Tests
//!
//! Drives the assembled [`ArenaContainer`] through the [`SessionGateway`],
//! exactly as the runtime binary wires it: real system clock, shared store
//! and bus, and (where a test needs it) a live reclamation sweeper running
//! in the background.
//!
//! The flows in `flows.rs` pin deadline arithmetic with a mock clock; these
//! tests trade that precision for realism, so their timing constants carry
//! generous margins.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::{sleep, timeout};

    use arena_runtime::{ArenaConfig, ArenaContainer, SessionGateway};
    use gd_02_matchmaker::PlayerRole;
    use gd_05_lifecycle::LifecyclePhase;
    use shared_bus::{EventFilter, SessionEvent};
    use shared_types::entities::{PlayerId, Winner};
    use shared_types::errors::ArenaError;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// A 3x3, 3-in-a-row arena so games finish in five moves.
    fn tiny_config() -> ArenaConfig {
        let mut config = ArenaConfig::default();
        config.rules.board_size = 3;
        config.rules.win_length = 3;
        config
    }

    fn arena_with(config: ArenaConfig) -> (SessionGateway, Arc<ArenaContainer>) {
        let container = Arc::new(ArenaContainer::new(config));
        (SessionGateway::new(Arc::clone(&container)), container)
    }

    // =========================================================================
    // FULL MATCH FLOW
    // =========================================================================

    #[tokio::test]
    async fn a_complete_match_runs_through_the_container() {
        let (gateway, container) = arena_with(tiny_config());
        let mut audit = container.event_bus().subscribe(EventFilter::all());
        let a = PlayerId::new();
        let b = PlayerId::new();

        let opened = gateway.find_match(&a).await.unwrap();
        assert_eq!(opened.role, PlayerRole::Owner);
        assert_eq!(
            gateway.session_state(&opened.session.id).unwrap().phase,
            LifecyclePhase::Searching
        );

        let claimed = gateway.find_match(&b).await.unwrap();
        assert_eq!(claimed.role, PlayerRole::Joiner);
        assert_eq!(claimed.session.id, opened.session.id);
        let id = opened.session.id;
        assert_eq!(
            gateway.session_state(&id).unwrap().phase,
            LifecyclePhase::Active
        );

        // A takes the top row while B wanders below it.
        gateway.submit_move(&a, &id, 0, 0).await.unwrap();
        gateway.submit_move(&b, &id, 0, 1).await.unwrap();
        gateway.submit_move(&a, &id, 1, 0).await.unwrap();
        gateway.submit_move(&b, &id, 1, 1).await.unwrap();
        let finished = gateway.submit_move(&a, &id, 2, 0).await.unwrap();

        assert_eq!(finished.phase, LifecyclePhase::Completed);
        assert_eq!(finished.session.winner, Some(Winner::Player(a)));

        // The bus saw the whole story: created, claimed, four non-terminal
        // moves, and the completion.
        let mut seen = Vec::new();
        while let Ok(Some(event)) = audit.try_recv() {
            seen.push(event);
        }
        assert_eq!(seen.len(), 7);
        assert!(matches!(seen.first(), Some(SessionEvent::SessionCreated { .. })));
        assert!(matches!(seen.get(1), Some(SessionEvent::SessionClaimed { .. })));
        assert!(matches!(seen.last(), Some(SessionEvent::SessionCompleted { .. })));

        use gd_01_session_store::SessionStoreApi;
        assert_eq!(container.store.len(), 1);
    }

    // =========================================================================
    // PRIVATE MATCHES
    // =========================================================================

    #[tokio::test]
    async fn private_matches_stay_off_the_public_queue() {
        let (gateway, _container) = arena_with(tiny_config());
        let host = PlayerId::new();
        let friend = PlayerId::new();
        let stranger = PlayerId::new();

        let private = gateway.create_private_match(&host).await.unwrap();
        let code = private.session.join_code.clone().unwrap();

        // A public search never claims the invite-only session.
        let public = gateway.find_match(&stranger).await.unwrap();
        assert_eq!(public.role, PlayerRole::Owner);
        assert_ne!(public.session.id, private.session.id);

        // A bad code finds nothing; the real one seats the friend.
        assert!(matches!(
            gateway.join_with_code(&friend, "ZZZZZZ").await,
            Err(ArenaError::NotFound(_))
        ));
        let joined = gateway.join_with_code(&friend, &code).await.unwrap();
        assert_eq!(joined.role, PlayerRole::Joiner);
        assert_eq!(joined.session.id, private.session.id);
        assert_eq!(
            gateway.session_state(&private.session.id).unwrap().phase,
            LifecyclePhase::Active
        );
    }

    // =========================================================================
    // POLL FALLBACK THROUGH THE REAL NOTIFIER
    // =========================================================================

    #[tokio::test]
    async fn silent_presence_stamps_reach_watchers_by_poll() {
        let mut config = tiny_config();
        config.notifier.poll_interval_ms = 25;
        config.notifier.poll_jitter_ms = 5;
        let (gateway, _container) = arena_with(config);
        let a = PlayerId::new();
        let b = PlayerId::new();

        let id = gateway.find_match(&a).await.unwrap().session.id;
        gateway.find_match(&b).await.unwrap();

        let mut watch = gateway.watch(&id).unwrap();
        let opening = watch.recv().await.unwrap();
        assert!(opening.disconnected_a.is_none());

        // Presence stamps publish nothing; only the poll loop can see them.
        gateway.report_disconnect(&id, &a).unwrap();
        let polled = timeout(Duration::from_secs(2), watch.recv())
            .await
            .expect("poll fallback never delivered the stamp")
            .unwrap();
        assert!(polled.disconnected_a.is_some());
        assert_eq!(LifecyclePhase::of(&polled), LifecyclePhase::Active);
    }

    // =========================================================================
    // LIVE RECLAMATION SWEEPER
    // =========================================================================

    #[tokio::test]
    async fn the_sweeper_retires_sessions_under_a_live_clock() {
        let mut config = tiny_config();
        config.lifecycle.grace_period_ms = 60;
        config.lifecycle.sweep_interval_ms = 10;
        config.lifecycle.waiting_ttl_ms = 150;
        let (gateway, container) = arena_with(config);
        tokio::spawn(container.lifecycle.sweeper(container.event_bus()).run());

        let a = PlayerId::new();
        let b = PlayerId::new();
        let id = gateway.find_match(&a).await.unwrap().session.id;
        gateway.find_match(&b).await.unwrap();

        let mut watch = gateway.watch(&id).unwrap();
        watch.recv().await.unwrap();

        // A vanishes and never comes back; the sweeper closes the session
        // and the watch stream ends on the terminal snapshot.
        gateway.report_disconnect(&id, &a).unwrap();
        let mut last = None;
        timeout(Duration::from_secs(2), async {
            while let Some(snapshot) = watch.recv().await {
                last = Some(snapshot);
            }
        })
        .await
        .expect("the sweeper never abandoned the session");
        let last = last.unwrap();
        assert_eq!(LifecyclePhase::of(&last), LifecyclePhase::Abandoned);
        assert_eq!(last.winner, None);
        assert_eq!(
            gateway.session_state(&id).unwrap().phase,
            LifecyclePhase::Abandoned
        );

        // A search nobody claims ages past its TTL and is reclaimed outright.
        let stale = gateway.find_match(&PlayerId::new()).await.unwrap();
        sleep(Duration::from_millis(400)).await;
        assert!(matches!(
            gateway.session_state(&stale.session.id),
            Err(ArenaError::NotFound(_))
        ));
    }
}
