//! # Grid-Duel Subsystem Benchmarks
//!
//! Performance validation for the hot paths:
//!
//! | Subsystem | Claim | Target |
//! |-----------|-------|--------|
//! | gd-01 Session Store | O(1) guarded lookup/update | < 5µs |
//! | gd-01 Session Store | FIFO head scan is the only O(n) read | linear |
//! | gd-02 Matchmaker | open + claim round trip | < 50µs |
//! | gd-03 Turn Engine | win scan bounded by win length, not board | flat |
//! | shared-bus | fan-out cost linear in subscriber count | < 1µs/sub |

// Allow excessive nesting in benchmark code
#![allow(clippy::excessive_nesting)]

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use gd_01_session_store::{
    InMemorySessionStore, SessionDraft, SessionGuard, SessionPatch, SessionStoreApi, StoreConfig,
};
use gd_02_matchmaker::{MatchmakerApi, MatchmakerConfig, MatchmakerDependencies, MatchmakerService};
use gd_03_turn_engine::Ruleset;
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, SessionEvent};
use shared_types::clock::SystemTimeSource;
use shared_types::entities::{Board, PlayerId, PlayerMark};

fn fresh_store(capacity: usize) -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::with_config(
        StoreConfig {
            max_sessions: capacity,
        },
        Arc::new(SystemTimeSource),
    ))
}

fn draft() -> SessionDraft {
    SessionDraft::new(PlayerId::new(), 9, 120_000)
}

// ============================================================================
// GD-01: Session Store Benchmarks
// Guarded lookups and updates are O(1); the FIFO head scan is O(n)
// ============================================================================

fn bench_session_store_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-01-session-store");
    group.measurement_time(Duration::from_secs(10));

    // Guarded update on one hot record. Every accepted write bumps the
    // revision, so the guard is re-evaluated from scratch each pass.
    group.bench_function("guarded_update_hot_record", |b| {
        let store = fresh_store(64);
        let id = store.create(draft()).unwrap().id;
        let guard = SessionGuard::any();
        let mut stamp = 0u64;

        b.iter(|| {
            stamp += 1;
            let patch = SessionPatch::new().with_turn_started_at(stamp);
            black_box(store.conditional_update(&id, &guard, patch).unwrap())
        })
    });

    // Point lookups should not feel the size of the map.
    let record_counts = [100, 10_000];
    for count in record_counts {
        let store = fresh_store(count * 2);
        let ids: Vec<_> = (0..count)
            .map(|_| store.create(draft()).unwrap().id)
            .collect();
        let mut rng = rand::thread_rng();

        group.bench_with_input(BenchmarkId::new("lookup_by_id", count), &store, |b, s| {
            b.iter(|| {
                let idx = rng.gen_range(0..ids.len());
                black_box(s.get(&ids[idx]).unwrap())
            })
        });
    }

    // The matchmaking queue head: a full scan for the oldest open search.
    for count in [100, 1_000, 10_000] {
        let store = fresh_store(count * 2);
        for _ in 0..count {
            store.create(draft()).unwrap();
        }
        let outsider = PlayerId::new();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("fifo_head_scan", count), &store, |b, s| {
            b.iter(|| black_box(s.oldest_claimable(&outsider)))
        });
    }

    group.finish();
}

// ============================================================================
// GD-02: Matchmaker Benchmarks
// The open + claim round trip is the pairing hot path
// ============================================================================

fn bench_matchmaker_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-02-matchmaker");
    group.measurement_time(Duration::from_secs(10));

    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = fresh_store(1024);
    let bus = Arc::new(InMemoryEventBus::new());
    let matchmaker = MatchmakerService::new(MatchmakerDependencies {
        store: store.clone(),
        bus,
        config: MatchmakerConfig::default(),
    });

    // One full pairing: A opens a search, B claims the seat. The record is
    // deleted afterwards so the queue stays flat across iterations.
    group.bench_function("open_and_claim_pair", |b| {
        b.iter(|| {
            rt.block_on(async {
                let first = PlayerId::new();
                let second = PlayerId::new();
                let ticket = matchmaker.request_match(&first).await.unwrap();
                black_box(matchmaker.request_match(&second).await.unwrap());
                store
                    .delete(&ticket.session.id, &SessionGuard::any())
                    .unwrap();
            })
        })
    });

    // A search that never finds an opponent: open, then cancel.
    group.bench_function("open_then_cancel", |b| {
        b.iter(|| {
            rt.block_on(async {
                let player = PlayerId::new();
                let ticket = matchmaker.request_match(&player).await.unwrap();
                black_box(
                    matchmaker
                        .cancel_match(&player, &ticket.session.id)
                        .await
                        .unwrap(),
                );
            })
        })
    });

    group.finish();
}

// ============================================================================
// GD-03: Turn Engine Benchmarks
// The win scan walks four axes through the new cell, bounded by win length
// ============================================================================

fn bench_win_scan_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("gd-03-win-scan");
    group.measurement_time(Duration::from_secs(10));

    // Board size should not matter: the scan never leaves the neighborhood
    // of the placed cell.
    for size in [9u8, 15, 25] {
        let rules = Ruleset {
            board_size: size,
            win_length: 5,
            initial_time_ms: 120_000,
        };

        let mut winning = Board::new(size);
        for i in 0..5u8 {
            winning.place(i, i, PlayerMark::A);
        }
        group.bench_with_input(
            BenchmarkId::new("win_scan_hit", size),
            &winning,
            |b, board| b.iter(|| black_box(rules.is_winning_move(board, 4, 4, PlayerMark::A))),
        );

        let mut lonely = Board::new(size);
        lonely.place(size / 2, size / 2, PlayerMark::A);
        group.bench_with_input(
            BenchmarkId::new("win_scan_miss", size),
            &lonely,
            |b, board| {
                b.iter(|| black_box(rules.is_winning_move(board, size / 2, size / 2, PlayerMark::A)))
            },
        );
    }

    // Draw detection walks the whole board.
    for size in [9u8, 25] {
        let rules = Ruleset {
            board_size: size,
            win_length: 5,
            initial_time_ms: 120_000,
        };
        let mut full = Board::new(size);
        for y in 0..size {
            for x in 0..size {
                let mark = if (x + y) % 2 == 0 {
                    PlayerMark::A
                } else {
                    PlayerMark::B
                };
                full.place(x, y, mark);
            }
        }

        group.throughput(Throughput::Elements(size as u64 * size as u64));
        group.bench_with_input(BenchmarkId::new("draw_scan_full", size), &full, |b, board| {
            b.iter(|| black_box(rules.is_draw(board)))
        });
    }

    group.finish();
}

// ============================================================================
// Shared Bus Benchmarks
// Publish cost grows with the number of matching subscribers
// ============================================================================

fn bench_event_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-bus-fan-out");
    group.measurement_time(Duration::from_secs(10));

    let rt = tokio::runtime::Runtime::new().unwrap();
    let store = fresh_store(16);
    let session = store.create(draft()).unwrap();

    for subscribers in [1usize, 8, 64] {
        let bus = InMemoryEventBus::new();
        let _handles: Vec<_> = (0..subscribers)
            .map(|_| bus.subscribe(EventFilter::all()))
            .collect();
        let event = SessionEvent::SessionCreated {
            session: session.clone(),
        };

        group.throughput(Throughput::Elements(subscribers as u64));
        group.bench_with_input(
            BenchmarkId::new("publish", subscribers),
            &bus,
            |b, bus| {
                b.iter(|| rt.block_on(async { black_box(bus.publish(event.clone()).await) }))
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_session_store_operations,
    bench_matchmaker_operations,
    bench_win_scan_operations,
    bench_event_fan_out,
);

criterion_main!(benches);
