//! Scorer throughput benchmarks.
//!
//! Every point clones the live match onto the undo stack, so the cost of a
//! point grows with the number of sets played. These benchmarks track that
//! cost along with undo and history encoding.
//!
//! Run with: `cargo bench --bench scoring_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use padel_engine::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A scorer that has already played `sets` full sets.
fn scorer_after_sets(sets: usize) -> ScoreManager<MemoryStore> {
    let mut scorer = ScoreManager::with_store(MemoryStore::new());
    for i in 0..sets * 24 {
        let team = if (i / 24) % 2 == 0 { Team::One } else { Team::Two };
        scorer.increment_point(team);
    }
    scorer
}

/// A rally pattern that reaches deuce and tiebreaks regularly.
fn rally(i: usize) -> Team {
    if (i * 7 + i / 3) % 2 == 0 {
        Team::One
    } else {
        Team::Two
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_increment_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("increment_point");
    for sets in [0usize, 5, 20] {
        group.bench_with_input(BenchmarkId::from_parameter(sets), &sets, |b, &sets| {
            let base = scorer_after_sets(sets);
            b.iter_batched(
                || base.current_match().clone(),
                |mut m| {
                    black_box(m.increment_point(
                        Team::One,
                        ScoringMode::GoldenPoint,
                        MatchFormat::OPEN,
                    ))
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_full_match(c: &mut Criterion) {
    c.bench_function("best_of_three_with_undo", |b| {
        b.iter(|| {
            let mut scorer = ScoreManager::new(
                MemoryStore::new(),
                EngineConfig {
                    format: MatchFormat::BEST_OF_THREE,
                    ..Default::default()
                },
            );
            let mut i = 0;
            while !scorer.current_match().is_completed() {
                scorer.increment_point(rally(i));
                if i % 11 == 0 {
                    scorer.undo();
                }
                i += 1;
            }
            black_box(scorer.history().len())
        });
    });
}

fn bench_history_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_encode");
    for entries in [10usize, 100] {
        let mut history = MatchHistory::new();
        for _ in 0..entries {
            let mut m = scorer_after_sets(3).current_match().clone();
            m.stop();
            history.archive(m);
        }
        group.bench_with_input(BenchmarkId::from_parameter(entries), &history, |b, h| {
            b.iter(|| black_box(h.encode()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_increment_point,
    bench_full_match,
    bench_history_encode
);
criterion_main!(benches);
