#[macro_use]
extern crate criterion;

use criterion::{black_box, BenchmarkId, Criterion};
use std::time::Duration;
use stepwise_mcts::{Board, MCTSConfig, MCTS};

fn bench_mcts_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search");
    group.measurement_time(Duration::from_secs(10));

    // Whole searches, every step drained
    for &iter_count in &[100usize, 500, 1500] {
        let config = MCTSConfig::default()
            .with_iterations(iter_count)
            .with_seed(1);

        group.bench_with_input(
            BenchmarkId::new("iterations", iter_count),
            &iter_count,
            |b, &_| {
                b.iter(|| {
                    let mut mcts = MCTS::new(config.clone()).unwrap();
                    black_box(mcts.run().unwrap())
                })
            },
        );
    }

    // Mid-game positions have much smaller trees
    for start in ["XX-OO----", "XOX-O----", "XOXXOO---"] {
        let board: Board = start.parse().unwrap();
        let config = MCTSConfig::default()
            .with_start_state(board)
            .with_iterations(500)
            .with_seed(1);

        group.bench_with_input(BenchmarkId::new("start_state", start), &start, |b, &_| {
            b.iter(|| {
                let mut mcts = MCTS::new(config.clone()).unwrap();
                black_box(mcts.run().unwrap())
            })
        });
    }

    group.finish();
}

fn bench_single_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_steps");

    // Cost of one more iteration on an already grown tree, snapshots included
    for &grown in &[100usize, 1000] {
        group.bench_with_input(BenchmarkId::new("grown_tree", grown), &grown, |b, &grown| {
            b.iter_batched(
                || {
                    let mut mcts = MCTS::new(
                        MCTSConfig::default()
                            .with_iterations(grown + 1)
                            .with_seed(3),
                    )
                    .unwrap();
                    // Start plus four phases per grown iteration at most
                    for _ in 0..=(grown * 4) {
                        if mcts.step().unwrap().is_none() {
                            break;
                        }
                    }
                    mcts
                },
                |mut mcts| black_box(mcts.step().unwrap()),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mcts_search, bench_single_steps);
criterion_main!(benches);
