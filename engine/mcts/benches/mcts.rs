//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying iteration counts
//! - Search from different TicTacToe positions (opening, midgame, near-terminal)
//! - Game comparison (TicTacToe vs Blackjack vs Balatro)
//! - Single rollouts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::Game;
use games_balatro::Balatro;
use games_blackjack::Blackjack;
use games_tictactoe::{State, TicTacToe};
use mcts::{rollout, run_mcts, MctsConfig, UniformRollout};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");
    let game = TicTacToe::new();

    for iterations in [50u32, 100, 200, 500, 1000, 2000] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("tictactoe", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::default().with_iterations(iterations);
                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    black_box(run_mcts(&game, config.clone(), State::new(), &mut rng).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_mcts_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_positions");
    let game = TicTacToe::new();
    let config = MctsConfig::default();

    let positions = [
        ("opening", "... ... ..."),
        ("midgame", "X.. .O. ..X"),
        ("near_terminal", "XO. XO. ..."),
    ];

    for (name, diagram) in positions {
        let state = State::from_diagram(diagram).unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(run_mcts(&game, config.clone(), state.clone(), &mut rng).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_game_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_comparison");
    let config = MctsConfig::default().with_iterations(500);

    group.bench_function("tictactoe", |b| {
        let game = TicTacToe::new();
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let state = game.start(&mut rng);
            black_box(run_mcts(&game, config.clone(), state, &mut rng).unwrap())
        });
    });

    group.bench_function("blackjack", |b| {
        let game = Blackjack::new();
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let state = game.start(&mut rng);
            black_box(run_mcts(&game, config.clone(), state, &mut rng).unwrap())
        });
    });

    // Wide root (300+ actions); fewer samples keep the run short
    group.sample_size(10);
    group.bench_function("balatro", |b| {
        let game = Balatro::new();
        b.iter(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            let state = game.start(&mut rng);
            black_box(run_mcts(&game, config.clone(), state, &mut rng).unwrap())
        });
    });

    group.finish();
}

// =============================================================================
// Rollout Benchmarks
// =============================================================================

fn bench_rollout(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollout");

    group.bench_function("tictactoe", |b| {
        let game = TicTacToe::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let start = game.start(&mut rng);
        b.iter(|| black_box(rollout(&game, &UniformRollout, &start, &mut rng).unwrap()));
    });

    group.bench_function("balatro", |b| {
        let game = Balatro::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let start = game.start(&mut rng);
        b.iter(|| black_box(rollout(&game, &UniformRollout, &start, &mut rng).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_mcts_positions,
    bench_game_comparison,
    bench_rollout,
);
criterion_main!(benches);
