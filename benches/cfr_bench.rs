//! Benchmarks for CFR solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poker_cfr::cfr::{evaluate, CfrConfig, CfrSolver, StrategyProfile};
use poker_cfr::games::kuhn::KuhnPoker;
use poker_cfr::games::leduc::LeducHoldem;

fn kuhn_iteration_benchmark(c: &mut Criterion) {
    let game = KuhnPoker::new();
    let config = CfrConfig::default().with_seed(42);
    let mut solver = CfrSolver::new(game, config);

    c.bench_function("kuhn_single_iteration", |b| {
        b.iter(|| {
            solver.run_iteration();
            black_box(solver.iteration())
        })
    });
}

fn kuhn_1000_iterations_benchmark(c: &mut Criterion) {
    c.bench_function("kuhn_1000_iterations", |b| {
        b.iter(|| {
            let game = KuhnPoker::new();
            let config = CfrConfig::default().with_seed(42);
            let mut solver = CfrSolver::new(game, config);
            solver.train(black_box(1000)).game_value
        })
    });
}

fn leduc_iteration_benchmark(c: &mut Criterion) {
    let game = LeducHoldem::new();
    let config = CfrConfig::default().with_seed(42);
    let mut solver = CfrSolver::new(game, config);

    c.bench_function("leduc_single_iteration", |b| {
        b.iter(|| {
            solver.run_iteration();
            black_box(solver.iteration())
        })
    });
}

fn leduc_exploitability_benchmark(c: &mut Criterion) {
    let game = LeducHoldem::new();
    let profile = StrategyProfile::new();

    c.bench_function("leduc_exploitability_uniform", |b| {
        b.iter(|| evaluate::exploitability(black_box(&game), &profile))
    });
}

criterion_group!(
    benches,
    kuhn_iteration_benchmark,
    kuhn_1000_iterations_benchmark,
    leduc_iteration_benchmark,
    leduc_exploitability_benchmark
);
criterion_main!(benches);
