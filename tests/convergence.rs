//! Training convergence on both game variants.

use poker_cfr::cfr::{evaluate, CfrConfig, CfrSolver, StrategyProfile};
use poker_cfr::games::kuhn::{KuhnPoker, KUHN_GAME_VALUE};
use poker_cfr::games::leduc::LeducHoldem;

#[test]
fn kuhn_game_value_approaches_equilibrium() {
    let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default().with_seed(42));
    let stats = solver.train(50_000).clone();

    assert_eq!(stats.iterations, 50_000);
    assert_eq!(stats.info_sets, 12);
    assert!(
        (stats.game_value - KUHN_GAME_VALUE).abs() < 0.02,
        "game value {} too far from {}",
        stats.game_value,
        KUHN_GAME_VALUE
    );

    let profile = solver.export_strategy();
    let exploitability = evaluate::exploitability(solver.game(), &profile);
    assert!(exploitability < 0.03, "exploitability {}", exploitability);
    assert!((evaluate::expected_value(solver.game(), &profile) - KUHN_GAME_VALUE).abs() < 0.03);
}

#[test]
fn kuhn_exploitability_decreases_with_training() {
    let game = KuhnPoker::new();
    let uniform = evaluate::exploitability(&game, &StrategyProfile::new());

    let mut solver = CfrSolver::new(game, CfrConfig::default().with_seed(7));
    solver.train(1_000);
    let early = evaluate::exploitability(solver.game(), &solver.export_strategy());
    solver.train(19_000);
    let late = evaluate::exploitability(solver.game(), &solver.export_strategy());

    assert!(early < uniform);
    assert!(late < early, "late {} >= early {}", late, early);
}

#[test]
fn leduc_training_beats_uniform_play() {
    let game = LeducHoldem::new();
    let uniform = evaluate::exploitability(&game, &StrategyProfile::new());

    let mut solver = CfrSolver::new(game, CfrConfig::default().with_seed(42));
    solver.train(20_000);

    // 12 round-one sets plus 4 nodes x 9 (card, board) pairs after each of kk, krc, rc
    assert_eq!(solver.num_info_sets(), 120);

    let trained = evaluate::exploitability(solver.game(), &solver.export_strategy());
    assert!(
        trained < 0.5 * uniform,
        "trained {} vs uniform {}",
        trained,
        uniform
    );
}
