//! Debug script for Kuhn Poker CFR

use poker_cfr::cfr::{evaluate, CfrConfig, CfrSolver};
use poker_cfr::games::kuhn::{KuhnPoker, KUHN_GAME_VALUE};

fn main() {
    let game = KuhnPoker::new();
    let config = CfrConfig::default().with_seed(42);
    let mut solver = CfrSolver::new(game, config);

    for i in 1..=10 {
        solver.train(10_000);
        let profile = solver.export_strategy();

        println!("After {} iterations:", i * 10_000);
        for key in ["J", "Q", "K"] {
            let probs = profile.probabilities(key, 2);
            println!("  P1 {} (root):      Pass={:.3}, Bet={:.3}", key, probs[0], probs[1]);
        }
        for key in ["Jb", "Qb", "Kb"] {
            let probs = profile.probabilities(key, 2);
            println!("  P2 {} facing bet: Fold={:.3}, Call={:.3}", &key[..1], probs[0], probs[1]);
        }
        println!(
            "  Game value: {:.4} (equilibrium {:.4}), exploitability: {:.4}",
            solver.game_value(),
            KUHN_GAME_VALUE,
            evaluate::exploitability(solver.game(), &profile)
        );
        println!();
    }

    println!("Total info sets: {}", solver.num_info_sets());

    println!("\nExpected Nash Equilibrium (one member of the family):");
    println!("  P1 Jack:  Pass=0.667, Bet=0.333 (bluff 1/3)");
    println!("  P1 Queen: Pass=1.000, Bet=0.000");
    println!("  P1 King:  Pass=0.000, Bet=1.000");
    println!("  P2 Jack vs bet:  Fold=1.000, Call=0.000");
    println!("  P2 Queen vs bet: Fold=0.667, Call=0.333");
    println!("  P2 King vs bet:  Fold=0.000, Call=1.000");
}
