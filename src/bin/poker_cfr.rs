//! Train and play Kuhn poker and Leduc Hold'em.
//!
//! Usage:
//!   poker_cfr train --game kuhn --iterations 50000 --seed 42 --output kuhn.json
//!   poker_cfr play --game leduc --strategy leduc.json
//!
//! Set `RUST_LOG=debug` for periodic training progress and playback fallbacks.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;

use poker_cfr::cfr::{evaluate, Action, CfrConfig, CfrSolver, Game, InfoState, StrategyProfile};
use poker_cfr::games::kuhn::KuhnPoker;
use poker_cfr::games::leduc::LeducHoldem;

#[derive(Parser)]
#[command(name = "poker_cfr")]
#[command(about = "Chance-sampling CFR for Kuhn poker and Leduc Hold'em")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a strategy and optionally write it to a JSON file
    Train {
        /// Game variant
        #[arg(short, long, value_enum, default_value = "kuhn")]
        game: GameKind,
        /// Number of iterations (overrides config)
        #[arg(short, long)]
        iterations: Option<u64>,
        /// Random seed (overrides config)
        #[arg(short, long)]
        seed: Option<u64>,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Strategy output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Play against a trained strategy as seat 0
    Play {
        /// Game variant
        #[arg(short, long, value_enum, default_value = "kuhn")]
        game: GameKind,
        /// Strategy file written by `train`
        #[arg(long)]
        strategy: PathBuf,
        /// Random seed for deals and bot actions
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameKind {
    Kuhn,
    Leduc,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train {
            game,
            iterations,
            seed,
            config,
            output,
        } => {
            let mut cfr_config = match config {
                Some(path) => CfrConfig::from_json_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => CfrConfig::default(),
            };
            if let Some(iterations) = iterations {
                cfr_config.iterations = iterations;
            }
            if let Some(seed) = seed {
                cfr_config.seed = Some(seed);
            }
            cfr_config.validate()?;

            match game {
                GameKind::Kuhn => run_train(KuhnPoker::new(), cfr_config, output.as_deref()),
                GameKind::Leduc => run_train(LeducHoldem::new(), cfr_config, output.as_deref()),
            }
        }
        Commands::Play {
            game,
            strategy,
            seed,
        } => {
            let profile = StrategyProfile::load(&strategy)
                .with_context(|| format!("loading strategy {}", strategy.display()))?;
            log::info!("loaded {} information sets from {}", profile.len(), strategy.display());

            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            match game {
                GameKind::Kuhn => run_play(KuhnPoker::new(), &profile, rng),
                GameKind::Leduc => run_play(LeducHoldem::new(), &profile, rng),
            }
        }
    }
}

fn run_train<G: Game>(game: G, config: CfrConfig, output: Option<&Path>) -> Result<()> {
    let bar = ProgressBar::new(config.iterations);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut solver = CfrSolver::new(game, config);
    let stats = solver
        .train_configured(|stats| {
            bar.set_position(stats.iterations);
            bar.set_message(format!("value {:+.4}", stats.game_value));
        })
        .clone();
    bar.finish_and_clear();

    let profile = solver.export_strategy();
    let exploitability = evaluate::exploitability(solver.game(), &profile);

    println!("Average game value: {:.5}", stats.game_value);
    println!("Information sets:   {}", stats.info_sets);
    println!("Exploitability:     {:.5}", exploitability);
    println!("Speed:              {:.0} iterations/second", stats.iterations_per_second);
    println!();
    print_profile(&profile);

    if let Some(path) = output {
        profile
            .save(path)
            .with_context(|| format!("writing strategy {}", path.display()))?;
        println!();
        println!("Strategy saved to {}", path.display());
    }

    Ok(())
}

fn print_profile(profile: &StrategyProfile) {
    let width = profile.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, probs) in profile.iter() {
        let cells: Vec<String> = probs.iter().map(|p| format!("{:.3}", p)).collect();
        println!("{:<width$}  {}", key, cells.join("  "), width = width);
    }
}

fn run_play<G: Game>(game: G, profile: &StrategyProfile, mut rng: StdRng) -> Result<()> {
    let mut total = 0.0;
    let mut hands = 0u32;

    loop {
        let deal = game.sample_deal(&mut rng);
        let mut state = game.initial_state(&deal);

        while !game.is_terminal(&state) {
            state = if game.current_player(&state) == 0 {
                prompt_action(&game, &state)?
            } else {
                let action = profile.sample_action(&game, &state, &mut rng);
                println!("Bot: {}", game.action_name(&action));
                game.apply_action(&state, &action)
            };
        }

        let payoff = game.terminal_payoff(&state, 0);
        total += payoff;
        hands += 1;
        println!("Hand over: {}", game.state_description(&state));
        println!(
            "You {} {:.1} | total {:+.1} over {} hands",
            outcome_verb(payoff),
            payoff.abs(),
            total,
            hands
        );

        if !Confirm::new()
            .with_prompt("Play another hand?")
            .default(true)
            .interact()?
        {
            break;
        }
    }

    Ok(())
}

fn prompt_action<G: Game>(game: &G, state: &G::State) -> Result<G::State> {
    let actions = game.legal_actions(state);
    let choices: Vec<String> = actions
        .iter()
        .map(|a| format!("{}={}", a.symbol(), game.action_name(a)))
        .collect();
    println!("{}", turn_summary(game, state));

    loop {
        let input: String = Input::new()
            .with_prompt(format!("Action [{}]", choices.join(", ")))
            .interact_text()?;

        let mut symbols = input.trim().chars();
        let result = match (symbols.next(), symbols.next()) {
            (Some(symbol), None) => game.apply_symbol(state, symbol),
            _ => {
                println!("Enter a single action symbol");
                continue;
            }
        };
        match result {
            Ok(next) => return Ok(next),
            Err(err) => println!("{}", err),
        }
    }
}

/// What seat 0 can see: its information set and the pot.
fn turn_summary<G: Game>(game: &G, state: &G::State) -> String {
    format!("You see: {} | pot {}", game.info_state(state).key(), game.pot(state))
}

fn outcome_verb(payoff: f64) -> &'static str {
    if payoff > 0.0 {
        "won"
    } else if payoff < 0.0 {
        "lost"
    } else {
        "tied"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_cfr::games::cards::Rank;
    use poker_cfr::games::leduc::LeducDeal;

    #[test]
    fn test_turn_summary_shows_pot() {
        let game = KuhnPoker::new();
        let state = game.initial_state(&[Rank::Queen, Rank::King]);
        assert_eq!(turn_summary(&game, &state), "You see: Q | pot 2");

        let game = LeducHoldem::new();
        let deal = LeducDeal {
            cards: [Rank::Jack, Rank::Queen],
            board: Rank::King,
        };
        let state = "krc"
            .chars()
            .try_fold(game.initial_state(&deal), |state, symbol| game.apply_symbol(&state, symbol))
            .unwrap();
        assert_eq!(turn_summary(&game, &state), "You see: J|K|krc/ | pot 4");
    }
}
