//! # Poker CFR
//!
//! A Counterfactual Regret Minimization (CFR) solver for small
//! imperfect-information card games: Kuhn poker and Leduc hold'em.
//!
//! ## Features
//!
//! - **Generic CFR Engine**: Works with any two-player game implementing the `Game` trait
//! - **Chance Sampling**: One deal is sampled per iteration, the action tree beneath it is walked exactly
//! - **Strategy Export**: Average strategies are written to a flat JSON file and played back
//! - **Exact Evaluation**: Expected value and exploitability by enumerating every deal
//!
//! ## Quick Start
//!
//! ```ignore
//! use poker_cfr::cfr::{CfrConfig, CfrSolver};
//! use poker_cfr::games::kuhn::KuhnPoker;
//!
//! let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default().with_seed(7));
//! let stats = solver.train(50_000);
//! println!("game value: {:.4}", stats.game_value);
//!
//! let profile = solver.export_strategy();
//! profile.save("strategy.json")?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   CFR Solver (Generic)                          │
//! │  - Regret matching        - Chance-sampled traversal            │
//! │  - Info-set table         - Strategy export / evaluation        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ implements Game trait
//!                               ▼
//!                  ┌────────────┴────────────┐
//!                  ▼                         ▼
//!             ┌─────────┐              ┌───────────┐
//!             │  Kuhn   │              │   Leduc   │
//!             │  Poker  │              │  Hold'em  │
//!             └─────────┘              └───────────┘
//! ```

#![warn(missing_docs)]

/// CFR (Counterfactual Regret Minimization) solver module.
///
/// Generic over the `Game` trait; contains no game-specific logic.
pub mod cfr;

/// Game implementations module.
pub mod games;

pub use cfr::{Action, CfrConfig, CfrSolver, CfrStats, Game, GameState, InfoState, StrategyProfile};
