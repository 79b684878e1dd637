//! CFR (Counterfactual Regret Minimization) Solver Module.
//!
//! # Overview
//!
//! CFR is an iterative algorithm that converges to Nash equilibrium by:
//! 1. Computing counterfactual regret for each action at each decision point
//! 2. Updating strategies to minimize regret over time (regret matching)
//! 3. Averaging strategies across iterations to converge to equilibrium
//!
//! This module implements chance-sampling CFR: each iteration samples one deal
//! and walks the complete action tree beneath it.
//!
//! # Theory
//!
//! **Regret**: The difference between the value of an action and the value of the current strategy.
//! ```text
//! Regret(a) = Value(a) - Value(current_strategy)
//! ```
//!
//! **Regret Matching**: Set strategy proportional to positive regrets.
//! ```text
//! Strategy(a) = max(0, Regret(a)) / sum(max(0, Regret(a')))
//! ```
//!
//! # References
//!
//! - Zinkevich, M., et al. "Regret Minimization in Games with Incomplete Information" (2007)
//! - Neller, T., Lanctot, M. "An Introduction to Counterfactual Regret Minimization" (2013)

pub mod config;
pub mod evaluate;
pub mod game;
pub mod solver;
pub mod storage;
pub mod strategy;

// Re-export main types for convenient access
pub use config::{CfrConfig, CfrStats, ConfigError};
pub use game::{Action, Game, GameError, GameState, InfoState};
pub use solver::CfrSolver;
pub use storage::{regret_matching, Accumulator, InfoSetTable};
pub use strategy::{StrategyError, StrategyProfile};
