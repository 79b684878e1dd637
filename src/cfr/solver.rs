//! Chance-sampling Counterfactual Regret Minimization solver.
//!
//! Each iteration samples one deal from the chance node and then walks the
//! complete action tree beneath it, updating regrets for both seats in a
//! single pass. The solver is generic over any game that implements the
//! `Game` trait and contains no game-specific logic.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cfr::config::{CfrConfig, CfrStats};
use crate::cfr::game::Game;
use crate::cfr::storage::InfoSetTable;
use crate::cfr::strategy::StrategyProfile;

/// The main CFR solver.
///
/// # Example
/// ```ignore
/// use poker_cfr::cfr::{CfrConfig, CfrSolver};
/// use poker_cfr::games::kuhn::KuhnPoker;
///
/// let mut solver = CfrSolver::new(KuhnPoker::new(), CfrConfig::default());
/// solver.train(10_000);
///
/// let strategy = solver.export_strategy();
/// ```
pub struct CfrSolver<G: Game> {
    /// The game being solved.
    game: G,

    /// Configuration for the solver.
    config: CfrConfig,

    /// Regret and strategy accumulators.
    table: InfoSetTable<G::InfoState>,

    /// Current iteration count.
    iteration: u64,

    /// Sum of root utilities for seat 0 over all iterations.
    utility_sum: f64,

    /// Statistics tracking.
    stats: CfrStats,

    /// Random number generator, used only for deal sampling.
    rng: StdRng,
}

impl<G: Game> CfrSolver<G> {
    /// Create a new CFR solver for the given game.
    pub fn new(game: G, config: CfrConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            game,
            config,
            table: InfoSetTable::new(),
            iteration: 0,
            utility_sum: 0.0,
            stats: CfrStats::new(),
            rng,
        }
    }

    /// Run one training iteration: sample a deal and traverse it.
    ///
    /// Returns the root utility for seat 0.
    pub fn run_iteration(&mut self) -> f64 {
        let deal = self.game.sample_deal(&mut self.rng);
        let utility = self.solve_deal(&deal);

        self.iteration += 1;
        self.utility_sum += utility;
        utility
    }

    /// Traverse the full action tree of one deal from the empty history.
    ///
    /// Deterministic given the deal and the current table. Returns the root
    /// utility for seat 0.
    pub fn solve_deal(&mut self, deal: &G::Deal) -> f64 {
        let root = self.game.initial_state(deal);
        let value = self.cfr(&root, [1.0, 1.0]);
        if self.game.current_player(&root) == 0 {
            value
        } else {
            -value
        }
    }

    /// Train the solver for a specified number of iterations.
    pub fn train(&mut self, iterations: u64) -> &CfrStats {
        self.train_with_callback(iterations, u64::MAX, |_| {})
    }

    /// Train using the iteration count and report interval from the configuration.
    ///
    /// `callback` runs every `report_interval` iterations.
    pub fn train_configured<F>(&mut self, mut callback: F) -> &CfrStats
    where
        F: FnMut(&CfrStats),
    {
        let iterations = self.config.iterations;
        let interval = self.config.report_interval;
        self.train_with_callback(iterations, interval, |stats| {
            log::debug!(
                "iteration {} | game value {:.5} | info sets {}",
                stats.iterations,
                stats.game_value,
                stats.info_sets
            );
            callback(stats);
        })
    }

    /// Train with a callback for progress tracking.
    ///
    /// # Arguments
    /// * `iterations` - Number of iterations to run
    /// * `callback_interval` - How often to call the callback
    /// * `callback` - Function called every `callback_interval` iterations
    pub fn train_with_callback<F>(
        &mut self,
        iterations: u64,
        callback_interval: u64,
        mut callback: F,
    ) -> &CfrStats
    where
        F: FnMut(&CfrStats),
    {
        let start_time = Instant::now();
        let interval = callback_interval.max(1);
        log::info!("training {} iterations", iterations);

        for i in 0..iterations {
            self.run_iteration();

            if (i + 1) % interval == 0 {
                self.update_stats(start_time);
                callback(&self.stats);
            }
        }

        self.update_stats(start_time);
        log::info!(
            "trained {} iterations in {:.2}s: game value {:.5}, {} info sets",
            self.stats.iterations,
            self.stats.elapsed_seconds,
            self.stats.game_value,
            self.stats.info_sets
        );

        &self.stats
    }

    fn update_stats(&mut self, start_time: Instant) {
        self.stats.iterations = self.iteration;
        self.stats.info_sets = self.table.len();
        self.stats.elapsed_seconds = start_time.elapsed().as_secs_f64();
        self.stats.game_value = self.game_value();
        self.stats.update_rate();
    }

    /// Core CFR recursion.
    ///
    /// Returns the utility of `state` for the seat named by
    /// `current_player(state)`. A child's value is negated when the child's
    /// seat is the opponent of this node's seat.
    fn cfr(&mut self, state: &G::State, reach: [f64; 2]) -> f64 {
        let player = self.game.current_player(state);

        if self.game.is_terminal(state) {
            return self.game.terminal_payoff(state, player);
        }

        let actions = self.game.legal_actions(state);
        let num_actions = actions.len();
        let info_state = self.game.info_state(state);

        let strategy = self
            .table
            .get_or_create(info_state.clone(), num_actions)
            .current_strategy(reach[player]);

        let mut action_utilities = vec![0.0; num_actions];
        for (i, action) in actions.iter().enumerate() {
            let next_state = self.game.apply_action(state, action);

            let mut next_reach = reach;
            next_reach[player] *= strategy[i];

            let value = self.cfr(&next_state, next_reach);
            action_utilities[i] = if self.game.current_player(&next_state) == player {
                value
            } else {
                -value
            };
        }

        let node_utility: f64 = strategy
            .iter()
            .zip(action_utilities.iter())
            .map(|(&s, &u)| s * u)
            .sum();

        let opponent_reach = reach[1 - player];
        self.table
            .get_or_create(info_state, num_actions)
            .accumulate_regrets(&action_utilities, node_utility, opponent_reach);

        node_utility
    }

    /// Running average of the root utility for seat 0.
    pub fn game_value(&self) -> f64 {
        if self.iteration == 0 {
            0.0
        } else {
            self.utility_sum / self.iteration as f64
        }
    }

    /// Average strategy for an information set, if it has been visited.
    pub fn average_strategy(&self, info_state: &G::InfoState) -> Option<Vec<f64>> {
        self.table.get(info_state).map(|record| record.average_strategy())
    }

    /// Normalize all accumulated strategies into an exported profile.
    pub fn export_strategy(&self) -> StrategyProfile {
        self.table.export_average_strategies()
    }

    /// Get the current iteration count.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Get the number of information sets discovered.
    pub fn num_info_sets(&self) -> usize {
        self.table.len()
    }

    /// Get reference to the information-set table.
    pub fn table(&self) -> &InfoSetTable<G::InfoState> {
        &self.table
    }

    /// Get reference to the game.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Reset the solver to initial state.
    pub fn reset(&mut self) {
        self.table = InfoSetTable::new();
        self.iteration = 0;
        self.utility_sum = 0.0;
        self.stats = CfrStats::new();
    }
}
