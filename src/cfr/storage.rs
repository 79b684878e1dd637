//! Storage for CFR regrets and strategies.
//!
//! The information-set table maps each information state to an
//! [`Accumulator`] holding cumulative regrets and cumulative strategy weights.
//! Records are created lazily the first time an information set is visited and
//! are never removed during a training run.

use rustc_hash::FxHashMap;

use crate::cfr::game::InfoState;
use crate::cfr::strategy::StrategyProfile;

/// Regret matching: strategy proportional to positive regrets.
///
/// Returns the uniform distribution if no regret is positive.
pub fn regret_matching(regrets: &[f64]) -> Vec<f64> {
    let positive: Vec<f64> = regrets.iter().map(|&r| r.max(0.0)).collect();
    let sum: f64 = positive.iter().sum();

    if sum > 0.0 {
        positive.iter().map(|&r| r / sum).collect()
    } else {
        uniform(regrets.len())
    }
}

pub(crate) fn uniform(num_actions: usize) -> Vec<f64> {
    vec![1.0 / num_actions as f64; num_actions]
}

/// Per-information-set accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    /// Cumulative counterfactual regret per action. May go negative.
    regret_sum: Vec<f64>,
    /// Cumulative reach-weighted strategy per action. Only increases.
    strategy_sum: Vec<f64>,
}

impl Accumulator {
    /// Create a zeroed accumulator for `num_actions` actions.
    pub fn new(num_actions: usize) -> Self {
        Self {
            regret_sum: vec![0.0; num_actions],
            strategy_sum: vec![0.0; num_actions],
        }
    }

    /// Number of actions at this information set.
    pub fn num_actions(&self) -> usize {
        self.regret_sum.len()
    }

    /// Cumulative regrets.
    pub fn regret_sum(&self) -> &[f64] {
        &self.regret_sum
    }

    /// Cumulative strategy weights.
    pub fn strategy_sum(&self) -> &[f64] {
        &self.strategy_sum
    }

    /// Current strategy by regret matching.
    ///
    /// Adds `reach_weight * strategy` into the strategy sum, so this must be
    /// called exactly once per visit.
    pub fn current_strategy(&mut self, reach_weight: f64) -> Vec<f64> {
        let strategy = regret_matching(&self.regret_sum);
        for (sum, &prob) in self.strategy_sum.iter_mut().zip(strategy.iter()) {
            *sum += reach_weight * prob;
        }
        strategy
    }

    /// Add `opponent_reach * (utility[a] - node_utility)` to each regret.
    pub fn accumulate_regrets(
        &mut self,
        action_utilities: &[f64],
        node_utility: f64,
        opponent_reach: f64,
    ) {
        debug_assert_eq!(action_utilities.len(), self.regret_sum.len());
        for (regret, &utility) in self.regret_sum.iter_mut().zip(action_utilities.iter()) {
            *regret += opponent_reach * (utility - node_utility);
        }
    }

    /// Average strategy (Nash equilibrium approximation).
    ///
    /// Uniform if the strategy sum is zero.
    pub fn average_strategy(&self) -> Vec<f64> {
        let total: f64 = self.strategy_sum.iter().sum();
        if total > 0.0 {
            self.strategy_sum.iter().map(|&s| s / total).collect()
        } else {
            uniform(self.strategy_sum.len())
        }
    }
}

/// Information-set table keyed by the game's information state type.
#[derive(Debug, Clone)]
pub struct InfoSetTable<K: InfoState> {
    records: FxHashMap<K, Accumulator>,
}

impl<K: InfoState> Default for InfoSetTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: InfoState> InfoSetTable<K> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            records: FxHashMap::default(),
        }
    }

    /// Get the accumulator for `key`, creating a zeroed one on first visit.
    pub fn get_or_create(&mut self, key: K, num_actions: usize) -> &mut Accumulator {
        let record = self.records.entry(key).or_insert_with_key(|key| {
            log::trace!("new information set {}", key.key());
            Accumulator::new(num_actions)
        });
        debug_assert_eq!(
            record.num_actions(),
            num_actions,
            "action count mismatch for information set"
        );
        record
    }

    /// Get the accumulator for `key` if it has been visited.
    pub fn get(&self, key: &K) -> Option<&Accumulator> {
        self.records.get(key)
    }

    /// Number of information sets stored.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no information set has been visited.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all information sets and their accumulators.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Accumulator)> {
        self.records.iter()
    }

    /// Normalize every strategy sum into an exported profile.
    pub fn export_average_strategies(&self) -> StrategyProfile {
        self.records
            .iter()
            .map(|(key, record)| (key.key(), record.average_strategy()))
            .collect()
    }
}
