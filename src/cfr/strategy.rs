//! Exported strategies and playback.
//!
//! A [`StrategyProfile`] maps serialized information-set keys to normalized
//! probability vectors in the game's canonical action order. It is written as
//! a flat JSON object:
//!
//! ```text
//! {
//!   "J": [0.79, 0.21],
//!   "Jb": [1.0, 0.0],
//!   ...
//! }
//! ```
//!
//! Lookups never fail: a missing or malformed entry falls back to the uniform
//! distribution over the legal actions.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cfr::game::{Game, InfoState};
use crate::cfr::storage::uniform;

/// Errors raised while reading or writing a strategy file.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// File could not be opened, read or written.
    #[error("strategy file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not a valid strategy object.
    #[error("strategy file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Average strategy for every information set, keyed by serialized key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyProfile {
    entries: BTreeMap<String, Vec<f64>>,
}

impl StrategyProfile {
    /// Create an empty profile. Every lookup on it is uniform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a profile from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StrategyError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the profile as pretty JSON, keys sorted.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StrategyError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: String, probabilities: Vec<f64>) {
        self.entries.insert(key, probabilities);
    }

    /// Raw stored entry, if any.
    pub fn get(&self, key: &str) -> Option<&Vec<f64>> {
        self.entries.get(key)
    }

    /// Number of stored information sets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<f64>)> {
        self.entries.iter()
    }

    /// Probability vector for `key` with `num_actions` entries.
    ///
    /// Entries with the wrong length, negative or non-finite values, or a zero
    /// sum are treated as absent. Stored vectors are renormalized.
    pub fn probabilities(&self, key: &str, num_actions: usize) -> Vec<f64> {
        match self.entries.get(key) {
            Some(probs) if is_well_formed(probs, num_actions) => {
                let total: f64 = probs.iter().sum();
                probs.iter().map(|&p| p / total).collect()
            }
            Some(probs) => {
                log::debug!("malformed entry for {}: {:?}, playing uniform", key, probs);
                uniform(num_actions)
            }
            None => {
                log::debug!("no entry for {}, playing uniform", key);
                uniform(num_actions)
            }
        }
    }

    /// Probability vector for the seat to act in `state`.
    pub fn strategy_at<G: Game>(&self, game: &G, state: &G::State) -> Vec<f64> {
        let num_actions = game.legal_actions(state).len();
        self.probabilities(&game.info_state(state).key(), num_actions)
    }

    /// Sample a legal action for the seat to act in `state`.
    ///
    /// # Panics
    /// Panics if `state` is terminal.
    pub fn sample_action<G: Game, R: Rng + ?Sized>(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut R,
    ) -> G::Action {
        let actions = game.legal_actions(state);
        assert!(!actions.is_empty(), "sample_action called on a terminal state");

        let probs = self.probabilities(&game.info_state(state).key(), actions.len());
        let index = match WeightedIndex::new(&probs) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.gen_range(0..actions.len()),
        };
        actions[index].clone()
    }
}

impl FromIterator<(String, Vec<f64>)> for StrategyProfile {
    fn from_iter<T: IntoIterator<Item = (String, Vec<f64>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn is_well_formed(probs: &[f64], num_actions: usize) -> bool {
    probs.len() == num_actions
        && probs.iter().all(|p| p.is_finite() && *p >= 0.0)
        && probs.iter().sum::<f64>() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::cards::Rank;
    use crate::games::kuhn::{KuhnAction, KuhnPoker};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_missing_and_malformed_entries_fall_back_to_uniform() {
        let mut profile = StrategyProfile::new();
        profile.insert("short".to_string(), vec![1.0]);
        profile.insert("negative".to_string(), vec![-0.5, 1.5]);
        profile.insert("zero".to_string(), vec![0.0, 0.0]);
        profile.insert("ok".to_string(), vec![1.0, 3.0]);

        assert_eq!(profile.probabilities("absent", 2), vec![0.5, 0.5]);
        assert_eq!(profile.probabilities("short", 2), vec![0.5, 0.5]);
        assert_eq!(profile.probabilities("negative", 2), vec![0.5, 0.5]);
        assert_eq!(profile.probabilities("zero", 2), vec![0.5, 0.5]);
        assert_eq!(profile.probabilities("ok", 2), vec![0.25, 0.75]);
    }

    #[test]
    fn test_save_load_preserves_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strategy.json");

        let profile: StrategyProfile = vec![
            ("K".to_string(), vec![0.0, 1.0]),
            ("Jpb".to_string(), vec![1.0, 0.0]),
        ]
        .into_iter()
        .collect();
        profile.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"Jpb\""));

        let loaded = StrategyProfile::load(&path).unwrap();
        assert_eq!(loaded, profile);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(StrategyProfile::load(&path), Err(StrategyError::Json(_))));

        let missing = dir.path().join("missing.json");
        assert!(matches!(StrategyProfile::load(&missing), Err(StrategyError::Io(_))));
    }

    #[test]
    fn test_sample_action_follows_pure_strategy() {
        let game = KuhnPoker::new();
        let state = game.initial_state(&[Rank::King, Rank::Jack]);

        let mut profile = StrategyProfile::new();
        profile.insert("K".to_string(), vec![0.0, 1.0]);

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(profile.sample_action(&game, &state, &mut rng), KuhnAction::Bet);
        }
    }

    #[test]
    fn test_sample_action_uniform_fallback_covers_all_actions() {
        let game = KuhnPoker::new();
        let state = game.initial_state(&[Rank::Queen, Rank::Jack]);
        let profile = StrategyProfile::new();

        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 2];
        for _ in 0..200 {
            match profile.sample_action(&game, &state, &mut rng) {
                KuhnAction::Pass => seen[0] = true,
                KuhnAction::Bet => seen[1] = true,
            }
        }
        assert_eq!(seen, [true, true]);
    }
}
