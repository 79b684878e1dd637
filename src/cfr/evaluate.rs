//! Exact evaluation of strategy profiles.
//!
//! Every function here enumerates [`Game::deals`] instead of sampling, so the
//! results are exact for the given profile. Profiles are looked up through
//! [`StrategyProfile::strategy_at`], which means information sets missing
//! from the profile are played uniformly.
//!
//! The best response walks the action tree once per public history, carrying
//! every deal that is still consistent with it. At the responder's nodes those
//! deals are grouped by information state and each group commits to the
//! action with the highest reach-weighted value.

use rustc_hash::FxHashMap;

use crate::cfr::game::Game;
use crate::cfr::strategy::StrategyProfile;

/// Expected payoff for seat 0 when both seats follow `profile`.
pub fn expected_value<G: Game>(game: &G, profile: &StrategyProfile) -> f64 {
    game.deals()
        .iter()
        .map(|(deal, probability)| {
            probability * profile_value(game, profile, &game.initial_state(deal), 0)
        })
        .sum()
}

/// Value `player` gets by best-responding to the other seat playing `profile`.
pub fn best_response_value<G: Game>(game: &G, profile: &StrategyProfile, player: usize) -> f64 {
    let (states, weights): (Vec<G::State>, Vec<f64>) = game
        .deals()
        .into_iter()
        .map(|(deal, probability)| (game.initial_state(&deal), probability))
        .unzip();

    let values = best_response(game, profile, player, &states, &weights);
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}

/// Mean of the two best-response values. Zero exactly at a Nash equilibrium.
pub fn exploitability<G: Game>(game: &G, profile: &StrategyProfile) -> f64 {
    let br0 = best_response_value(game, profile, 0);
    let br1 = best_response_value(game, profile, 1);
    log::debug!("best responses: seat 0 {:.6}, seat 1 {:.6}", br0, br1);
    (br0 + br1) / 2.0
}

fn profile_value<G: Game>(
    game: &G,
    profile: &StrategyProfile,
    state: &G::State,
    player: usize,
) -> f64 {
    if game.is_terminal(state) {
        return game.terminal_payoff(state, player);
    }

    let actions = game.legal_actions(state);
    let probs = profile.strategy_at(game, state);
    actions
        .iter()
        .zip(probs)
        .filter(|(_, p)| *p > 0.0)
        .map(|(action, p)| {
            let child = game.apply_action(state, action);
            p * profile_value(game, profile, &child, player)
        })
        .sum()
}

/// Per-state values for `player` over a set of states sharing one history.
///
/// `weights[i]` is the chance probability of state `i` times the reach of the
/// seat playing `profile`.
fn best_response<G: Game>(
    game: &G,
    profile: &StrategyProfile,
    player: usize,
    states: &[G::State],
    weights: &[f64],
) -> Vec<f64> {
    let Some(first) = states.first() else {
        return Vec::new();
    };

    if game.is_terminal(first) {
        return states
            .iter()
            .map(|state| game.terminal_payoff(state, player))
            .collect();
    }

    let actions = game.legal_actions(first);
    let children = |action: &G::Action| -> Vec<G::State> {
        states
            .iter()
            .map(|state| game.apply_action(state, action))
            .collect()
    };

    if game.current_player(first) == player {
        let action_values: Vec<Vec<f64>> = actions
            .iter()
            .map(|action| best_response(game, profile, player, &children(action), weights))
            .collect();

        let mut groups: FxHashMap<G::InfoState, Vec<usize>> = FxHashMap::default();
        for (i, state) in states.iter().enumerate() {
            groups.entry(game.info_state(state)).or_default().push(i);
        }

        let mut values = vec![0.0; states.len()];
        for members in groups.values() {
            let total = |a: usize| -> f64 {
                members
                    .iter()
                    .map(|&i| weights[i] * action_values[a][i])
                    .sum()
            };
            let best = (0..actions.len())
                .max_by(|&a, &b| total(a).total_cmp(&total(b)))
                .unwrap_or(0);
            for &i in members {
                values[i] = action_values[best][i];
            }
        }
        values
    } else {
        let strategies: Vec<Vec<f64>> = states
            .iter()
            .map(|state| profile.strategy_at(game, state))
            .collect();

        let mut values = vec![0.0; states.len()];
        for (a, action) in actions.iter().enumerate() {
            let child_weights: Vec<f64> = weights
                .iter()
                .zip(&strategies)
                .map(|(w, probs)| w * probs[a])
                .collect();
            let child_values =
                best_response(game, profile, player, &children(action), &child_weights);
            for (i, v) in child_values.into_iter().enumerate() {
                values[i] += strategies[i][a] * v;
            }
        }
        values
    }
}
