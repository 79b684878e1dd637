//! Leduc Hold'em implementation.
//!
//! ## Game Rules
//!
//! - 6 cards: two each of Jack, Queen, King
//! - 2 players, each antes 1 chip and receives 1 private card
//! - One community card is dealt face down and revealed after round one
//! - Each round: check or raise (1 chip); facing a raise, fold or call.
//!   At most one raise per round.
//! - A round closes on check-check or on a call. Round two opens with seat 0.
//! - Showdown: a private card pairing the board beats any unpaired card;
//!   otherwise the higher rank wins. Equal hands split.
//!
//! ## Payoffs
//!
//! Payoffs are pot fractions: a fold costs the folder half the pot, and the
//! showdown winner takes half the pot from the loser.

mod state;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cfr::game::Game;
use crate::games::cards::Rank;

pub use state::{
    LeducAction, LeducDeal, LeducInfoState, LeducState, Outcome, Round, ANTE, RAISE_SIZE,
    ROUND_SEPARATOR,
};

/// The six-card deck.
pub const DECK: [Rank; 6] = [
    Rank::Jack,
    Rank::Jack,
    Rank::Queen,
    Rank::Queen,
    Rank::King,
    Rank::King,
];

/// Showdown score: `3 + rank` for a pair with the board, else `rank`.
pub fn hand_score(card: Rank, board: Rank) -> u8 {
    if card == board {
        3 + card.value()
    } else {
        card.value()
    }
}

/// A round closes on check-check or on a call.
fn round_closed(active: &[LeducAction]) -> bool {
    matches!(active, [LeducAction::Check, LeducAction::Check])
        || active.last() == Some(&LeducAction::Call)
}

/// Leduc Hold'em game.
#[derive(Debug, Clone, Default)]
pub struct LeducHoldem;

impl LeducHoldem {
    /// Create a new Leduc Hold'em game.
    pub fn new() -> Self {
        Self
    }
}

impl Game for LeducHoldem {
    type Deal = LeducDeal;
    type State = LeducState;
    type Action = LeducAction;
    type InfoState = LeducInfoState;

    fn sample_deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Deal {
        let mut deck = DECK;
        deck.shuffle(rng);
        LeducDeal {
            cards: [deck[0], deck[1]],
            board: deck[2],
        }
    }

    fn deals(&self) -> Vec<(Self::Deal, f64)> {
        // Count ordered draws of three distinct cards by their ranks
        let mut counts: BTreeMap<(Rank, Rank, Rank), u32> = BTreeMap::new();
        let mut total = 0u32;
        for (i, &first) in DECK.iter().enumerate() {
            for (j, &second) in DECK.iter().enumerate() {
                for (k, &board) in DECK.iter().enumerate() {
                    if i != j && i != k && j != k {
                        *counts.entry((first, second, board)).or_insert(0) += 1;
                        total += 1;
                    }
                }
            }
        }

        counts
            .into_iter()
            .map(|((first, second, board), count)| {
                let deal = LeducDeal {
                    cards: [first, second],
                    board,
                };
                (deal, f64::from(count) / f64::from(total))
            })
            .collect()
    }

    fn initial_state(&self, deal: &Self::Deal) -> Self::State {
        LeducState::new(deal)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.outcome.is_some()
    }

    fn terminal_payoff(&self, state: &Self::State, player: usize) -> f64 {
        let half_pot = f64::from(state.pot()) / 2.0;

        // Payoff for seat 0; seat 1's payoff is the negation
        let p0_payoff = match state.outcome {
            Some(Outcome::Fold { folder }) => {
                if folder == 0 {
                    -half_pot
                } else {
                    half_pot
                }
            }
            Some(Outcome::Showdown) => {
                let s0 = hand_score(state.cards[0], state.board);
                let s1 = hand_score(state.cards[1], state.board);
                let winner = match s0.cmp(&s1) {
                    Ordering::Greater => 1.0,
                    Ordering::Less => -1.0,
                    Ordering::Equal => 0.0,
                };
                half_pot * winner
            }
            None => panic!(
                "terminal_payoff called on non-terminal history '{}'",
                state.history_string()
            ),
        };

        if player == 0 {
            p0_payoff
        } else {
            -p0_payoff
        }
    }

    fn current_player(&self, state: &Self::State) -> usize {
        state.player
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        if state.outcome.is_some() {
            return vec![];
        }
        match state.active_round() {
            [] | [LeducAction::Check] => vec![LeducAction::Check, LeducAction::Raise],
            [.., LeducAction::Raise] => vec![LeducAction::Fold, LeducAction::Call],
            _ => panic!("unreachable Leduc history '{}'", state.history_string()),
        }
    }

    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        debug_assert!(!self.is_terminal(state), "apply_action on terminal state");

        let mut next = state.clone();
        let player = state.player;
        let opponent = 1 - player;
        next.history.push(*action);

        match action {
            LeducAction::Raise => next.contributions[player] += RAISE_SIZE,
            LeducAction::Call => next.contributions[player] = next.contributions[opponent],
            LeducAction::Check | LeducAction::Fold => {}
        }

        if *action == LeducAction::Fold {
            next.outcome = Some(Outcome::Fold { folder: player });
            next.player = opponent;
            return next;
        }

        if round_closed(next.active_round()) {
            match next.round() {
                Round::One => {
                    next.round_start = Some(next.history.len());
                    next.player = 0;
                }
                Round::Two => {
                    next.outcome = Some(Outcome::Showdown);
                    next.player = opponent;
                }
            }
        } else {
            next.player = opponent;
        }

        next
    }

    fn info_state(&self, state: &Self::State) -> Self::InfoState {
        LeducInfoState {
            card: state.cards[state.player],
            board: state.visible_board(),
            history: state.history_string(),
        }
    }

    fn pot(&self, state: &Self::State) -> u32 {
        state.pot()
    }

    fn action_name(&self, action: &Self::Action) -> String {
        action.to_string()
    }

    fn state_description(&self, state: &Self::State) -> String {
        format!("{}", state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfr::game::InfoState;
    use crate::cfr::GameError;

    const JQ_K: LeducDeal = LeducDeal {
        cards: [Rank::Jack, Rank::Queen],
        board: Rank::King,
    };

    fn play(game: &LeducHoldem, deal: &LeducDeal, history: &str) -> LeducState {
        history
            .chars()
            .filter(|&c| c != ROUND_SEPARATOR)
            .try_fold(game.initial_state(deal), |state, symbol| game.apply_symbol(&state, symbol))
            .unwrap()
    }

    fn reachable(game: &LeducHoldem, state: LeducState, out: &mut Vec<LeducState>) {
        for action in game.legal_actions(&state) {
            reachable(game, game.apply_action(&state, &action), out);
        }
        out.push(state);
    }

    #[test]
    fn test_leduc_check_check_showdown() {
        let game = LeducHoldem::new();
        let state = play(&game, &JQ_K, "kk/kk");

        assert!(game.is_terminal(&state));
        assert_eq!(state.pot(), 2);
        // Queen beats Jack, no pairs: seat 1 wins pot / 2 = 1
        assert_eq!(game.terminal_payoff(&state, 1), 1.0);
        assert_eq!(game.terminal_payoff(&state, 0), -1.0);
    }

    #[test]
    fn test_leduc_raise_call_then_showdown() {
        let game = LeducHoldem::new();

        let state = play(&game, &JQ_K, "krc");
        assert_eq!(state.round(), Round::Two);
        assert_eq!(state.pot(), 4);
        assert_eq!(state.history_string(), "krc/");
        assert_eq!(game.current_player(&state), 0);

        let state = play(&game, &JQ_K, "krc/kk");
        assert!(game.is_terminal(&state));
        assert_eq!(game.terminal_payoff(&state, 0), -2.0);
        assert_eq!(game.terminal_payoff(&state, 1), 2.0);
    }

    #[test]
    fn test_leduc_pair_beats_high_card() {
        let game = LeducHoldem::new();
        let deal = LeducDeal {
            cards: [Rank::Jack, Rank::King],
            board: Rank::Jack,
        };
        let state = play(&game, &deal, "rc/rc");
        assert_eq!(state.pot(), 6);
        assert_eq!(game.terminal_payoff(&state, 0), 3.0);
        assert_eq!(hand_score(Rank::Jack, Rank::Jack), 3);
        assert_eq!(hand_score(Rank::King, Rank::Jack), 2);
    }

    #[test]
    fn test_leduc_equal_hands_split() {
        let game = LeducHoldem::new();
        let deal = LeducDeal {
            cards: [Rank::Queen, Rank::Queen],
            board: Rank::King,
        };
        let state = play(&game, &deal, "rc/kk");
        assert_eq!(game.terminal_payoff(&state, 0), 0.0);
        assert_eq!(game.terminal_payoff(&state, 1), 0.0);
    }

    #[test]
    fn test_leduc_fold_costs_half_pot() {
        let game = LeducHoldem::new();

        // Seat 0 raises, seat 1 folds: pot 3
        let state = play(&game, &JQ_K, "rf");
        assert!(game.is_terminal(&state));
        assert_eq!(state.outcome, Some(Outcome::Fold { folder: 1 }));
        assert_eq!(game.terminal_payoff(&state, 1), -1.5);
        assert_eq!(game.terminal_payoff(&state, 0), 1.5);
        // value handed to the solver belongs to the non-folding seat
        assert_eq!(game.current_player(&state), 0);

        // Round two: seat 1 raises after seat 0 checks, seat 0 folds: pot 5
        let state = play(&game, &JQ_K, "rc/krf");
        assert_eq!(game.terminal_payoff(&state, 0), -2.5);
    }

    #[test]
    fn test_leduc_pot_tracks_contributions() {
        let game = LeducHoldem::new();
        assert_eq!(game.pot(&game.initial_state(&JQ_K)), 2 * ANTE);
        assert_eq!(game.pot(&play(&game, &JQ_K, "kr")), 3);
        assert_eq!(game.pot(&play(&game, &JQ_K, "krc/")), 4);
        assert_eq!(game.pot(&play(&game, &JQ_K, "krc/r")), 5);
    }

    #[test]
    fn test_leduc_legal_actions() {
        let game = LeducHoldem::new();

        let state = game.initial_state(&JQ_K);
        assert_eq!(game.legal_actions(&state), vec![LeducAction::Check, LeducAction::Raise]);

        let state = play(&game, &JQ_K, "k");
        assert_eq!(game.legal_actions(&state), vec![LeducAction::Check, LeducAction::Raise]);

        let state = play(&game, &JQ_K, "kr");
        assert_eq!(game.legal_actions(&state), vec![LeducAction::Fold, LeducAction::Call]);

        let state = play(&game, &JQ_K, "kk");
        assert_eq!(state.round(), Round::Two);
        assert_eq!(game.current_player(&state), 0);
        assert_eq!(game.legal_actions(&state), vec![LeducAction::Check, LeducAction::Raise]);
    }

    #[test]
    fn test_leduc_rejects_illegal_actions() {
        let game = LeducHoldem::new();
        let state = play(&game, &JQ_K, "r");

        // no re-raise
        let result = game.try_apply(&state, &LeducAction::Raise);
        assert!(matches!(result, Err(GameError::IllegalAction { .. })));
        assert_eq!(state.history, vec![LeducAction::Raise]);

        // nothing to call
        let state = game.initial_state(&JQ_K);
        assert!(game.try_apply(&state, &LeducAction::Call).is_err());
        assert!(game.try_apply(&state, &LeducAction::Fold).is_err());
    }

    #[test]
    fn test_leduc_info_state_keys() {
        let game = LeducHoldem::new();

        let state = play(&game, &JQ_K, "k");
        let info = game.info_state(&state);
        assert_eq!(info.card, Rank::Queen);
        assert_eq!(info.board, None);
        assert_eq!(info.key(), "Q|?|k");

        let state = play(&game, &JQ_K, "krc/k");
        let info = game.info_state(&state);
        assert_eq!(info.board, Some(Rank::King));
        assert_eq!(info.key(), "Q|K|krc/k");
    }

    #[test]
    fn test_leduc_zero_sum_and_termination_coverage() {
        let game = LeducHoldem::new();
        for (deal, _) in game.deals() {
            let mut states = Vec::new();
            reachable(&game, game.initial_state(&deal), &mut states);

            assert_eq!(states.len(), 33);
            for state in &states {
                assert!(state.history.len() <= 6);
                if game.is_terminal(state) {
                    assert!(game.legal_actions(state).is_empty());
                    let sum = game.terminal_payoff(state, 0) + game.terminal_payoff(state, 1);
                    assert_eq!(sum, 0.0, "not zero-sum at {}", state);
                } else {
                    assert_eq!(game.legal_actions(state).len(), 2);
                }
            }
        }
    }

    #[test]
    #[should_panic(expected = "non-terminal")]
    fn test_leduc_payoff_on_open_history_panics() {
        let game = LeducHoldem::new();
        let state = play(&game, &JQ_K, "kk/k");
        game.terminal_payoff(&state, 0);
    }

    #[test]
    #[should_panic(expected = "unreachable Leduc history")]
    fn test_leduc_inconsistent_history_panics() {
        let game = LeducHoldem::new();
        let mut state = game.initial_state(&JQ_K);
        state.history = vec![LeducAction::Check, LeducAction::Check];
        game.legal_actions(&state);
    }

    #[test]
    fn test_leduc_deals() {
        let game = LeducHoldem::new();
        let deals = game.deals();

        // 3 x 3 x 3 rank triples minus the 3 impossible triple-of-a-kind
        assert_eq!(deals.len(), 24);
        let total: f64 = deals.iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);

        // J J J is impossible, J Q K has probability 2*2*2 / 120
        let jqk = deals
            .iter()
            .find(|(d, _)| d.cards == [Rank::Jack, Rank::Queen] && d.board == Rank::King)
            .unwrap();
        assert!((jqk.1 - 8.0 / 120.0).abs() < 1e-12);

        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let deal = game.sample_deal(&mut rng);
            let same = deal.cards.iter().filter(|&&c| c == deal.board).count()
                + usize::from(deal.cards[0] == deal.cards[1]);
            assert!(same <= 1, "three of a kind dealt: {:?}", deal);
        }
    }
}
