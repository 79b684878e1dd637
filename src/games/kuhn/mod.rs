//! Kuhn Poker implementation for CFR validation.
//!
//! Kuhn Poker is a simplified poker game used to validate CFR implementations
//! because it has a known, mathematically proven Nash equilibrium.
//!
//! ## Game Rules
//!
//! - 3 cards: Jack, Queen, King
//! - 2 players, each antes 1 chip
//! - Each player receives 1 card
//! - Seat 0 acts first: Pass or Bet (1 chip)
//! - Seat 1 responds based on seat 0's action
//! - Higher card wins at showdown
//!
//! ## Game Tree
//!
//! ```text
//! Seat 0 (first to act)
//! ├── Pass
//! │   └── Seat 1
//! │       ├── Pass → Showdown (pot = 2)
//! │       └── Bet
//! │           └── Seat 0
//! │               ├── Pass → Seat 1 wins 1
//! │               └── Bet → Showdown (pot = 4)
//! └── Bet
//!     └── Seat 1
//!         ├── Pass → Seat 0 wins 1
//!         └── Bet → Showdown (pot = 4)
//! ```
//!
//! ## Known Nash Equilibrium
//!
//! - **Seat 0 with Jack**: Bet with probability α ∈ [0, 1/3]
//! - **Seat 0 with Queen**: Always Pass
//! - **Seat 0 with King**: Bet with probability 3α
//! - **Seat 1 facing Bet with Jack**: Always Fold
//! - **Seat 1 facing Bet with Queen**: Call with probability 1/3
//! - **Seat 1 facing Bet with King**: Always Call
//!
//! **Expected Value**: Seat 0 EV = -1/18 ≈ -0.0556

use std::cmp::Ordering;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cfr::game::{Action, Game, InfoState};
use crate::games::cards::Rank;
use crate::impl_game_state;

/// Game value for seat 0 at equilibrium.
pub const KUHN_GAME_VALUE: f64 = -1.0 / 18.0;

/// Actions in Kuhn Poker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KuhnAction {
    /// Pass (check if no bet, fold if facing bet)
    Pass,
    /// Bet (or call if facing bet)
    Bet,
}

impl Action for KuhnAction {
    fn symbol(&self) -> char {
        match self {
            KuhnAction::Pass => 'p',
            KuhnAction::Bet => 'b',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'p' => Some(KuhnAction::Pass),
            'b' => Some(KuhnAction::Bet),
            _ => None,
        }
    }
}

impl fmt::Display for KuhnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KuhnAction::Pass => write!(f, "Pass"),
            KuhnAction::Bet => write!(f, "Bet"),
        }
    }
}

/// Information state in Kuhn Poker.
///
/// What a player knows: their card and the action history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KuhnInfoState {
    /// Acting player's card
    pub card: Rank,
    /// Action history as symbols (e.g., "pb" = pass then bet)
    pub history: String,
}

impl InfoState for KuhnInfoState {
    fn key(&self) -> String {
        format!("{}{}", self.card.label(), self.history)
    }
}

impl fmt::Display for KuhnInfoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.card.name(), self.history)
    }
}

/// Complete game state in Kuhn Poker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KuhnState {
    /// cards[0] is seat 0's card, cards[1] is seat 1's card
    pub cards: [Rank; 2],
    /// Action history as symbols
    pub history: String,
}

impl_game_state!(KuhnState);

impl fmt::Display for KuhnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P1:{} P2:{} Pot:{} History:{}",
            self.cards[0],
            self.cards[1],
            self.pot(),
            self.history
        )
    }
}

impl KuhnState {
    /// Chips in the pot: antes plus one chip per bet or call.
    pub fn pot(&self) -> u32 {
        2 + self.history.matches('b').count() as u32
    }
}

/// Kuhn Poker game.
#[derive(Debug, Clone, Default)]
pub struct KuhnPoker;

impl KuhnPoker {
    /// Create a new Kuhn Poker game.
    pub fn new() -> Self {
        Self
    }
}

/// Result of a finished history.
enum Ending {
    Fold,
    Showdown,
}

fn ending(history: &str) -> Option<Ending> {
    match history {
        "pbp" | "bp" => Some(Ending::Fold),
        "pp" | "bb" | "pbb" => Some(Ending::Showdown),
        _ => None,
    }
}

impl Game for KuhnPoker {
    type Deal = [Rank; 2];
    type State = KuhnState;
    type Action = KuhnAction;
    type InfoState = KuhnInfoState;

    fn sample_deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Deal {
        let mut deck = Rank::ALL;
        deck.shuffle(rng);
        [deck[0], deck[1]]
    }

    fn deals(&self) -> Vec<(Self::Deal, f64)> {
        let mut deals = Vec::with_capacity(6);
        for &first in &Rank::ALL {
            for &second in &Rank::ALL {
                if first != second {
                    deals.push([first, second]);
                }
            }
        }
        let probability = 1.0 / deals.len() as f64;
        deals.into_iter().map(|deal| (deal, probability)).collect()
    }

    fn initial_state(&self, deal: &Self::Deal) -> Self::State {
        KuhnState {
            cards: *deal,
            history: String::new(),
        }
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        ending(&state.history).is_some()
    }

    fn terminal_payoff(&self, state: &Self::State, player: usize) -> f64 {
        let h = state.history.as_str();

        // Payoff for seat 0; seat 1's payoff is the negation
        let p0_payoff = match ending(h) {
            Some(Ending::Fold) => {
                // The seat that took the final pass folded to a bet
                let folder = (h.len() - 1) % 2;
                if folder == 0 {
                    -1.0
                } else {
                    1.0
                }
            }
            Some(Ending::Showdown) => {
                let winner = match state.cards[0].cmp(&state.cards[1]) {
                    Ordering::Greater => 1.0,
                    Ordering::Less => -1.0,
                    Ordering::Equal => 0.0,
                };
                f64::from(state.pot()) / 2.0 * winner
            }
            None => panic!("terminal_payoff called on non-terminal history '{}'", h),
        };

        if player == 0 {
            p0_payoff
        } else {
            -p0_payoff
        }
    }

    fn current_player(&self, state: &Self::State) -> usize {
        state.history.len() % 2
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        match state.history.as_str() {
            "" | "p" | "b" | "pb" => vec![KuhnAction::Pass, KuhnAction::Bet],
            h if ending(h).is_some() => vec![],
            h => panic!("unreachable Kuhn history '{}'", h),
        }
    }

    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State {
        debug_assert!(!self.is_terminal(state), "apply_action on terminal state");
        let mut new_state = state.clone();
        new_state.history.push(action.symbol());
        new_state
    }

    fn info_state(&self, state: &Self::State) -> Self::InfoState {
        let player = self.current_player(state);
        KuhnInfoState {
            card: state.cards[player],
            history: state.history.clone(),
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
