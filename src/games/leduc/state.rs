//! Leduc Hold'em actions, states and information states.

use std::fmt;

use crate::cfr::game::{Action, InfoState};
use crate::games::cards::Rank;
use crate::impl_game_state;

/// Chips each player antes.
pub const ANTE: u32 = 1;

/// Chips added by a raise.
pub const RAISE_SIZE: u32 = 1;

/// Symbol separating round one from round two in histories.
pub const ROUND_SEPARATOR: char = '/';

/// Actions in Leduc Hold'em.
///
/// Canonical orders: `[Check, Raise]` when not facing a raise,
/// `[Fold, Call]` when facing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeducAction {
    /// Check (no chips)
    Check,
    /// Raise by `RAISE_SIZE`
    Raise,
    /// Match the opponent's contribution
    Call,
    /// Give up the pot
    Fold,
}

impl Action for LeducAction {
    fn symbol(&self) -> char {
        match self {
            LeducAction::Check => 'k',
            LeducAction::Raise => 'r',
            LeducAction::Call => 'c',
            LeducAction::Fold => 'f',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'k' => Some(LeducAction::Check),
            'r' => Some(LeducAction::Raise),
            'c' => Some(LeducAction::Call),
            'f' => Some(LeducAction::Fold),
            _ => None,
        }
    }
}

impl fmt::Display for LeducAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LeducAction::Check => "Check",
            LeducAction::Raise => "Raise",
            LeducAction::Call => "Call",
            LeducAction::Fold => "Fold",
        };
        write!(f, "{}", name)
    }
}

/// Betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Round {
    /// Before the community card is revealed.
    One,
    /// After the community card is revealed.
    Two,
}

/// How a finished hand ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A seat folded to a raise.
    Fold {
        /// The seat that folded.
        folder: usize,
    },
    /// Round two closed without a fold.
    Showdown,
}

/// The cards of one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeducDeal {
    /// Private cards; cards[0] belongs to seat 0.
    pub cards: [Rank; 2],
    /// Community card, revealed in round two.
    pub board: Rank,
}

/// Complete game state in Leduc Hold'em.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeducState {
    /// Private cards; cards[0] belongs to seat 0.
    pub cards: [Rank; 2],
    /// Community card.
    pub board: Rank,
    /// Actions of both rounds in order.
    pub history: Vec<LeducAction>,
    /// Index into `history` where round two starts, once it has.
    pub round_start: Option<usize>,
    /// Chips each seat has put in.
    pub contributions: [u32; 2],
    /// Seat to act (or, when finished, the seat that would act next).
    pub player: usize,
    /// Set once the hand is over.
    pub outcome: Option<Outcome>,
}

impl_game_state!(LeducState);

impl LeducState {
    /// Fresh hand at the empty history.
    pub fn new(deal: &LeducDeal) -> Self {
        Self {
            cards: deal.cards,
            board: deal.board,
            history: Vec::new(),
            round_start: None,
            contributions: [ANTE, ANTE],
            player: 0,
            outcome: None,
        }
    }

    /// Current betting round.
    pub fn round(&self) -> Round {
        match self.round_start {
            Some(_) => Round::Two,
            None => Round::One,
        }
    }

    /// Actions since the last round separator.
    pub fn active_round(&self) -> &[LeducAction] {
        &self.history[self.round_start.unwrap_or(0)..]
    }

    /// Total chips in the pot.
    pub fn pot(&self) -> u32 {
        self.contributions[0] + self.contributions[1]
    }

    /// The community card if it has been revealed.
    pub fn visible_board(&self) -> Option<Rank> {
        match self.round() {
            Round::One => None,
            Round::Two => Some(self.board),
        }
    }

    /// History as symbols with the round separator, e.g. `krc/k`.
    pub fn history_string(&self) -> String {
        let mut out = String::with_capacity(self.history.len() + 1);
        for (i, action) in self.history.iter().enumerate() {
            if self.round_start == Some(i) {
                out.push(ROUND_SEPARATOR);
            }
            out.push(action.symbol());
        }
        if self.round_start == Some(self.history.len()) {
            out.push(ROUND_SEPARATOR);
        }
        out
    }
}

impl fmt::Display for LeducState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P1:{} P2:{} Board:{} Pot:{} History:{}",
            self.cards[0],
            self.cards[1],
            self.board,
            self.pot(),
            self.history_string()
        )
    }
}

/// Information state in Leduc Hold'em.
///
/// The board is `None` in round one, even though it has been dealt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeducInfoState {
    /// Acting player's private card
    pub card: Rank,
    /// Community card once revealed
    pub board: Option<Rank>,
    /// Full history including the round separator
    pub history: String,
}

impl InfoState for LeducInfoState {
    fn key(&self) -> String {
        let board = self.board.map_or('?', Rank::label);
        format!("{}|{}|{}", self.card.label(), board, self.history)
    }
}

impl fmt::Display for LeducInfoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
