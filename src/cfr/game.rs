//! Game trait definition for CFR solver.
//!
//! Any two-player zero-sum game that implements the `Game` trait can be solved
//! using CFR. This provides a clean abstraction between the algorithm and
//! specific games.

use std::fmt::Debug;
use std::hash::Hash;

use rand::Rng;
use thiserror::Error;

/// Trait for actions that can be taken in a game.
///
/// Actions must be cloneable, comparable, and hashable for storage in maps.
pub trait Action: Clone + Eq + Hash + Debug + Send + Sync {
    /// One-character symbol used in histories and strategy keys.
    fn symbol(&self) -> char;

    /// Parse an action from its history symbol.
    fn from_symbol(symbol: char) -> Option<Self>
    where
        Self: Sized;
}

/// Trait for information states (what a player knows at a decision point).
///
/// Two game states that look identical to the acting player (same private
/// card, same revealed community cards, same public history) must produce
/// equal information states.
pub trait InfoState: Clone + Eq + Hash + Debug + Send + Sync {
    /// Serialized key used in exported strategy files.
    fn key(&self) -> String;
}

/// Trait for game states.
///
/// A game state contains all information about the current state of the game,
/// including private information that players may not see.
pub trait GameState: Clone + Debug + Send + Sync {}

/// Errors reported by the game contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The action is not in the legal set for the current history.
    #[error("illegal action {action} at {state}")]
    IllegalAction {
        /// Name of the rejected action.
        action: String,
        /// Description of the state the action was applied to.
        state: String,
    },

    /// The symbol does not name any action of the game.
    #[error("unknown action symbol '{0}'")]
    UnknownSymbol(char),
}

/// The main Game trait that defines the interface for a two-player game.
///
/// The chance event (the card deal) is explicit: the solver calls
/// [`Game::sample_deal`] once per iteration and starts the action tree from
/// [`Game::initial_state`]. [`Game::deals`] enumerates every deal exactly,
/// which lets evaluation code replace sampling with enumeration.
///
/// # Value convention
///
/// [`Game::current_player`] is defined on every state, terminal ones included:
/// at a terminal state it names the seat that would act next. The solver
/// returns every node value from the point of view of that seat and negates a
/// child's value whenever the child's seat differs from the parent's.
pub trait Game: Clone + Send + Sync {
    /// One outcome of the chance node (the dealt cards).
    type Deal: Clone + Debug + Send + Sync;

    /// The type representing a complete game state.
    type State: GameState;

    /// The type representing an action a player can take.
    type Action: Action;

    /// The type representing what a player knows at a decision point.
    type InfoState: InfoState;

    /// Sample a deal uniformly at random.
    fn sample_deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Deal;

    /// Every distinct deal with its probability. Probabilities sum to 1.
    fn deals(&self) -> Vec<(Self::Deal, f64)>;

    /// Create the state at the empty history for a given deal.
    fn initial_state(&self, deal: &Self::Deal) -> Self::State;

    /// Check if the given state is terminal (hand over).
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Get the payoff for a seat at a terminal state.
    ///
    /// # Panics
    /// Panics if the state is not terminal; that indicates the legality and
    /// termination rules disagree.
    fn terminal_payoff(&self, state: &Self::State, player: usize) -> f64;

    /// Seat to act, or for terminal states the seat that would act next.
    fn current_player(&self, state: &Self::State) -> usize;

    /// Legal actions in canonical order. Empty for terminal states.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply a legal action and return the resulting state.
    ///
    /// Callers must only pass actions from [`Game::legal_actions`]; use
    /// [`Game::try_apply`] for untrusted input.
    fn apply_action(&self, state: &Self::State, action: &Self::Action) -> Self::State;

    /// Information state for the seat to act.
    fn info_state(&self, state: &Self::State) -> Self::InfoState;

    /// Chips in the pot. Public to both seats.
    fn pot(&self, state: &Self::State) -> u32;

    /// Apply an action after checking it against the legal set.
    ///
    /// The input state is never modified; an illegal action is reported
    /// without producing a new state.
    fn try_apply(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Result<Self::State, GameError> {
        if !self.legal_actions(state).contains(action) {
            return Err(GameError::IllegalAction {
                action: self.action_name(action),
                state: self.state_description(state),
            });
        }
        Ok(self.apply_action(state, action))
    }

    /// Parse a history symbol and apply it.
    fn apply_symbol(&self, state: &Self::State, symbol: char) -> Result<Self::State, GameError> {
        let action = Self::Action::from_symbol(symbol).ok_or(GameError::UnknownSymbol(symbol))?;
        self.try_apply(state, &action)
    }

    /// Get a human-readable name for an action.
    fn action_name(&self, action: &Self::Action) -> String {
        format!("{:?}", action)
    }

    /// Get a human-readable description of a state.
    fn state_description(&self, state: &Self::State) -> String {
        format!("{:?}", state)
    }
}

/// Macro to simplify implementing the GameState trait.
#[macro_export]
macro_rules! impl_game_state {
    ($type:ty) => {
        impl $crate::cfr::game::GameState for $type {}
    };
}
