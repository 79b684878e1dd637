//! Game implementations for the CFR solver.
//!
//! ## Available Games
//!
//! - [`kuhn`]: Kuhn Poker - 3 cards, one betting round, known Nash equilibrium
//! - [`leduc`]: Leduc Hold'em - 6 cards, two betting rounds with a community card
//!
//! ## Adding New Games
//!
//! 1. Create a new module under `src/games/`
//! 2. Define deal, state, action, and info state types
//! 3. Implement the `Game` trait
//! 4. Add tests that check zero-sum payoffs and termination coverage
//!
//! See the [`kuhn`] module for a complete example.

pub mod cards;
pub mod kuhn;
pub mod leduc;
