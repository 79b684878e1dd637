//! Card ranks shared by Kuhn poker and Leduc hold'em.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Card rank. Suits never matter in these games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Lowest rank (0).
    Jack = 0,
    /// Middle rank (1).
    Queen = 1,
    /// Highest rank (2).
    King = 2,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 3] = [Rank::Jack, Rank::Queen, Rank::King];

    /// Integer rank used for scoring.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// One-letter label used in information-set keys.
    pub fn label(self) -> char {
        match self {
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
