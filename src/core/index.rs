//! Card slot identification.
//!
//! Every card on the board is addressed by its `CardIndex`, the position it
//! occupies in the deck's layout order. Indices are dense: a board of `n`
//! cards uses `0..n`.
//!
//! ## Usage
//!
//! ```
//! use card_match::core::{CardIndex, PairIndices};
//!
//! let first = CardIndex::new(0);
//! let second = CardIndex::new(3);
//!
//! let pair = PairIndices::new(first, second);
//! assert!(pair.contains(CardIndex::new(3)));
//! assert_eq!(pair.other(first), Some(second));
//! ```

use serde::{Deserialize, Serialize};

/// Position of a card in the board layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardIndex(pub u32);

impl CardIndex {
    /// Create a card index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as a `usize` for slice access.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every index on a board of `count` cards.
    ///
    /// Indices are `u32`, so a count past `u32::MAX` stops at the last
    /// addressable slot. `Deck` rejects boards that large.
    pub fn all(count: usize) -> impl Iterator<Item = CardIndex> {
        let end = u32::try_from(count).unwrap_or(u32::MAX);
        (0..end).map(CardIndex)
    }
}

impl From<u32> for CardIndex {
    fn from(index: u32) -> Self {
        Self(index)
    }
}

impl TryFrom<usize> for CardIndex {
    type Error = std::num::TryFromIntError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(Self)
    }
}

impl std::fmt::Display for CardIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Two cards compared against each other, in flip order.
///
/// `first` is the card flipped from `Idle`, `second` the one that completed
/// the pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairIndices {
    pub first: CardIndex,
    pub second: CardIndex,
}

impl PairIndices {
    /// Create a pair in flip order.
    #[must_use]
    pub const fn new(first: CardIndex, second: CardIndex) -> Self {
        Self { first, second }
    }

    /// Check if a card is part of this pair.
    #[must_use]
    pub fn contains(&self, index: CardIndex) -> bool {
        self.first == index || self.second == index
    }

    /// Get the companion of `index`, or `None` if it is not in the pair.
    #[must_use]
    pub fn other(&self, index: CardIndex) -> Option<CardIndex> {
        if index == self.first {
            Some(self.second)
        } else if index == self.second {
            Some(self.first)
        } else {
            None
        }
    }

    /// Both indices as an array, in flip order.
    #[must_use]
    pub const fn as_array(&self) -> [CardIndex; 2] {
        [self.first, self.second]
    }
}

impl std::fmt::Display for PairIndices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.first.0, self.second.0)
    }
}
