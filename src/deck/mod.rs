//! Deck system: building, shuffling and validating the board.
//!
//! A deck is built once per session from a face pool. Strict pairing holds
//! for every deck this module hands out: each face key appears on exactly
//! two cards.

#[allow(clippy::module_inception)]
mod deck;

pub use deck::Deck;
