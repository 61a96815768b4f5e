//! Card system: faces and card instances.
//!
//! ## Key Types
//!
//! - `FaceKey`: Comparable value two cards are matched by
//! - `Face`: Visual triple (sprite, text, color) plus its key
//! - `Card`: One board slot with its flip state

pub mod card;
pub mod face;

pub use card::Card;
pub use face::{Face, FaceColor, FaceKey};
