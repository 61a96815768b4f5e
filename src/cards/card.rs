//! Card instances - runtime card state.
//!
//! A `Card` is one slot on the board. Its face is assigned at setup; the
//! flip flags are owned by the `MatchCoordinator` during play.

use serde::{Deserialize, Serialize};

use super::face::{Face, FaceKey};
use crate::core::index::CardIndex;

/// A card on the board.
///
/// ## Flags
///
/// - `is_face_up`: face visible
/// - `is_locked`: permanently matched, stays face up
/// - `is_interactable`: accepts flips right now
///
/// A locked card is always face up and never interactable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Slot in board layout order.
    pub id: CardIndex,

    /// Current face.
    pub face: Face,

    pub is_face_up: bool,
    pub is_locked: bool,
    pub is_interactable: bool,
}

impl Card {
    /// Create a face-down, interactable card.
    #[must_use]
    pub fn new(id: CardIndex, face: Face) -> Self {
        Self {
            id,
            face,
            is_face_up: false,
            is_locked: false,
            is_interactable: true,
        }
    }

    /// The key this card is matched by.
    #[must_use]
    pub fn face_key(&self) -> &FaceKey {
        &self.face.key
    }

    /// Check whether this card pairs with another.
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.face.matches(&other.face)
    }

    /// Replace the face. Flip state is untouched.
    pub fn set_face(&mut self, face: Face) {
        self.face = face;
    }

    /// Turn face up and stop accepting input.
    pub fn reveal(&mut self) {
        self.is_face_up = true;
        self.is_interactable = false;
    }

    /// Turn face down and accept input again.
    ///
    /// Locked cards ignore this.
    pub fn hide(&mut self) {
        if self.is_locked {
            return;
        }
        self.is_face_up = false;
        self.is_interactable = true;
    }

    /// Permanently lock face up.
    pub fn lock(&mut self) {
        self.is_locked = true;
        self.is_face_up = true;
        self.is_interactable = false;
    }

    /// Back to the freshly dealt state.
    pub fn reset(&mut self) {
        self.is_face_up = false;
        self.is_locked = false;
        self.is_interactable = true;
    }
}
