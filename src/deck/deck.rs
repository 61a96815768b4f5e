//! The board's card collection.
//!
//! `Deck` owns every card of a session in layout order. It builds the
//! board from a face pool, shuffles face-to-slot assignment, and checks the
//! strict pairing rule: each face key sits on exactly two cards.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::cards::{Card, Face, FaceKey};
use crate::core::error::ConfigError;
use crate::core::index::CardIndex;
use crate::core::rng::GameRng;

/// Every card of one session, in board layout order.
///
/// ## Usage
///
/// ```
/// use card_match::cards::Face;
/// use card_match::core::GameRng;
/// use card_match::deck::Deck;
///
/// let pool = vec![Face::new("a"), Face::new("b"), Face::new("c")];
/// let mut deck = Deck::build(&pool, 6).unwrap();
///
/// let mut rng = GameRng::new(42);
/// deck.shuffle(&mut rng);
///
/// assert_eq!(deck.len(), 6);
/// assert_eq!(deck.total_pairs(), 3);
/// assert!(deck.validate_pairing().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build a board using every face in `face_pool` exactly twice.
    ///
    /// Cards are dealt pairwise (`a, a, b, b, ...`); call `shuffle` to
    /// randomize the layout.
    pub fn build(face_pool: &[Face], slot_count: usize) -> Result<Self, ConfigError> {
        check_board_size(slot_count)?;
        check_unique_keys(face_pool)?;

        let needed = slot_count / 2;
        if face_pool.len() != needed {
            return Err(ConfigError::PoolSizeMismatch {
                pool: face_pool.len(),
                slots: slot_count,
                needed,
            });
        }

        Ok(Self::dealt_in_pairs(face_pool.iter().cloned()))
    }

    /// Build a board from a pool at least as large as it needs.
    ///
    /// The faces used are drawn at random without replacement; the rest of
    /// the pool is left out of the session.
    pub fn sample(
        face_pool: &[Face],
        slot_count: usize,
        rng: &mut GameRng,
    ) -> Result<Self, ConfigError> {
        check_board_size(slot_count)?;
        check_unique_keys(face_pool)?;

        let needed = slot_count / 2;
        if face_pool.len() < needed {
            return Err(ConfigError::PoolSizeMismatch {
                pool: face_pool.len(),
                slots: slot_count,
                needed,
            });
        }

        let mut pool = face_pool.to_vec();
        let drawn: Vec<Face> = (0..needed).filter_map(|_| rng.pop_random(&mut pool)).collect();
        Ok(Self::dealt_in_pairs(drawn))
    }

    /// Build a board where each pair shows two different faces.
    ///
    /// Pair `i` shows `first[i]` on one card and `second[i]` on the other;
    /// both carry `first[i]`'s key, so they match. Typical use: a picture
    /// paired with its word.
    pub fn build_with_replacements(first: &[Face], second: &[Face]) -> Result<Self, ConfigError> {
        if first.len() != second.len() {
            return Err(ConfigError::ReplacementCountMismatch {
                first: first.len(),
                second: second.len(),
            });
        }
        check_board_size(first.len() * 2)?;
        check_unique_keys(first)?;

        let faces = first.iter().zip(second).flat_map(|(a, b)| {
            let partner = Face {
                key: a.key.clone(),
                ..b.clone()
            };
            [a.clone(), partner]
        });

        Ok(Self::laid_out(faces.collect()))
    }

    /// Build a board from an explicit layout.
    ///
    /// Used by hosts that place cards themselves. The layout must already
    /// satisfy strict pairing.
    pub fn from_layout<I, F>(faces: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = F>,
        F: Into<Face>,
    {
        let faces: Vec<Face> = faces.into_iter().map(Into::into).collect();
        check_board_size(faces.len())?;

        let deck = Self::laid_out(faces);
        deck.validate_pairing()?;
        Ok(deck)
    }

    fn dealt_in_pairs(faces: impl IntoIterator<Item = Face>) -> Self {
        Self::laid_out(faces.into_iter().flat_map(|face| [face.clone(), face]).collect())
    }

    /// Callers check the size first, so every slot has an index.
    fn laid_out(faces: Vec<Face>) -> Self {
        let cards = CardIndex::all(faces.len())
            .zip(faces)
            .map(|(id, face)| Card::new(id, face))
            .collect();
        Self { cards }
    }

    /// Randomly reassign faces to slots.
    ///
    /// Faces are drawn from the current assignment without replacement, so
    /// the multiset of faces (and therefore pairing) is preserved. Every
    /// card goes back face down, unlocked and interactable.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut pool: Vec<Face> = self.cards.iter().map(|c| c.face.clone()).collect();

        for card in &mut self.cards {
            if let Some(face) = rng.pop_random(&mut pool) {
                card.set_face(face);
            }
            card.reset();
        }
    }

    /// Set the face of one slot. Flip state is untouched.
    ///
    /// A face with the slot's current key only restyles that slot. A new
    /// key re-keys the whole pair: the partner card takes `face` too, so
    /// the board stays strictly paired. A key already used by another pair
    /// is rejected and the board is left as it was. Assigning the same face
    /// twice is a no-op.
    pub fn assign(&mut self, index: CardIndex, face: Face) -> Result<(), ConfigError> {
        let len = self.cards.len();
        let current = self
            .card(index)
            .ok_or(ConfigError::IndexOutOfRange { index, len })?
            .face
            .key
            .clone();

        if current == face.key {
            if let Some(card) = self.card_mut(index) {
                if card.face != face {
                    card.set_face(face);
                }
            }
            return Ok(());
        }

        let taken = self.cards.iter().filter(|c| c.face.key == face.key).count();
        if taken > 0 {
            let moved = self.cards.iter().filter(|c| c.face.key == current).count();
            return Err(ConfigError::BrokenPairing {
                key: face.key.to_string(),
                count: taken + moved,
            });
        }

        for card in self.cards.iter_mut().filter(|c| c.face.key == current) {
            card.set_face(face.clone());
        }
        Ok(())
    }

    /// Put every card back face down, unlocked and interactable.
    pub fn reset_cards(&mut self) {
        for card in &mut self.cards {
            card.reset();
        }
    }

    /// Check that every face key appears on exactly two cards.
    ///
    /// Reports the first offending key in layout order.
    pub fn validate_pairing(&self) -> Result<(), ConfigError> {
        let counts = self.key_counts();

        for card in &self.cards {
            let count = counts.get(card.face_key()).copied().unwrap_or(0);
            if count != 2 {
                return Err(ConfigError::BrokenPairing {
                    key: card.face_key().to_string(),
                    count,
                });
            }
        }
        Ok(())
    }

    /// Number of cards carrying each face key.
    #[must_use]
    pub fn key_counts(&self) -> FxHashMap<&FaceKey, usize> {
        let mut counts: FxHashMap<&FaceKey, usize> = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.face_key()).or_default() += 1;
        }
        counts
    }

    /// Enable or disable input on every card that is still face down.
    ///
    /// Face-up cards (pending or locked) are left alone.
    pub fn set_face_down_interactable(&mut self, enabled: bool) {
        for card in self.cards.iter_mut().filter(|c| !c.is_face_up) {
            card.is_interactable = enabled;
        }
    }

    /// Get a card.
    #[must_use]
    pub fn card(&self, index: CardIndex) -> Option<&Card> {
        self.cards.get(index.as_usize())
    }

    /// Get a card mutably.
    pub fn card_mut(&mut self, index: CardIndex) -> Option<&mut Card> {
        self.cards.get_mut(index.as_usize())
    }

    /// All cards in layout order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the board has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.cards.len() / 2
    }

    /// Number of permanently matched cards.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_locked).count()
    }

    /// Check if every card is matched.
    #[must_use]
    pub fn all_locked(&self) -> bool {
        self.cards.iter().all(|c| c.is_locked)
    }

    /// Remove every card from the board.
    ///
    /// Used at session teardown.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

fn check_board_size(slot_count: usize) -> Result<(), ConfigError> {
    if slot_count == 0 || slot_count % 2 != 0 || u32::try_from(slot_count).is_err() {
        return Err(ConfigError::InvalidBoardSize(slot_count));
    }
    Ok(())
}

fn check_unique_keys(faces: &[Face]) -> Result<(), ConfigError> {
    let mut seen = FxHashSet::default();
    for face in faces {
        if !seen.insert(&face.key) {
            return Err(ConfigError::DuplicateFaceKey(face.key.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(keys: &[&str]) -> Vec<Face> {
        keys.iter().map(|&k| Face::new(k)).collect()
    }

    fn keys(deck: &Deck) -> Vec<&str> {
        deck.cards().iter().map(|c| c.face_key().as_str()).collect()
    }

    #[test]
    fn test_build_deals_pairs_in_order() {
        let deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();

        assert_eq!(keys(&deck), vec!["a", "a", "b", "b"]);
        for (i, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.id, CardIndex::try_from(i).unwrap());
            assert!(!card.is_face_up);
        }
    }

    #[test]
    fn test_build_rejects_size_mismatch() {
        let err = Deck::build(&pool(&["a", "b", "c"]), 4).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PoolSizeMismatch {
                pool: 3,
                slots: 4,
                needed: 2
            }
        );
    }

    #[test]
    fn test_build_rejects_odd_and_empty_boards() {
        assert_eq!(
            Deck::build(&pool(&["a", "b"]), 5).unwrap_err(),
            ConfigError::InvalidBoardSize(5)
        );
        assert_eq!(Deck::build(&[], 0).unwrap_err(), ConfigError::InvalidBoardSize(0));
    }

    #[test]
    fn test_build_rejects_duplicate_keys() {
        let err = Deck::build(&pool(&["a", "a"]), 4).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateFaceKey("a".to_string()));
    }

    #[test]
    fn test_sample_draws_subset() {
        let big = pool(&["a", "b", "c", "d", "e", "f"]);
        let mut rng = GameRng::new(3);
        let deck = Deck::sample(&big, 6, &mut rng).unwrap();

        assert_eq!(deck.len(), 6);
        assert!(deck.validate_pairing().is_ok());
        assert_eq!(deck.key_counts().len(), 3);
    }

    #[test]
    fn test_sample_rejects_small_pool() {
        let mut rng = GameRng::new(3);
        let err = Deck::sample(&pool(&["a"]), 4, &mut rng).unwrap_err();
        assert!(matches!(err, ConfigError::PoolSizeMismatch { needed: 2, .. }));
    }

    #[test]
    fn test_shuffle_preserves_pairing_and_resets_state() {
        let mut deck = Deck::build(&pool(&["a", "b", "c", "d", "e", "f", "g", "h"]), 16).unwrap();
        deck.card_mut(CardIndex(0)).unwrap().lock();
        let before: Vec<_> = keys(&deck).into_iter().map(String::from).collect();

        let mut rng = GameRng::new(42);
        deck.shuffle(&mut rng);

        let after: Vec<_> = keys(&deck).into_iter().map(String::from).collect();
        assert_ne!(before, after);
        assert!(deck.validate_pairing().is_ok());
        assert_eq!(deck.locked_count(), 0);
        assert!(deck.cards().iter().all(|c| c.is_interactable && !c.is_face_up));
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let faces = pool(&["a", "b", "c", "d"]);
        let mut deck1 = Deck::build(&faces, 8).unwrap();
        let mut deck2 = Deck::build(&faces, 8).unwrap();

        deck1.shuffle(&mut GameRng::new(9));
        deck2.shuffle(&mut GameRng::new(9));

        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_assign_is_idempotent_and_keeps_flip_state() {
        let mut deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();
        deck.card_mut(CardIndex(1)).unwrap().reveal();

        deck.assign(CardIndex(1), Face::new("b")).unwrap();
        deck.assign(CardIndex(1), Face::new("b")).unwrap();

        let card = deck.card(CardIndex(1)).unwrap();
        assert_eq!(card.face_key().as_str(), "b");
        assert!(card.is_face_up);
    }

    #[test]
    fn test_assign_out_of_range() {
        let mut deck = Deck::build(&pool(&["a"]), 2).unwrap();
        let err = deck.assign(CardIndex(2), Face::new("z")).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IndexOutOfRange {
                index: CardIndex(2),
                len: 2
            }
        );
    }

    #[test]
    fn test_assign_new_key_rekeys_pair() {
        let mut deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();
        deck.shuffle(&mut GameRng::new(7));
        let index = CardIndex(0);
        let old = deck.card(index).unwrap().face_key().clone();

        deck.assign(index, Face::new("z").with_text("Z")).unwrap();

        assert!(deck.validate_pairing().is_ok());
        assert_eq!(deck.key_counts().get(&FaceKey::new("z")), Some(&2));
        assert!(!deck.key_counts().contains_key(&old));
        let partner = deck.cards().iter().find(|c| c.id != index && c.face_key().as_str() == "z");
        assert_eq!(partner.unwrap().face.text.as_deref(), Some("Z"));
    }

    #[test]
    fn test_assign_rejects_key_of_other_pair() {
        let mut deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();
        let before = deck.clone();

        let err = deck.assign(CardIndex(0), Face::new("b")).unwrap_err();

        assert_eq!(
            err,
            ConfigError::BrokenPairing {
                key: "b".to_string(),
                count: 4
            }
        );
        assert_eq!(deck, before);
    }

    #[test]
    fn test_reset_cards() {
        let mut deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();
        deck.card_mut(CardIndex(0)).unwrap().lock();
        deck.card_mut(CardIndex(2)).unwrap().reveal();

        deck.reset_cards();

        assert_eq!(deck.locked_count(), 0);
        assert!(deck.cards().iter().all(|c| c.is_interactable && !c.is_face_up));
    }

    #[test]
    fn test_validate_pairing_reports_broken_key() {
        let mut deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();
        deck.card_mut(CardIndex(1)).unwrap().set_face(Face::new("b"));

        let err = deck.validate_pairing().unwrap_err();
        assert_eq!(
            err,
            ConfigError::BrokenPairing {
                key: "a".to_string(),
                count: 1
            }
        );
    }

    #[test]
    fn test_from_layout() {
        let deck = Deck::from_layout(["a", "b", "a", "b"]).unwrap();
        assert_eq!(keys(&deck), vec!["a", "b", "a", "b"]);

        let err = Deck::from_layout(["a", "a", "a", "a"]).unwrap_err();
        assert!(matches!(err, ConfigError::BrokenPairing { count: 4, .. }));

        let err = Deck::from_layout(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBoardSize(3));
    }

    #[test]
    fn test_replacements_share_first_key() {
        let first = vec![Face::new("dog").with_sprite("dog.png")];
        let second = vec![Face::new("word-dog").with_text("Dog")];

        let deck = Deck::build_with_replacements(&first, &second).unwrap();

        assert_eq!(deck.len(), 2);
        let partner = deck.card(CardIndex(1)).unwrap();
        assert_eq!(partner.face_key().as_str(), "dog");
        assert_eq!(partner.face.text.as_deref(), Some("Dog"));
        assert_eq!(partner.face.sprite, None);
        assert!(deck.card(CardIndex(0)).unwrap().matches(partner));
    }

    #[test]
    fn test_replacements_count_mismatch() {
        let first = pool(&["a", "b"]);
        let second = pool(&["x"]);

        let err = Deck::build_with_replacements(&first, &second).unwrap_err();
        assert_eq!(err, ConfigError::ReplacementCountMismatch { first: 2, second: 1 });
    }

    #[test]
    fn test_face_down_interactable() {
        let mut deck = Deck::build(&pool(&["a", "b"]), 4).unwrap();
        deck.card_mut(CardIndex(0)).unwrap().reveal();

        deck.set_face_down_interactable(false);
        assert!(deck.cards().iter().all(|c| !c.is_interactable));

        deck.set_face_down_interactable(true);
        assert!(!deck.card(CardIndex(0)).unwrap().is_interactable);
        assert!(deck.card(CardIndex(3)).unwrap().is_interactable);
    }
}
