//! Flip coordination: the pair-resolution state machine.
//!
//! ## Phases
//!
//! ```text
//! Idle ──flip──▶ OneSelected ──flip──▶ Resolving ──match──────────▶ Idle
//!                                          │
//!                                          └──resolve_mismatch──▶ Idle
//! ```
//!
//! Only one pair resolves at a time. While `Resolving`, every flip is
//! ignored rather than queued, and every face-down card is marked
//! non-interactable.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::error::{InvalidFlip, MatchError};
use crate::core::index::{CardIndex, PairIndices};
use crate::deck::Deck;

/// Where the coordinator is in pair resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchPhase {
    /// No card pending.
    #[default]
    Idle,
    /// One card face up, waiting for its partner.
    OneSelected,
    /// Two cards face up; the board is blocked until they resolve.
    Resolving,
}

/// What a flip did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// First card of a pair turned face up.
    Revealed(CardIndex),
    /// Second card completed a matching pair; both are locked.
    Matched(PairIndices),
    /// Second card completed a non-matching pair. The board stays blocked
    /// until `resolve_mismatch` runs.
    MismatchPending(PairIndices),
    /// Nothing changed.
    Ignored(InvalidFlip),
    /// Resolution hit an inconsistent board and was abandoned; input is
    /// re-enabled.
    Aborted(MatchError),
}

impl FlipOutcome {
    /// Check whether the flip changed any state.
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipOutcome::Ignored(_))
    }
}

/// Tracks the pending selection and resolves pairs against a `Deck`.
///
/// The coordinator holds no cards itself; every call borrows the deck it
/// acts on, so the deck stays single-writer.
///
/// ## Usage
///
/// ```
/// use card_match::core::CardIndex;
/// use card_match::deck::Deck;
/// use card_match::matching::{FlipOutcome, MatchCoordinator, MatchPhase};
///
/// let mut deck = Deck::from_layout(["a", "b", "a", "b"]).unwrap();
/// let mut coordinator = MatchCoordinator::new();
///
/// coordinator.flip(&mut deck, CardIndex(0));
/// let outcome = coordinator.flip(&mut deck, CardIndex(2));
///
/// assert!(matches!(outcome, FlipOutcome::Matched(_)));
/// assert_eq!(coordinator.phase(), MatchPhase::Idle);
/// assert!(deck.card(CardIndex(2)).unwrap().is_locked);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCoordinator {
    phase: MatchPhase,
    pending: SmallVec<[CardIndex; 2]>,
}

impl MatchCoordinator {
    /// Create an idle coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Cards currently face up and unresolved, in flip order.
    #[must_use]
    pub fn pending(&self) -> &[CardIndex] {
        &self.pending
    }

    /// The pair awaiting `resolve_mismatch`, if any.
    #[must_use]
    pub fn pending_pair(&self) -> Option<PairIndices> {
        match self.pending.as_slice() {
            [first, second] => Some(PairIndices::new(*first, *second)),
            _ => None,
        }
    }

    /// Check if the board rejects input.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.phase == MatchPhase::Resolving
    }

    /// Handle a flip request.
    ///
    /// Invalid requests are ignored and reported through
    /// `FlipOutcome::Ignored`; they never change state.
    pub fn flip(&mut self, deck: &mut Deck, index: CardIndex) -> FlipOutcome {
        if let Err(reason) = self.check_flip(deck, index) {
            log::debug!("ignored flip of {}: {}", index, reason);
            return FlipOutcome::Ignored(reason);
        }

        match self.phase {
            MatchPhase::Idle => {
                self.reveal(deck, index);
                self.phase = MatchPhase::OneSelected;
                log::debug!("{} selected", index);
                FlipOutcome::Revealed(index)
            }
            MatchPhase::OneSelected => {
                self.reveal(deck, index);
                self.phase = MatchPhase::Resolving;
                deck.set_face_down_interactable(false);
                self.compare(deck)
            }
            // Rejected by check_flip.
            MatchPhase::Resolving => FlipOutcome::Ignored(InvalidFlip::Blocked),
        }
    }

    fn check_flip(&self, deck: &Deck, index: CardIndex) -> Result<(), InvalidFlip> {
        if self.phase == MatchPhase::Resolving {
            return Err(InvalidFlip::Blocked);
        }
        let card = deck.card(index).ok_or(InvalidFlip::OutOfRange(index))?;
        if card.is_locked {
            return Err(InvalidFlip::Locked(index));
        }
        if self.pending.contains(&index) {
            return Err(InvalidFlip::AlreadyPending(index));
        }
        if !card.is_interactable {
            return Err(InvalidFlip::Blocked);
        }
        Ok(())
    }

    fn reveal(&mut self, deck: &mut Deck, index: CardIndex) {
        if let Some(card) = deck.card_mut(index) {
            card.reveal();
        }
        self.pending.push(index);
    }

    fn compare(&mut self, deck: &mut Deck) -> FlipOutcome {
        let Some(pair) = self.pending_pair() else {
            return FlipOutcome::Aborted(MatchError::NothingPending);
        };

        if let Some(missing) = pair.as_array().into_iter().find(|&i| deck.card(i).is_none()) {
            return self.abort(deck, missing);
        }
        let is_match = match (deck.card(pair.first), deck.card(pair.second)) {
            (Some(first), Some(second)) => first.matches(second),
            _ => false,
        };

        if is_match {
            for index in pair.as_array() {
                if let Some(card) = deck.card_mut(index) {
                    card.lock();
                }
            }
            self.finish(deck);
            log::debug!("pair {} matched", pair);
            FlipOutcome::Matched(pair)
        } else {
            log::debug!("pair {} mismatched, waiting for feedback", pair);
            FlipOutcome::MismatchPending(pair)
        }
    }

    /// Flip a mismatched pair back face down and unblock the board.
    ///
    /// Called once the mismatch feedback delay has elapsed. If one of the
    /// cards has disappeared from the deck, the survivor is still hidden,
    /// input is re-enabled, and the missing index is reported.
    pub fn resolve_mismatch(&mut self, deck: &mut Deck) -> Result<PairIndices, MatchError> {
        let pair = match (self.phase, self.pending_pair()) {
            (MatchPhase::Resolving, Some(pair)) => pair,
            _ => return Err(MatchError::NothingPending),
        };

        let mut missing = None;
        for index in pair.as_array() {
            match deck.card_mut(index) {
                Some(card) => card.hide(),
                None => missing = Some(index),
            }
        }
        self.finish(deck);

        if let Some(index) = missing {
            log::error!("mismatch {} resolved without {}, board inconsistent", pair, index);
            return Err(MatchError::InternalConsistency { index });
        }

        log::debug!("pair {} flipped back", pair);
        Ok(pair)
    }

    fn abort(&mut self, deck: &mut Deck, missing: CardIndex) -> FlipOutcome {
        log::error!("companion {} missing, aborting pair resolution", missing);
        let pending = std::mem::take(&mut self.pending);
        for index in pending {
            if let Some(card) = deck.card_mut(index) {
                card.hide();
            }
        }
        self.finish(deck);
        FlipOutcome::Aborted(MatchError::InternalConsistency { index: missing })
    }

    fn finish(&mut self, deck: &mut Deck) {
        self.pending.clear();
        self.phase = MatchPhase::Idle;
        deck.set_face_down_interactable(true);
    }

    /// Drop the pending selection without touching any card.
    ///
    /// Used when the session is torn down or restarted.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.phase = MatchPhase::Idle;
    }
}
