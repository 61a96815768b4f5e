//! Session bookkeeping: matched pairs and completion.

use serde::{Deserialize, Serialize};

use crate::core::index::PairIndices;

/// Progress of one play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionState {
    pub matched_pair_count: usize,
    pub total_pairs: usize,
    /// Set exactly once, by the completion check that sees every pair
    /// matched.
    pub ended: bool,
}

impl SessionState {
    /// Check if every pair is matched (whether or not the end has fired).
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.matched_pair_count == self.total_pairs
    }

    /// Pairs still face down.
    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.total_pairs.saturating_sub(self.matched_pair_count)
    }
}

/// Observes pair outcomes and decides when the session is over.
///
/// ## Usage
///
/// ```
/// use card_match::core::{CardIndex, PairIndices};
/// use card_match::session::SessionController;
///
/// let mut controller = SessionController::new(1);
/// controller.on_match(PairIndices::new(CardIndex(0), CardIndex(1)));
///
/// assert!(controller.check_completion());
/// assert!(!controller.check_completion()); // fires once
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionController {
    state: SessionState,
    /// Resolved pairs, matched or not.
    attempts: usize,
}

impl SessionController {
    /// Create a controller for a board of `total_pairs` pairs.
    #[must_use]
    pub fn new(total_pairs: usize) -> Self {
        Self {
            state: SessionState {
                total_pairs,
                ..SessionState::default()
            },
            attempts: 0,
        }
    }

    /// Record a matched pair.
    pub fn on_match(&mut self, pair: PairIndices) {
        self.attempts += 1;
        if self.state.all_matched() {
            log::warn!("match {} reported after every pair was matched", pair);
            return;
        }
        self.state.matched_pair_count += 1;
    }

    /// Record a mismatched pair. The matched count is unchanged.
    pub fn on_mismatch(&mut self, _pair: PairIndices) {
        self.attempts += 1;
    }

    /// End the session if every pair is matched.
    ///
    /// Returns `true` only on the call that ends it.
    pub fn check_completion(&mut self) -> bool {
        if self.state.ended || !self.state.all_matched() {
            return false;
        }
        self.state.ended = true;
        log::info!(
            "session complete: {} pairs in {} attempts",
            self.state.total_pairs,
            self.attempts
        );
        true
    }

    /// Current progress.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of resolved pairs, matched or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Start over for a board of `total_pairs` pairs.
    pub fn reset(&mut self, total_pairs: usize) {
        *self = Self::new(total_pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::index::CardIndex;

    fn pair(a: u32, b: u32) -> PairIndices {
        PairIndices::new(CardIndex(a), CardIndex(b))
    }

    #[test]
    fn test_match_increments_count() {
        let mut controller = SessionController::new(2);
        controller.on_match(pair(0, 1));

        assert_eq!(controller.state().matched_pair_count, 1);
        assert_eq!(controller.state().remaining_pairs(), 1);
        assert_eq!(controller.attempts(), 1);
    }

    #[test]
    fn test_mismatch_keeps_count() {
        let mut controller = SessionController::new(2);
        controller.on_mismatch(pair(0, 1));

        assert_eq!(controller.state().matched_pair_count, 0);
        assert_eq!(controller.attempts(), 1);
    }

    #[test]
    fn test_completion_only_when_all_matched() {
        let mut controller = SessionController::new(2);
        controller.on_match(pair(0, 1));
        assert!(!controller.check_completion());
        assert!(!controller.state().ended);

        controller.on_match(pair(2, 3));
        assert!(controller.check_completion());
        assert!(controller.state().ended);
        assert!(!controller.check_completion());
    }

    #[test]
    fn test_extra_match_is_not_counted() {
        let mut controller = SessionController::new(1);
        controller.on_match(pair(0, 1));
        controller.on_match(pair(0, 1));

        assert_eq!(controller.state().matched_pair_count, 1);
    }

    #[test]
    fn test_reset() {
        let mut controller = SessionController::new(1);
        controller.on_match(pair(0, 1));
        controller.check_completion();

        controller.reset(3);

        assert_eq!(*controller.state(), SessionState {
            matched_pair_count: 0,
            total_pairs: 3,
            ended: false,
        });
        assert_eq!(controller.attempts(), 0);
    }
}
