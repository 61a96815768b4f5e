//! Events a session emits for the host.
//!
//! The session never plays sounds or animates cards. It queues events and
//! the host's audio/visual layers react to them.

use serde::{Deserialize, Serialize};

use crate::core::index::{CardIndex, PairIndices};

/// Something observable happened on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A card turned face up.
    CardRevealed(CardIndex),
    /// Two cards matched and are locked face up.
    Matched(PairIndices),
    /// Two cards did not match. They stay face up for the feedback delay.
    Mismatched(PairIndices),
    /// A mismatched pair turned face down again; input is re-enabled.
    CardsHidden(PairIndices),
    /// Every pair is matched. Emitted once per session.
    SessionEnded,
}

impl SessionEvent {
    /// The pair this event concerns, if any.
    #[must_use]
    pub fn pair(&self) -> Option<PairIndices> {
        match self {
            SessionEvent::Matched(pair)
            | SessionEvent::Mismatched(pair)
            | SessionEvent::CardsHidden(pair) => Some(*pair),
            SessionEvent::CardRevealed(_) | SessionEvent::SessionEnded => None,
        }
    }
}
