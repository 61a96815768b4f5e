//! Pair matching: flip handling and pair resolution.
//!
//! `MatchCoordinator` is the only writer of card flip state during play.
//! It exposes the pair state machine; timing (how long a mismatch stays
//! visible) is left to the caller.

pub mod coordinator;

pub use coordinator::{FlipOutcome, MatchCoordinator, MatchPhase};
