//! # card-match
//!
//! A memory card matching engine driven by an external frame loop.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: No threads, no blocking. The host calls `flip` for
//!    input, `advance` once per frame, and drains events.
//!
//! 2. **Strict Pairing**: Every face key sits on exactly two cards. Any
//!    configuration that cannot guarantee this fails at construction.
//!
//! 3. **One Pair At A Time**: While a pair resolves, the whole board
//!    rejects input. Flips are ignored, never queued.
//!
//! ## Flow
//!
//! ```text
//! Deck::build ─▶ shuffle ─▶ flip ─▶ MatchCoordinator ─┬─ match ────▶ lock ─▶ completion check
//!                                                     └─ mismatch ─▶ delay ─▶ flip back
//! ```
//!
//! ## Modules
//!
//! - `core`: Card indices, RNG, configuration, errors
//! - `cards`: Faces and card instances
//! - `deck`: Board building, shuffling, pairing validation
//! - `timer`: Cancellable deferred work on a frame clock
//! - `matching`: The pair-resolution state machine
//! - `session`: Completion tracking, events, and the host-facing `Session`

pub mod core;
pub mod cards;
pub mod deck;
pub mod timer;
pub mod matching;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardIndex, PairIndices,
    GameRng, GameRngState,
    PoolPolicy, SessionConfig,
    ConfigError, InvalidFlip, MatchError, SnapshotError,
};

pub use crate::cards::{Card, Face, FaceColor, FaceKey};

pub use crate::deck::Deck;

pub use crate::timer::{Scheduler, TimerId};

pub use crate::matching::{FlipOutcome, MatchCoordinator, MatchPhase};

pub use crate::session::{
    Session, SessionController, SessionEvent, SessionSnapshot, SessionState,
};
