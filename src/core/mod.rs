//! Core types: card indices, RNG, configuration, errors.

pub mod index;
pub mod rng;
pub mod config;
pub mod error;

pub use index::{CardIndex, PairIndices};
pub use rng::{GameRng, GameRngState};
pub use config::{PoolPolicy, SessionConfig, DEFAULT_COMPLETION_CHECK_DELAY, DEFAULT_MISMATCH_FEEDBACK_DELAY};
pub use error::{ConfigError, InvalidFlip, MatchError, SnapshotError};
