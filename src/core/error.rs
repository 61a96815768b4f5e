//! Error taxonomy.
//!
//! Of the gameplay errors only `ConfigError` reaches a caller as a hard failure, from
//! deck and session construction. `InvalidFlip` describes why a flip was
//! ignored and travels inside `FlipOutcome::Ignored`. `MatchError` is
//! recovered locally by the coordinator after logging. `SnapshotError`
//! covers saving and loading a session.

use thiserror::Error;

use super::index::CardIndex;

/// Deck or session configuration that cannot produce a strictly paired board.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size must be a positive even number, got {0}")]
    InvalidBoardSize(usize),

    #[error("face pool has {pool} faces but a board of {slots} slots needs {needed}")]
    PoolSizeMismatch {
        pool: usize,
        slots: usize,
        needed: usize,
    },

    #[error("face key `{0}` appears more than once in the face pool")]
    DuplicateFaceKey(String),

    #[error("replacement lists differ in length: {first} first vs {second} second")]
    ReplacementCountMismatch { first: usize, second: usize },

    #[error("{index} is out of range for a board of {len} cards")]
    IndexOutOfRange { index: CardIndex, len: usize },

    #[error("face key `{key}` appears on {count} cards, expected exactly 2")]
    BrokenPairing { key: String, count: usize },
}

/// Why a flip was ignored. Never a hard failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum InvalidFlip {
    #[error("{0} is not on the board")]
    OutOfRange(CardIndex),

    #[error("{0} is already matched")]
    Locked(CardIndex),

    #[error("{0} is already face up and pending")]
    AlreadyPending(CardIndex),

    #[error("board is blocked while a pair resolves")]
    Blocked,

    #[error("session is over")]
    SessionOver,
}

/// Failures inside pair resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("pending {index} no longer exists on the board")]
    InternalConsistency { index: CardIndex },

    #[error("no pair is waiting for resolution")]
    NothingPending,
}

/// A session snapshot could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(&'static str),
}
