//! Session configuration.
//!
//! Hosts configure a session at startup by providing:
//! - the face pool cards are dealt from
//! - the board size (number of card slots)
//! - feedback delays for mismatches and completion checks
//!
//! `SessionConfig` is serde (de)serializable so hosts can keep it in a
//! JSON or bincode asset.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::Face;

/// Default wait before a mismatched pair flips back.
pub const DEFAULT_MISMATCH_FEEDBACK_DELAY: Duration = Duration::from_millis(1000);

/// Default wait between a match and the completion check.
pub const DEFAULT_COMPLETION_CHECK_DELAY: Duration = Duration::from_millis(500);

/// How the face pool relates to the board size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolPolicy {
    /// Every face in the pool is used exactly twice.
    #[default]
    Exact,
    /// The pool may be larger than the board; the faces used are drawn
    /// at random without replacement.
    Sample,
}

/// Complete session configuration.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use card_match::cards::Face;
/// use card_match::core::{PoolPolicy, SessionConfig};
///
/// let config = SessionConfig::new(vec![Face::new("a"), Face::new("b")], 4)
///     .with_mismatch_feedback_delay(Duration::from_millis(800))
///     .with_seed(7);
///
/// assert_eq!(config.pairs_needed(), 2);
/// assert_eq!(config.pool_policy, PoolPolicy::Exact);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Faces available for dealing. Keys must be unique.
    pub face_pool: Vec<Face>,

    /// Number of card slots on the board.
    pub board_size: usize,

    /// How long a mismatched pair stays face up.
    pub mismatch_feedback_delay: Duration,

    /// How long after a match the completion check runs.
    pub completion_check_delay: Duration,

    /// Relationship between pool and board.
    #[serde(default)]
    pub pool_policy: PoolPolicy,

    /// Seed for face sampling and layout shuffling.
    #[serde(default)]
    pub seed: u64,
}

impl SessionConfig {
    /// Create a configuration with default delays.
    pub fn new(face_pool: Vec<Face>, board_size: usize) -> Self {
        Self {
            face_pool,
            board_size,
            mismatch_feedback_delay: DEFAULT_MISMATCH_FEEDBACK_DELAY,
            completion_check_delay: DEFAULT_COMPLETION_CHECK_DELAY,
            pool_policy: PoolPolicy::default(),
            seed: 0,
        }
    }

    /// Set the mismatch feedback delay.
    #[must_use]
    pub fn with_mismatch_feedback_delay(mut self, delay: Duration) -> Self {
        self.mismatch_feedback_delay = delay;
        self
    }

    /// Set the completion check delay.
    #[must_use]
    pub fn with_completion_check_delay(mut self, delay: Duration) -> Self {
        self.completion_check_delay = delay;
        self
    }

    /// Resolve everything on the spot: no feedback or completion delay.
    #[must_use]
    pub fn without_delays(self) -> Self {
        self.with_mismatch_feedback_delay(Duration::ZERO)
            .with_completion_check_delay(Duration::ZERO)
    }

    /// Draw a subset of a larger pool.
    #[must_use]
    pub fn sampled(mut self) -> Self {
        self.pool_policy = PoolPolicy::Sample;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of distinct faces the board needs.
    #[must_use]
    pub fn pairs_needed(&self) -> usize {
        self.board_size / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::new(vec![Face::new("a")], 2);

        assert_eq!(config.mismatch_feedback_delay, DEFAULT_MISMATCH_FEEDBACK_DELAY);
        assert_eq!(config.completion_check_delay, DEFAULT_COMPLETION_CHECK_DELAY);
        assert_eq!(config.pool_policy, PoolPolicy::Exact);
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::new(vec![Face::new("a"), Face::new("b")], 2)
            .sampled()
            .without_delays()
            .with_seed(99);

        assert_eq!(config.pool_policy, PoolPolicy::Sample);
        assert_eq!(config.mismatch_feedback_delay, Duration::ZERO);
        assert_eq!(config.completion_check_delay, Duration::ZERO);
        assert_eq!(config.seed, 99);
        assert_eq!(config.pairs_needed(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SessionConfig::new(vec![Face::new("a").with_text("A")], 2).with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        let restored: SessionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn test_json_optional_fields() {
        let json = r#"{
            "face_pool": [{"key": "a", "sprite": null, "text": null}],
            "board_size": 2,
            "mismatch_feedback_delay": {"secs": 1, "nanos": 0},
            "completion_check_delay": {"secs": 0, "nanos": 0}
        }"#;
        let config: SessionConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.pool_policy, PoolPolicy::Exact);
        assert_eq!(config.seed, 0);
        assert_eq!(config.mismatch_feedback_delay, Duration::from_secs(1));
    }
}
