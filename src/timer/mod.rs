//! Deferred work on a frame-driven clock.
//!
//! The host owns the frame loop and calls `Scheduler::advance` with each
//! frame's delta. Nothing blocks: a delay is a timer whose payload comes
//! back from `advance` once its deadline has passed.
//!
//! ## Behavior
//!
//! - `schedule()`: Queue a payload `delay` from now, returns a `TimerId`
//! - `cancel()`: Drop one timer before it fires
//! - `advance()`: Move the clock, return due payloads in deadline order
//!   (ties fire in scheduling order)
//! - `clear()`: Abandon everything (session teardown)

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct ScheduledTimer<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

/// Cancellable timers keyed by deadline.
///
/// ## Usage
///
/// ```
/// use std::time::Duration;
/// use card_match::timer::Scheduler;
///
/// let mut scheduler = Scheduler::new();
/// scheduler.schedule(Duration::from_millis(300), "hide");
/// let dropped = scheduler.schedule(Duration::from_millis(100), "never");
/// scheduler.cancel(dropped);
///
/// assert!(scheduler.advance(Duration::from_millis(200)).is_empty());
/// assert_eq!(scheduler.advance(Duration::from_millis(100)), vec!["hide"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    /// Sorted by deadline, then by id.
    timers: Vec<ScheduledTimer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value: the sum of every `advance` so far.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queue `payload` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let deadline = self.now.saturating_add(delay);
        // Ids grow monotonically, so inserting after every timer with an
        // equal or earlier deadline keeps ties in scheduling order.
        let at = self.timers.partition_point(|t| t.deadline <= deadline);
        self.timers.insert(at, ScheduledTimer { id, deadline, payload });
        id
    }

    /// Drop a timer before it fires.
    ///
    /// Returns the payload, or `None` if the timer already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let pos = self.timers.iter().position(|t| t.id == id)?;
        Some(self.timers.remove(pos).payload)
    }

    /// Check if a timer is still waiting.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Move the clock forward by `dt` and return every due payload.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let due = self.timers.partition_point(|t| t.deadline <= self.now);
        self.timers.drain(..due).map(|t| t.payload).collect()
    }

    /// Time left until the next timer fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .first()
            .map(|t| t.deadline.saturating_sub(self.now))
    }

    /// Payloads still waiting, in firing order.
    pub fn payloads(&self) -> impl Iterator<Item = &T> {
        self.timers.iter().map(|t| &t.payload)
    }

    /// Number of waiting timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Check if nothing is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Abandon every waiting timer. The clock keeps its value.
    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
