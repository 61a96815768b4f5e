//! A play session: deck, coordinator, controller and timers wired together.
//!
//! The host drives a `Session` from its frame loop:
//!
//! 1. `flip(index)` for every input event, in arrival order
//! 2. `advance(dt)` once per frame
//! 3. `drain_events()` to feed audio/visual layers
//!
//! Mismatch feedback and the post-match completion check are deferred
//! through the session's `Scheduler`, so nothing ever blocks the frame.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::controller::{SessionController, SessionState};
use super::event::SessionEvent;
use crate::core::config::{PoolPolicy, SessionConfig};
use crate::core::error::{ConfigError, InvalidFlip, MatchError, SnapshotError};
use crate::core::index::CardIndex;
use crate::core::rng::{GameRng, GameRngState};
use crate::deck::Deck;
use crate::matching::{FlipOutcome, MatchCoordinator, MatchPhase};
use crate::timer::Scheduler;

/// Work a session defers to a later frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// Flip the mismatched pair back face down.
    HideMismatch,
    /// See whether the last match finished the board.
    CheckCompletion,
}

/// One play session.
///
/// ## Usage
///
/// ```
/// use std::time::Duration;
/// use card_match::core::{CardIndex, SessionConfig};
/// use card_match::deck::Deck;
/// use card_match::session::{Session, SessionEvent};
///
/// let deck = Deck::from_layout(["a", "b", "a", "b"]).unwrap();
/// let config = SessionConfig::new(Vec::new(), 4)
///     .with_mismatch_feedback_delay(Duration::from_millis(500));
/// let mut session = Session::with_deck(deck, config).unwrap();
///
/// session.flip(CardIndex(0));
/// session.flip(CardIndex(1));
/// session.advance(Duration::from_millis(500));
///
/// let events = session.drain_events();
/// assert!(matches!(events.last(), Some(SessionEvent::CardsHidden(_))));
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    deck: Deck,
    coordinator: MatchCoordinator,
    controller: SessionController,
    scheduler: Scheduler<Deferred>,
    rng: GameRng,
    /// Host-supplied layout, reshuffled on restart.
    layout: Option<Deck>,
    events: Vec<SessionEvent>,
    torn_down: bool,
}

impl Session {
    /// Deal a shuffled board from the configured face pool.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        let mut rng = GameRng::new(config.seed);
        let deck = deal(&config, &mut rng)?;
        log::info!(
            "session dealt: {} cards, {} pairs, seed {}",
            deck.len(),
            deck.total_pairs(),
            config.seed
        );
        Ok(Self::assemble(config, deck, rng, None))
    }

    /// Play on a board the host laid out itself.
    ///
    /// The layout is used as given (no shuffle), but every card starts
    /// face down and unlocked. `config.board_size` is replaced by the
    /// deck's length and `config.face_pool` is ignored. A restart
    /// reshuffles this layout rather than dealing from the pool.
    pub fn with_deck(mut deck: Deck, mut config: SessionConfig) -> Result<Self, ConfigError> {
        if deck.is_empty() {
            return Err(ConfigError::InvalidBoardSize(0));
        }
        deck.validate_pairing()?;
        deck.reset_cards();

        config.board_size = deck.len();
        let rng = GameRng::new(config.seed);
        Ok(Self::assemble(config, deck.clone(), rng, Some(deck)))
    }

    fn assemble(config: SessionConfig, deck: Deck, rng: GameRng, layout: Option<Deck>) -> Self {
        Self {
            controller: SessionController::new(deck.total_pairs()),
            config,
            deck,
            coordinator: MatchCoordinator::new(),
            scheduler: Scheduler::new(),
            rng,
            layout,
            events: Vec::new(),
            torn_down: false,
        }
    }

    /// Handle one input event.
    pub fn flip(&mut self, index: CardIndex) -> FlipOutcome {
        if self.torn_down || self.controller.state().ended {
            log::debug!("ignored flip of {}: session over", index);
            return FlipOutcome::Ignored(InvalidFlip::SessionOver);
        }

        let outcome = self.coordinator.flip(&mut self.deck, index);
        match outcome {
            FlipOutcome::Revealed(index) => {
                self.events.push(SessionEvent::CardRevealed(index));
            }
            FlipOutcome::Matched(pair) => {
                self.events.push(SessionEvent::CardRevealed(pair.second));
                self.controller.on_match(pair);
                self.events.push(SessionEvent::Matched(pair));
                self.defer(self.config.completion_check_delay, Deferred::CheckCompletion);
            }
            FlipOutcome::MismatchPending(pair) => {
                self.events.push(SessionEvent::CardRevealed(pair.second));
                self.controller.on_mismatch(pair);
                self.events.push(SessionEvent::Mismatched(pair));
                self.defer(self.config.mismatch_feedback_delay, Deferred::HideMismatch);
            }
            FlipOutcome::Ignored(_) | FlipOutcome::Aborted(_) => {}
        }
        outcome
    }

    /// Advance the session clock by one frame's delta.
    pub fn advance(&mut self, dt: Duration) {
        if self.torn_down {
            return;
        }
        for work in self.scheduler.advance(dt) {
            self.run(work);
        }
    }

    fn defer(&mut self, delay: Duration, work: Deferred) {
        if delay.is_zero() {
            self.run(work);
        } else {
            self.scheduler.schedule(delay, work);
        }
    }

    fn run(&mut self, work: Deferred) {
        match work {
            Deferred::HideMismatch => match self.coordinator.resolve_mismatch(&mut self.deck) {
                Ok(pair) => self.events.push(SessionEvent::CardsHidden(pair)),
                Err(MatchError::NothingPending) => {
                    log::warn!("mismatch timer fired with no pair pending");
                }
                // Logged by the coordinator; input is already re-enabled.
                Err(MatchError::InternalConsistency { .. }) => {}
            },
            Deferred::CheckCompletion => {
                if self.controller.check_completion() {
                    self.events.push(SessionEvent::SessionEnded);
                }
            }
        }
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events waiting to be drained.
    #[must_use]
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Abandon the session: cancel pending timers and discard the board.
    ///
    /// Later flips are ignored and `advance` does nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let abandoned = self.scheduler.len();
        self.scheduler.clear();
        self.coordinator.reset();
        self.deck.clear();
        self.torn_down = true;
        log::info!("session torn down, {} timers abandoned", abandoned);
    }

    /// Deal a fresh board and start over.
    ///
    /// The RNG stream continues, so a restart produces a new layout.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        let deck = match &self.layout {
            Some(layout) => {
                let mut deck = layout.clone();
                deck.shuffle(&mut self.rng);
                deck
            }
            None => deal(&self.config, &mut self.rng)?,
        };
        self.scheduler.clear();
        self.coordinator.reset();
        self.controller.reset(deck.total_pairs());
        self.deck = deck;
        self.events.clear();
        self.torn_down = false;
        log::info!("session restarted with {} cards", self.deck.len());
        Ok(())
    }

    /// Capture everything needed to resume this session later.
    ///
    /// Undrained events are not part of the snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            deck: self.deck.clone(),
            coordinator: self.coordinator.clone(),
            controller: self.controller.clone(),
            scheduler: self.scheduler.clone(),
            rng: self.rng.state(),
            layout: self.layout.clone(),
            torn_down: self.torn_down,
        }
    }

    /// Resume a session from a snapshot.
    ///
    /// Fails if the snapshot could not have come from a live session, for
    /// example a pair waiting to flip back with no timer left to do it.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        snapshot.check_consistency()?;
        Ok(Self {
            config: snapshot.config,
            deck: snapshot.deck,
            coordinator: snapshot.coordinator,
            controller: snapshot.controller,
            scheduler: snapshot.scheduler,
            rng: GameRng::from_state(&snapshot.rng),
            layout: snapshot.layout,
            events: Vec::new(),
            torn_down: snapshot.torn_down,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    #[must_use]
    pub fn phase(&self) -> MatchPhase {
        self.coordinator.phase()
    }

    /// Cards face up and unresolved.
    #[must_use]
    pub fn pending(&self) -> &[CardIndex] {
        self.coordinator.pending()
    }

    /// Resolved pairs, matched or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.controller.attempts()
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.controller.state().ended
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Number of deferred callbacks still waiting.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    /// Time until the next deferred callback fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }
}

fn deal(config: &SessionConfig, rng: &mut GameRng) -> Result<Deck, ConfigError> {
    let mut deck = match config.pool_policy {
        PoolPolicy::Exact => Deck::build(&config.face_pool, config.board_size)?,
        PoolPolicy::Sample => {
            let mut faces = rng.for_context("faces");
            Deck::sample(&config.face_pool, config.board_size, &mut faces)?
        }
    };
    deck.shuffle(rng);
    Ok(deck)
}

/// Serializable session state, encoded with `bincode`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: SessionConfig,
    pub deck: Deck,
    pub coordinator: MatchCoordinator,
    pub controller: SessionController,
    pub scheduler: Scheduler<Deferred>,
    pub rng: GameRngState,
    pub layout: Option<Deck>,
    pub torn_down: bool,
}

impl SessionSnapshot {
    /// Encode to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn check_consistency(&self) -> Result<(), SnapshotError> {
        // A torn-down session has no board left to check.
        if self.torn_down {
            return Ok(());
        }

        let state = self.controller.state();
        if state.total_pairs != self.deck.total_pairs() {
            return Err(SnapshotError::Inconsistent("pair count does not match the board"));
        }
        if self.deck.locked_count() != state.matched_pair_count * 2 {
            return Err(SnapshotError::Inconsistent("locked cards do not match the score"));
        }

        for &index in self.coordinator.pending() {
            match self.deck.card(index) {
                Some(card) if card.is_face_up && !card.is_locked => {}
                _ => return Err(SnapshotError::Inconsistent("pending card is not face up on the board")),
            }
        }

        let hide_pending = self.scheduler.payloads().any(|w| *w == Deferred::HideMismatch);
        if (self.coordinator.phase() == MatchPhase::Resolving) != hide_pending {
            return Err(SnapshotError::Inconsistent("mismatch timer does not match the resolving pair"));
        }
        Ok(())
    }
}
