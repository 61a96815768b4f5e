//! Session layer: progress tracking, events and the host-facing `Session`.
//!
//! ## Key Types
//!
//! - `SessionController`: Counts matched pairs, fires completion once
//! - `SessionEvent`: What the host's audio/visual layers react to
//! - `Session`: Deck, coordinator, controller and timers wired together
//! - `SessionSnapshot`: Saved session, encoded with `bincode`

pub mod controller;
pub mod event;
#[allow(clippy::module_inception)]
mod session;

pub use controller::{SessionController, SessionState};
pub use event::SessionEvent;
pub use session::{Deferred, Session, SessionSnapshot};
