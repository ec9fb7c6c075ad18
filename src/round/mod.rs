//! The round engine and its pieces.
//!
//! ## Key Types
//!
//! - `Shuffler`: Fisher–Yates over an injected random source
//! - `RoundEngine`: lifecycle, sequencing, scoring, timeouts, feedback pause
//! - `RoundSnapshot` / `RoundStatus`: engine-owned state and its render view
//! - `RoundEvent`: change notifications for observers
//!
//! ## Timing
//!
//! The engine has no clock. Something outside calls [`RoundEngine::tick`]
//! once per second (see [`crate::schedule::TickScheduler`]); the engine's
//! [`TimerPhase`] decides whether that second belongs to the countdown or
//! the feedback pause.

mod engine;
mod events;
mod feedback;
mod shuffle;
mod state;

pub use engine::RoundEngine;
pub use events::{ObserverRegistry, RoundEvent, SubscriptionId};
pub use feedback::{Feedback, Verdict};
pub use shuffle::Shuffler;
pub use state::{OptionList, RoundSnapshot, RoundState, RoundStatus, TimerEpoch, TimerPhase};
