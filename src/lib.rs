//! # quiz-round
//!
//! A timed multiple-choice quiz round engine.
//!
//! ## Design Principles
//!
//! 1. **No Clock Inside**: The engine is a pure state machine advanced by
//!    commands and one-second ticks. Time comes from a `TickScheduler`.
//!
//! 2. **Guard, Don't Fail**: Commands issued in the wrong state are no-ops
//!    reported through `bool`/`Option`. Malformed packs degrade scoring
//!    instead of panicking.
//!
//! 3. **Own Your Copies**: A round deep-copies its pack at start. Shuffling
//!    and later edits never cross between the round and the pack.
//!
//! ## Architecture
//!
//! - **Single Timer Phase**: Countdown and feedback pause share one tick
//!   source; a `TimerPhase` field decides which one a tick belongs to.
//!
//! - **Epoch-Guarded Ticks**: Every arm/stop bumps a `TimerEpoch`, so ticks
//!   from a replaced timer are dropped.
//!
//! - **Injectable Randomness**: Shuffling draws from a seedable ChaCha8
//!   `RoundRng`; production seeds from entropy.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration
//! - `pack`: Questions, packs, and the active-pack provider
//! - `round`: Shuffler, round engine, events, snapshots
//! - `schedule`: Clocks and the tick scheduler
//! - `session`: Play-mode glue between provider and engine
//! - `error`: Pack validation and config errors
//! - `logging`: `tracing` subscriber setup

pub mod core;
pub mod pack;
pub mod round;
pub mod schedule;
pub mod session;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use crate::core::{RoundConfig, RoundRng};

pub use crate::pack::{
    AnswerOption, Question, QuestionPack, PackDifficulty,
    PackChange, PackId, PackProvider,
};

pub use crate::round::{
    RoundEngine, RoundEvent, RoundSnapshot, RoundState, RoundStatus,
    Feedback, Verdict, Shuffler, SubscriptionId, TimerEpoch, TimerPhase,
};

pub use crate::schedule::{Clock, ManualClock, SystemClock, TickScheduler};

pub use crate::session::PlaySession;

pub use crate::error::{ConfigError, PackError};
