//! Core engine types: random source and configuration.
//!
//! These are shared by the pack, round, and session layers and carry no
//! round state of their own.

pub mod rng;
pub mod config;

pub use rng::RoundRng;
pub use config::{RoundConfig, DEFAULT_FEEDBACK_DELAY_SECONDS, DEFAULT_TIME_PER_QUESTION_SECONDS};
