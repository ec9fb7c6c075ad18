//! Round engine configuration.
//!
//! Presentation layers configure the engine at startup with a `RoundConfig`.
//! Every field has a default, so a TOML file only needs the keys it changes:
//!
//! ```
//! use quiz_round::core::RoundConfig;
//!
//! let config = RoundConfig::from_toml_str("feedback_delay_seconds = 3").unwrap();
//! assert_eq!(config.feedback_delay_seconds, 3);
//! assert!(config.shuffle_questions);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default feedback pause between questions, in seconds.
pub const DEFAULT_FEEDBACK_DELAY_SECONDS: u32 = 2;

/// Default per-question time budget, in seconds.
pub const DEFAULT_TIME_PER_QUESTION_SECONDS: u32 = 20;

/// Round engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    /// Seconds of feedback shown after an answer or timeout before advancing.
    pub feedback_delay_seconds: u32,

    /// Time budget used when a pack reports zero seconds per question.
    pub default_time_per_question_seconds: u32,

    /// Shuffle question order at round start.
    pub shuffle_questions: bool,

    /// Shuffle option order each time a question loads.
    pub shuffle_options: bool,

    /// Fixed shuffle seed. `None` draws a fresh seed from system randomness.
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            feedback_delay_seconds: DEFAULT_FEEDBACK_DELAY_SECONDS,
            default_time_per_question_seconds: DEFAULT_TIME_PER_QUESTION_SECONDS,
            shuffle_questions: true,
            shuffle_options: true,
            seed: None,
        }
    }
}

impl RoundConfig {
    /// Parse a config from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(ConfigError::Parse)?;
        if config.default_time_per_question_seconds == 0 {
            return Err(ConfigError::ZeroDefaultTimeBudget);
        }
        Ok(config)
    }

    /// Set a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the feedback pause length.
    #[must_use]
    pub fn with_feedback_delay(mut self, seconds: u32) -> Self {
        self.feedback_delay_seconds = seconds;
        self
    }

    /// Set the fallback time budget.
    #[must_use]
    pub fn with_default_time_per_question(mut self, seconds: u32) -> Self {
        self.default_time_per_question_seconds = seconds;
        self
    }

    /// Keep questions in pack order.
    #[must_use]
    pub fn without_question_shuffle(mut self) -> Self {
        self.shuffle_questions = false;
        self
    }

    /// Keep options in authored order.
    #[must_use]
    pub fn without_option_shuffle(mut self) -> Self {
        self.shuffle_options = false;
        self
    }

    /// Resolve the countdown length for a pack's time budget.
    #[must_use]
    pub fn time_budget(&self, pack_seconds: u32) -> u32 {
        if pack_seconds > 0 {
            pack_seconds
        } else {
            self.default_time_per_question_seconds
        }
    }
}
