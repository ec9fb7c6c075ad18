//! Error types.
//!
//! The round engine itself never returns errors: commands issued in the
//! wrong state are guarded no-ops. These types cover pack validation and
//! configuration loading, which run outside the round.

use thiserror::Error;

/// Problems found by [`QuestionPack::validate`](crate::pack::QuestionPack::validate).
///
/// `question` fields are 0-based indices into the pack's question list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackError {
    #[error("pack has no questions")]
    NoQuestions,

    #[error("time per question must be at least one second")]
    ZeroTimeBudget,

    #[error("question {question} has empty text")]
    EmptyText { question: usize },

    #[error("question {question} has {found} options, expected {expected}")]
    OptionCount {
        question: usize,
        found: usize,
        expected: usize,
    },

    #[error("question {question} has no correct option")]
    NoCorrectOption { question: usize },

    #[error("question {question} has {found} correct options, expected exactly one")]
    MultipleCorrectOptions { question: usize, found: usize },
}

/// Errors while loading a [`RoundConfig`](crate::core::RoundConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse round config TOML")]
    Parse(#[source] toml::de::Error),

    #[error("default time per question must be at least one second")]
    ZeroDefaultTimeBudget,
}
