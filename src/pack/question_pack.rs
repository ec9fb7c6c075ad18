//! Question packs.
//!
//! A pack is the unit a player chooses to play: a named, ordered list of
//! questions plus the time allowed per question.

use serde::{Deserialize, Serialize};

use super::question::{Question, EXPECTED_OPTION_COUNT};
use crate::core::DEFAULT_TIME_PER_QUESTION_SECONDS;
use crate::error::PackError;

/// Pack difficulty label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for PackDifficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PackDifficulty::Easy => "Easy",
            PackDifficulty::Medium => "Medium",
            PackDifficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

/// A playable question pack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionPack {
    /// Display name.
    pub name: String,

    /// Difficulty label.
    pub difficulty: PackDifficulty,

    /// Category label, if the pack belongs to one.
    pub category: Option<String>,

    /// Seconds the player gets for each question.
    pub time_per_question_seconds: u32,

    /// Questions in authored order.
    pub questions: Vec<Question>,
}

impl Default for QuestionPack {
    fn default() -> Self {
        Self {
            name: "New Pack".to_string(),
            difficulty: PackDifficulty::default(),
            category: None,
            time_per_question_seconds: DEFAULT_TIME_PER_QUESTION_SECONDS,
            questions: Vec::new(),
        }
    }
}

impl QuestionPack {
    /// Create an empty pack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the time budget (builder pattern).
    #[must_use]
    pub fn with_time_per_question(mut self, seconds: u32) -> Self {
        self.time_per_question_seconds = seconds;
        self
    }

    /// Set the difficulty (builder pattern).
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: PackDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the category (builder pattern).
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Add a question (builder pattern).
    #[must_use]
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// "Name (Difficulty)", as shown in pack pickers.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.difficulty)
    }

    /// Questions in authored order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// True iff a round can be started from this pack.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.questions.is_empty()
    }

    /// Check the authoring contract the round engine relies on.
    ///
    /// The engine tolerates packs that fail this check. Providers call it
    /// before accepting edits or imports.
    pub fn validate(&self) -> Result<(), PackError> {
        if self.questions.is_empty() {
            return Err(PackError::NoQuestions);
        }
        if self.time_per_question_seconds == 0 {
            return Err(PackError::ZeroTimeBudget);
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.text().trim().is_empty() {
                return Err(PackError::EmptyText { question: index });
            }
            if question.options().len() != EXPECTED_OPTION_COUNT {
                return Err(PackError::OptionCount {
                    question: index,
                    found: question.options().len(),
                    expected: EXPECTED_OPTION_COUNT,
                });
            }
            match question.correct_count() {
                0 => return Err(PackError::NoCorrectOption { question: index }),
                1 => {}
                found => {
                    return Err(PackError::MultipleCorrectOptions {
                        question: index,
                        found,
                    })
                }
            }
        }

        Ok(())
    }
}
