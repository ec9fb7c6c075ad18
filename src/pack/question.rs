//! Questions and their answer options.
//!
//! Both types are immutable once built. The round engine works on its own
//! clones, so shuffling a round never reorders the authored pack.

use serde::{Deserialize, Serialize};

/// Number of options a well-formed question carries.
pub const EXPECTED_OPTION_COUNT: usize = 4;

/// A single answer choice.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerOption {
    text: String,
    is_correct: bool,
}

impl AnswerOption {
    /// Create an option.
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    /// Create the correct option.
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// Create a wrong option.
    pub fn wrong(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// Text shown to the player.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether choosing this option scores a point.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

/// A question with its ordered options.
///
/// Exactly one correct option among four is expected but not enforced here;
/// see [`QuestionPack::validate`](super::QuestionPack::validate).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    text: String,
    options: Vec<AnswerOption>,
}

impl Question {
    /// Create a question.
    pub fn new(text: impl Into<String>, options: impl IntoIterator<Item = AnswerOption>) -> Self {
        Self {
            text: text.into(),
            options: options.into_iter().collect(),
        }
    }

    /// Shorthand for the common shape: one correct answer, the rest wrong.
    ///
    /// ```
    /// use quiz_round::pack::Question;
    ///
    /// let q = Question::with_answer("2 + 2?", "4", ["3", "5", "22"]);
    /// assert_eq!(q.options().len(), 4);
    /// assert_eq!(q.correct_option().map(|o| o.text()), Some("4"));
    /// ```
    pub fn with_answer<I, S>(text: impl Into<String>, correct: impl Into<String>, wrong: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = std::iter::once(AnswerOption::correct(correct))
            .chain(wrong.into_iter().map(AnswerOption::wrong));
        Self::new(text, options)
    }

    /// Question text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Options in authored order.
    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// First option marked correct, if any.
    #[must_use]
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct())
    }

    /// Number of options marked correct.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_constructors() {
        let right = AnswerOption::correct("Paris");
        let wrong = AnswerOption::wrong("Lyon");

        assert_eq!(right.text(), "Paris");
        assert!(right.is_correct());
        assert!(!wrong.is_correct());
        assert_eq!(AnswerOption::new("Paris", true), right);
    }

    #[test]
    fn test_with_answer_puts_correct_first() {
        let q = Question::with_answer("Capital of France?", "Paris", ["Lyon", "Nice", "Lille"]);

        assert_eq!(q.text(), "Capital of France?");
        assert_eq!(q.options()[0], AnswerOption::correct("Paris"));
        assert_eq!(q.correct_count(), 1);
    }

    #[test]
    fn test_no_correct_option() {
        let q = Question::new("?", [AnswerOption::wrong("a"), AnswerOption::wrong("b")]);
        assert!(q.correct_option().is_none());
        assert_eq!(q.correct_count(), 0);
    }

    #[test]
    fn test_serde() {
        let q = Question::with_answer("1 + 1?", "2", ["3"]);
        let json = serde_json::to_string(&q).unwrap();
        let back: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(q, back);
    }
}
