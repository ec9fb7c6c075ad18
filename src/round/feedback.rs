//! Per-question feedback shown during the pause after an answer.

use serde::{Deserialize, Serialize};

/// How a question ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The countdown ran out before a submission. Scores like `Incorrect`.
    TimedOut,
}

impl Verdict {
    /// Whether this verdict scored a point.
    #[must_use]
    pub fn scored(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Outcome of the current question plus the text to reveal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// How the question ended.
    pub verdict: Verdict,

    /// Text of the correct option. `None` if the question had no correct option.
    pub correct_answer: Option<String>,
}

impl Feedback {
    /// Create feedback for a finished question.
    pub fn new(verdict: Verdict, correct_answer: Option<String>) -> Self {
        Self {
            verdict,
            correct_answer,
        }
    }

    /// Short verdict line for the player.
    ///
    /// Empty when the question had no correct option to compare against.
    #[must_use]
    pub fn user_text(&self) -> &'static str {
        if self.correct_answer.is_none() {
            return "";
        }
        match self.verdict {
            Verdict::Correct => "Correct!",
            Verdict::Incorrect => "Incorrect!",
            Verdict::TimedOut => "Time's up!",
        }
    }

    /// Line revealing the correct answer.
    #[must_use]
    pub fn correct_text(&self) -> String {
        match (&self.correct_answer, self.verdict) {
            (None, _) => String::new(),
            (Some(answer), Verdict::TimedOut) => format!("Time's up! Correct answer: {answer}"),
            (Some(answer), _) => format!("Correct answer: {answer}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts() {
        let correct = Feedback::new(Verdict::Correct, Some("Oslo".into()));
        assert_eq!(correct.user_text(), "Correct!");
        assert_eq!(correct.correct_text(), "Correct answer: Oslo");

        let wrong = Feedback::new(Verdict::Incorrect, Some("Oslo".into()));
        assert_eq!(wrong.user_text(), "Incorrect!");
        assert_eq!(wrong.correct_text(), "Correct answer: Oslo");

        let timeout = Feedback::new(Verdict::TimedOut, Some("Oslo".into()));
        assert_eq!(timeout.user_text(), "Time's up!");
        assert_eq!(timeout.correct_text(), "Time's up! Correct answer: Oslo");
    }

    #[test]
    fn test_no_correct_option_is_silent() {
        let feedback = Feedback::new(Verdict::Incorrect, None);
        assert_eq!(feedback.user_text(), "");
        assert_eq!(feedback.correct_text(), "");
    }

    #[test]
    fn test_scored() {
        assert!(Verdict::Correct.scored());
        assert!(!Verdict::Incorrect.scored());
        assert!(!Verdict::TimedOut.scored());
    }
}
