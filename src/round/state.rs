//! Round state: lifecycle, timer phase, and the per-round snapshot.
//!
//! ## RoundSnapshot
//!
//! Engine-owned data for one round: private copies of the shuffled
//! questions, the current question's shuffled options, score, and timers.
//! Uses an `im` vector so [`RoundStatus`] views and clones stay O(1) in the
//! question count.
//!
//! ## RoundStatus
//!
//! Serializable, read-only view for presentation layers.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::feedback::Feedback;
use crate::pack::{AnswerOption, Question, EXPECTED_OPTION_COUNT};

/// Round lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundState {
    /// No round running.
    #[default]
    Idle,
    /// Countdown running, waiting for a submission.
    QuestionActive,
    /// Answered or timed out; feedback pause running.
    AwaitingAdvance,
    /// Every question played; results visible.
    Finished,
}

/// Which timer the single tick source is currently driving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerPhase {
    #[default]
    Stopped,
    Countdown,
    FeedbackPause,
}

/// Counter bumped every time a timer phase is armed or stopped.
///
/// Tick sources capture the epoch when they arm and present it with each
/// tick; a mismatch means the tick belongs to a timer that no longer exists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerEpoch(pub u64);

impl TimerEpoch {
    pub(crate) fn bump(&mut self) {
        self.0 += 1;
    }
}

impl std::fmt::Display for TimerEpoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

/// Options for the current question.
pub type OptionList = SmallVec<[AnswerOption; EXPECTED_OPTION_COUNT]>;

/// Mutable state of one round.
#[derive(Clone, Debug, Default)]
pub struct RoundSnapshot {
    pub(crate) questions: Vector<Question>,
    pub(crate) current_index: usize,
    pub(crate) options: OptionList,
    pub(crate) score: u32,
    pub(crate) remaining_seconds: u32,
    pub(crate) feedback_remaining: u32,
    pub(crate) has_answered: bool,
    pub(crate) feedback: Option<Feedback>,
    pub(crate) state: RoundState,
}

impl RoundSnapshot {
    pub(crate) fn new(questions: Vector<Question>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    /// Shuffled questions for this round.
    #[must_use]
    pub fn questions(&self) -> &Vector<Question> {
        &self.questions
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Current question, if one is loaded.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            RoundState::QuestionActive | RoundState::AwaitingAdvance => {
                self.questions.get(self.current_index)
            }
            RoundState::Idle | RoundState::Finished => None,
        }
    }

    /// Options for the current question in presentation order.
    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    /// Points scored so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Seconds left in the feedback pause.
    #[must_use]
    pub fn feedback_remaining(&self) -> u32 {
        self.feedback_remaining
    }

    /// Whether the current question has been answered or timed out.
    #[must_use]
    pub fn has_answered(&self) -> bool {
        self.has_answered
    }

    /// Feedback for the current question.
    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Number of questions in the round.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 1-based number of the current question, 0 when no round is running.
    ///
    /// A finished round reports the last question's number.
    #[must_use]
    pub fn current_question_number(&self) -> usize {
        match self.state {
            RoundState::Idle => 0,
            _ => (self.current_index + 1).min(self.questions.len()),
        }
    }
}

/// Read-only view of a round for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub state: RoundState,
    pub question: Option<String>,
    pub options: Vec<String>,
    pub current_question_number: usize,
    pub total_questions: usize,
    pub remaining_seconds: u32,
    pub score: u32,
    pub has_answered: bool,
    pub round_active: bool,
    pub show_results: bool,
    pub can_start_round: bool,
    pub feedback: Option<Feedback>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vector<Question> {
        (0..n)
            .map(|i| Question::with_answer(format!("q{i}"), "a", ["b", "c", "d"]))
            .collect()
    }

    #[test]
    fn test_default_snapshot_is_idle() {
        let snapshot = RoundSnapshot::default();
        assert_eq!(snapshot.state(), RoundState::Idle);
        assert_eq!(snapshot.current_question_number(), 0);
        assert_eq!(snapshot.total_questions(), 0);
        assert!(snapshot.current_question().is_none());
        assert!(snapshot.options().is_empty());
    }

    #[test]
    fn test_question_number_tracks_state() {
        let mut snapshot = RoundSnapshot::new(questions(3));
        assert_eq!(snapshot.current_question_number(), 0);

        snapshot.state = RoundState::QuestionActive;
        snapshot.current_index = 1;
        assert_eq!(snapshot.current_question_number(), 2);
        assert_eq!(snapshot.current_question().map(Question::text), Some("q1"));

        snapshot.state = RoundState::Finished;
        snapshot.current_index = 3;
        assert_eq!(snapshot.current_question_number(), 3);
        assert!(snapshot.current_question().is_none());
    }

    #[test]
    fn test_epoch_bump() {
        let mut epoch = TimerEpoch::default();
        epoch.bump();
        epoch.bump();
        assert_eq!(epoch, TimerEpoch(2));
        assert_eq!(format!("{epoch}"), "Epoch(2)");
    }

    #[test]
    fn test_status_serde() {
        let status = RoundStatus {
            state: RoundState::AwaitingAdvance,
            question: Some("q".into()),
            options: vec!["a".into(), "b".into()],
            current_question_number: 1,
            total_questions: 2,
            remaining_seconds: 7,
            score: 1,
            has_answered: true,
            round_active: true,
            show_results: false,
            can_start_round: true,
            feedback: None,
        };
        let json = serde_json::to_string(&status).unwrap();
        let back: RoundStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(status, back);
    }
}
