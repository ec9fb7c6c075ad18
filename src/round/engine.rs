//! The round engine state machine.
//!
//! ```text
//! Idle ──start_round──▶ QuestionActive ──submit / timeout──▶ AwaitingAdvance
//!                            ▲                                    │
//!                            └──────── feedback pause ends ───────┤
//!                                                                 ▼
//! Idle ◀──reset_round / start_round / pack change────────── Finished
//! ```
//!
//! One [`TimerPhase`] field says whether ticks drive the countdown or the
//! feedback pause. Every command and tick runs to completion synchronously;
//! the engine is not shared between threads.

use im::Vector;
use tracing::{debug, info, trace};

use super::events::{ObserverRegistry, RoundEvent, SubscriptionId};
use super::feedback::{Feedback, Verdict};
use super::shuffle::Shuffler;
use super::state::{OptionList, RoundSnapshot, RoundState, RoundStatus, TimerEpoch, TimerPhase};
use crate::core::{RoundConfig, RoundRng};
use crate::pack::{AnswerOption, Question, QuestionPack};

/// Timed multiple-choice round engine.
///
/// ```
/// use quiz_round::core::RoundConfig;
/// use quiz_round::pack::{Question, QuestionPack};
/// use quiz_round::round::{RoundEngine, Verdict};
///
/// let pack = QuestionPack::new("Demo")
///     .with_time_per_question(10)
///     .with_question(Question::with_answer("2 + 2?", "4", ["3", "5", "22"]));
///
/// let mut engine = RoundEngine::new(RoundConfig::default().with_seed(1));
/// assert!(engine.start_round(&pack));
///
/// let correct = engine
///     .current_options()
///     .iter()
///     .position(|o| o.is_correct())
///     .unwrap();
/// assert_eq!(engine.submit_answer(correct), Some(Verdict::Correct));
///
/// engine.tick();
/// engine.tick();
/// assert!(engine.show_results());
/// assert_eq!(engine.score(), 1);
/// ```
#[derive(Debug)]
pub struct RoundEngine {
    config: RoundConfig,
    shuffler: Shuffler,
    snapshot: RoundSnapshot,
    phase: TimerPhase,
    epoch: TimerEpoch,
    time_per_question: u32,
    start_available: bool,
    observers: ObserverRegistry,
}

impl RoundEngine {
    /// Create an engine. Uses `config.seed` if set, system randomness otherwise.
    #[must_use]
    pub fn new(config: RoundConfig) -> Self {
        let rng = RoundRng::from_seed_or_entropy(config.seed);
        Self::with_rng(config, rng)
    }

    /// Create an engine with an explicit random source.
    #[must_use]
    pub fn with_rng(config: RoundConfig, rng: RoundRng) -> Self {
        debug!(seed = rng.seed(), "round engine created");
        Self {
            config,
            shuffler: Shuffler::new(rng),
            snapshot: RoundSnapshot::default(),
            phase: TimerPhase::Stopped,
            epoch: TimerEpoch::default(),
            time_per_question: 0,
            start_available: false,
            observers: ObserverRegistry::new(),
        }
    }

    // === Observers ===

    /// Register a change callback.
    pub fn subscribe(&mut self, callback: impl FnMut(&RoundEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    /// Remove a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // === Commands ===

    /// Whether `pack` can start a round: present with at least one question.
    #[must_use]
    pub fn pack_is_playable(pack: Option<&QuestionPack>) -> bool {
        pack.is_some_and(QuestionPack::is_playable)
    }

    /// React to the active pack being swapped or its question count changing.
    ///
    /// Always discards the running round so later edits cannot leak into it.
    pub fn pack_changed(&mut self, pack: Option<&QuestionPack>) {
        self.reset_round();
        self.refresh_availability(pack);
    }

    /// Re-evaluate "can start round" without touching the running round.
    pub fn refresh_availability(&mut self, pack: Option<&QuestionPack>) {
        let available = Self::pack_is_playable(pack);
        if available != self.start_available {
            self.start_available = available;
            debug!(available, "start availability changed");
            self.emit(RoundEvent::StartAvailabilityChanged { available });
        }
    }

    /// Start a fresh round from `pack`, replacing any running round.
    ///
    /// Returns false and leaves state untouched if the pack has no questions.
    pub fn start_round(&mut self, pack: &QuestionPack) -> bool {
        if !pack.is_playable() {
            debug!(pack = %pack.name, "start_round ignored: pack has no questions");
            return false;
        }
        self.refresh_availability(Some(pack));

        self.stop_timer();

        let mut questions: Vec<Question> = pack.questions().to_vec();
        if self.config.shuffle_questions {
            self.shuffler.shuffle_in_place(&mut questions);
        }

        self.time_per_question = self.config.time_budget(pack.time_per_question_seconds);
        self.snapshot = RoundSnapshot::new(questions.into_iter().collect::<Vector<_>>());

        info!(
            pack = %pack.name,
            questions = self.snapshot.total_questions(),
            seconds_per_question = self.time_per_question,
            "round started"
        );
        self.emit(RoundEvent::RoundStarted {
            total_questions: self.snapshot.total_questions(),
        });

        self.load_question();
        true
    }

    /// Submit the option at `index` in the current presentation order.
    ///
    /// Returns `None` without changing anything unless a question is active,
    /// unanswered, and `index` is in range.
    pub fn submit_answer(&mut self, index: usize) -> Option<Verdict> {
        if self.snapshot.state != RoundState::QuestionActive || self.snapshot.has_answered {
            debug!(state = ?self.snapshot.state, "submit_answer ignored: no open question");
            return None;
        }
        let Some(option) = self.snapshot.options.get(index) else {
            debug!(index, options = self.snapshot.options.len(), "submit_answer ignored: index out of range");
            return None;
        };

        let verdict = if option.is_correct() {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        self.stop_timer();
        if verdict.scored() {
            self.snapshot.score += 1;
        }
        self.record(verdict);
        Some(verdict)
    }

    /// Discard the round and return to `Idle`.
    pub fn reset_round(&mut self) {
        self.stop_timer();
        let was = self.snapshot.state;
        self.snapshot = RoundSnapshot::default();
        self.time_per_question = 0;
        if was != RoundState::Idle {
            info!(?was, "round reset");
            self.emit(RoundEvent::RoundReset);
        }
    }

    // === Ticks ===

    /// Deliver one second to whichever timer is armed.
    ///
    /// Does nothing when no timer is armed.
    pub fn tick(&mut self) {
        match self.phase {
            TimerPhase::Stopped => trace!("tick ignored: no timer armed"),
            TimerPhase::Countdown => self.countdown_tick(),
            TimerPhase::FeedbackPause => self.feedback_tick(),
        }
    }

    /// Deliver a tick captured at `epoch`. Stale ticks are dropped.
    ///
    /// Returns whether the tick was applied.
    pub fn tick_for(&mut self, epoch: TimerEpoch) -> bool {
        if epoch != self.epoch || self.phase == TimerPhase::Stopped {
            trace!(%epoch, current = %self.epoch, "stale tick dropped");
            return false;
        }
        self.tick();
        true
    }

    fn countdown_tick(&mut self) {
        if self.snapshot.remaining_seconds > 0 {
            self.snapshot.remaining_seconds -= 1;
            self.emit(RoundEvent::CountdownTick {
                remaining_seconds: self.snapshot.remaining_seconds,
            });
        }

        if self.snapshot.remaining_seconds == 0 && !self.snapshot.has_answered {
            self.stop_timer();
            debug!(question = self.snapshot.current_question_number(), "question timed out");
            self.record(Verdict::TimedOut);
        }
    }

    fn feedback_tick(&mut self) {
        self.snapshot.feedback_remaining = self.snapshot.feedback_remaining.saturating_sub(1);
        self.emit(RoundEvent::FeedbackTick {
            remaining_seconds: self.snapshot.feedback_remaining,
        });

        if self.snapshot.feedback_remaining == 0 {
            self.stop_timer();
            self.advance();
        }
    }

    // === Transitions ===

    fn load_question(&mut self) {
        self.stop_timer();
        self.snapshot.feedback_remaining = 0;

        let Some(question) = self.snapshot.questions.get(self.snapshot.current_index) else {
            self.finish_round();
            return;
        };

        let mut options: OptionList = question.options().iter().cloned().collect();
        if self.config.shuffle_options {
            self.shuffler.shuffle_in_place(&mut options);
        }

        self.snapshot.options = options;
        self.snapshot.has_answered = false;
        self.snapshot.feedback = None;
        self.snapshot.remaining_seconds = self.time_per_question;
        self.snapshot.state = RoundState::QuestionActive;
        self.arm(TimerPhase::Countdown);

        debug!(
            number = self.snapshot.current_question_number(),
            total = self.snapshot.total_questions(),
            "question loaded"
        );
        self.emit(RoundEvent::QuestionLoaded {
            number: self.snapshot.current_question_number(),
            total_questions: self.snapshot.total_questions(),
            remaining_seconds: self.snapshot.remaining_seconds,
        });
    }

    /// Close the current question and start the feedback pause.
    fn record(&mut self, verdict: Verdict) {
        let correct_answer = self
            .snapshot
            .options
            .iter()
            .find(|o| o.is_correct())
            .map(|o| o.text().to_string());

        self.snapshot.feedback = Some(Feedback::new(verdict, correct_answer));
        self.snapshot.has_answered = true;
        self.snapshot.state = RoundState::AwaitingAdvance;

        debug!(?verdict, score = self.snapshot.score, "answer recorded");
        self.emit(RoundEvent::AnswerRecorded {
            verdict,
            score: self.snapshot.score,
        });

        self.snapshot.feedback_remaining = self.config.feedback_delay_seconds;
        if self.snapshot.feedback_remaining == 0 {
            self.advance();
        } else {
            self.arm(TimerPhase::FeedbackPause);
        }
    }

    fn advance(&mut self) {
        self.snapshot.current_index += 1;
        if self.snapshot.current_index < self.snapshot.total_questions() {
            self.load_question();
        } else {
            self.finish_round();
        }
    }

    fn finish_round(&mut self) {
        self.stop_timer();
        self.snapshot.current_index = self.snapshot.total_questions();
        self.snapshot.options.clear();
        self.snapshot.remaining_seconds = 0;
        self.snapshot.feedback_remaining = 0;
        self.snapshot.state = RoundState::Finished;

        info!(
            score = self.snapshot.score,
            total = self.snapshot.total_questions(),
            "round finished"
        );
        self.emit(RoundEvent::RoundFinished {
            score: self.snapshot.score,
            total_questions: self.snapshot.total_questions(),
        });
    }

    fn arm(&mut self, phase: TimerPhase) {
        self.phase = phase;
        self.epoch.bump();
        trace!(?phase, epoch = %self.epoch, "timer armed");
    }

    /// Idempotent: stopping an already stopped timer keeps the epoch.
    fn stop_timer(&mut self) {
        if self.phase != TimerPhase::Stopped {
            self.phase = TimerPhase::Stopped;
            self.epoch.bump();
        }
    }

    fn emit(&mut self, event: RoundEvent) {
        self.observers.emit(&event);
    }

    // === Queries ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// Full round snapshot.
    #[must_use]
    pub fn round(&self) -> &RoundSnapshot {
        &self.snapshot
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> RoundState {
        self.snapshot.state
    }

    /// Which timer ticks currently drive.
    #[must_use]
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// Current timer epoch, for tick sources that guard against stale ticks.
    #[must_use]
    pub fn timer_epoch(&self) -> TimerEpoch {
        self.epoch
    }

    /// Current question, if one is loaded.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.snapshot.current_question()
    }

    /// Current options in presentation order.
    #[must_use]
    pub fn current_options(&self) -> &[AnswerOption] {
        self.snapshot.options()
    }

    /// 1-based number of the current question, 0 when idle.
    #[must_use]
    pub fn current_question_number(&self) -> usize {
        self.snapshot.current_question_number()
    }

    /// Number of questions in the round.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.snapshot.total_questions()
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.snapshot.remaining_seconds
    }

    /// Points scored this round.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.snapshot.score
    }

    /// Whether the current question has been closed.
    #[must_use]
    pub fn has_answered(&self) -> bool {
        self.snapshot.has_answered
    }

    /// Feedback for the current (or, once finished, last) question.
    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.snapshot.feedback()
    }

    /// True while a question is active or its feedback is showing.
    #[must_use]
    pub fn is_round_active(&self) -> bool {
        matches!(
            self.snapshot.state,
            RoundState::QuestionActive | RoundState::AwaitingAdvance
        )
    }

    /// True once every question has been played.
    #[must_use]
    pub fn show_results(&self) -> bool {
        self.snapshot.state == RoundState::Finished
    }

    /// Whether the last seen pack can start a round.
    #[must_use]
    pub fn can_start_round(&self) -> bool {
        self.start_available
    }

    /// Serializable view for rendering.
    #[must_use]
    pub fn snapshot(&self) -> RoundStatus {
        RoundStatus {
            state: self.snapshot.state,
            question: self.current_question().map(|q| q.text().to_string()),
            options: self
                .current_options()
                .iter()
                .map(|o| o.text().to_string())
                .collect(),
            current_question_number: self.current_question_number(),
            total_questions: self.total_questions(),
            remaining_seconds: self.remaining_seconds(),
            score: self.score(),
            has_answered: self.has_answered(),
            round_active: self.is_round_active(),
            show_results: self.show_results(),
            can_start_round: self.can_start_round(),
            feedback: self.snapshot.feedback.clone(),
        }
    }
}
