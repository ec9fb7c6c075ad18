//! Play session: the glue between a pack library and a round.
//!
//! A `PlaySession` owns the [`PackProvider`], the [`RoundEngine`], and the
//! tick scheduler, and enforces the play-mode rules:
//!
//! - Entering play mode starts a round if the active pack has questions.
//! - Leaving play mode discards the round.
//! - Swapping the active pack while playing leaves play mode.
//! - Any pack change resets the round and re-evaluates "can start".
//!
//! Pack edits go through [`PlaySession::edit_packs`] so their change
//! notifications are applied before control returns to the caller.

use tracing::info;

use crate::core::RoundConfig;
use crate::pack::{PackChange, PackProvider};
use crate::round::{RoundEngine, RoundEvent, RoundStatus, SubscriptionId, Verdict};
use crate::schedule::{Clock, SystemClock, TickScheduler};

/// A player-facing quiz session.
#[derive(Debug)]
pub struct PlaySession<C: Clock = SystemClock> {
    provider: PackProvider,
    engine: RoundEngine,
    scheduler: TickScheduler<C>,
    play_mode: bool,
}

impl PlaySession<SystemClock> {
    /// Session on wall-clock time.
    #[must_use]
    pub fn new(provider: PackProvider, config: RoundConfig) -> Self {
        Self::with_clock(provider, config, SystemClock)
    }
}

impl<C: Clock> PlaySession<C> {
    /// Session on the given clock.
    #[must_use]
    pub fn with_clock(provider: PackProvider, config: RoundConfig, clock: C) -> Self {
        Self::from_parts(provider, RoundEngine::new(config), clock)
    }

    /// Session around an existing engine.
    #[must_use]
    pub fn from_parts(mut provider: PackProvider, mut engine: RoundEngine, clock: C) -> Self {
        // Anything queued before the session existed is already reflected here.
        provider.take_changes();
        engine.pack_changed(provider.active());

        Self {
            provider,
            engine,
            scheduler: TickScheduler::with_clock(clock),
            play_mode: false,
        }
    }

    /// Read access to the pack library.
    #[must_use]
    pub fn provider(&self) -> &PackProvider {
        &self.provider
    }

    /// Read access to the round engine.
    #[must_use]
    pub fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    /// Render view of the round.
    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.engine.snapshot()
    }

    /// Whether play mode is on.
    #[must_use]
    pub fn is_play_mode(&self) -> bool {
        self.play_mode
    }

    /// Whether play mode can be entered. Same rule as starting a round.
    #[must_use]
    pub fn can_enter_play_mode(&self) -> bool {
        self.engine.can_start_round()
    }

    /// Register a change callback on the engine.
    pub fn subscribe(&mut self, callback: impl FnMut(&RoundEvent) + 'static) -> SubscriptionId {
        self.engine.subscribe(callback)
    }

    /// Remove a change callback.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.engine.unsubscribe(id)
    }

    /// Mutate the pack library, then apply the resulting change notifications.
    pub fn edit_packs<R>(&mut self, edit: impl FnOnce(&mut PackProvider) -> R) -> R {
        let result = edit(&mut self.provider);
        for change in self.provider.take_changes() {
            self.apply_change(&change);
        }
        result
    }

    /// Turn play mode on or off.
    ///
    /// Turning it on requires a playable active pack and returns false
    /// otherwise. If no round is running, one is started.
    pub fn set_play_mode(&mut self, enabled: bool) -> bool {
        if enabled {
            if !self.can_enter_play_mode() {
                return false;
            }
            if !self.play_mode {
                info!("entering play mode");
                self.play_mode = true;
            }
            if !self.engine.is_round_active() {
                self.start_round();
            }
        } else if self.play_mode {
            info!("leaving play mode");
            self.play_mode = false;
            self.engine.reset_round();
            self.scheduler.sync(&self.engine);
        }
        true
    }

    /// Start a round from the active pack.
    pub fn start_round(&mut self) -> bool {
        let started = match self.provider.active() {
            Some(pack) => self.engine.start_round(pack),
            None => false,
        };
        self.scheduler.sync(&self.engine);
        started
    }

    /// Submit the option at `index` of the current question.
    pub fn submit_answer(&mut self, index: usize) -> Option<Verdict> {
        let verdict = self.engine.submit_answer(index);
        self.scheduler.sync(&self.engine);
        verdict
    }

    /// Discard the running round without leaving play mode.
    pub fn reset_round(&mut self) {
        self.engine.reset_round();
        self.scheduler.sync(&self.engine);
    }

    /// Deliver due ticks. Call from the event loop.
    pub fn poll(&mut self) -> usize {
        self.scheduler.poll(&mut self.engine)
    }

    /// Time until the next tick, for event loops that sleep between polls.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<std::time::Duration> {
        self.scheduler.time_until_next_tick(&self.engine)
    }

    fn apply_change(&mut self, change: &PackChange) {
        if let PackChange::ActivePackSwapped { .. } = change {
            if self.play_mode {
                info!("active pack swapped during play; leaving play mode");
                self.play_mode = false;
            }
        }
        self.engine.pack_changed(self.provider.active());
        self.scheduler.sync(&self.engine);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{Question, QuestionPack};
    use crate::schedule::ManualClock;

    fn provider_with(questions: usize) -> PackProvider {
        let pack = (0..questions).fold(QuestionPack::new("p").with_time_per_question(5), |p, i| {
            p.with_question(Question::with_answer(format!("q{i}"), "a", ["b", "c", "d"]))
        });
        let mut provider = PackProvider::new();
        let id = provider.add_pack(pack);
        provider.set_active(id);
        provider
    }

    fn session(questions: usize) -> PlaySession<ManualClock> {
        PlaySession::with_clock(provider_with(questions), RoundConfig::default().with_seed(4), ManualClock::new())
    }

    #[test]
    fn test_initial_availability() {
        assert!(session(2).can_enter_play_mode());
        assert!(!session(0).can_enter_play_mode());

        let empty = PlaySession::with_clock(PackProvider::new(), RoundConfig::default(), ManualClock::new());
        assert!(!empty.can_enter_play_mode());
    }

    #[test]
    fn test_enter_play_mode_starts_round() {
        let mut session = session(2);
        assert!(session.set_play_mode(true));
        assert!(session.is_play_mode());
        assert!(session.engine().is_round_active());
        assert_eq!(session.status().current_question_number, 1);
    }

    #[test]
    fn test_enter_play_mode_refused_without_questions() {
        let mut session = session(0);
        assert!(!session.set_play_mode(true));
        assert!(!session.is_play_mode());
    }

    #[test]
    fn test_leave_play_mode_resets() {
        let mut session = session(2);
        session.set_play_mode(true);
        session.set_play_mode(false);

        assert!(!session.is_play_mode());
        assert!(!session.engine().is_round_active());
        assert_eq!(session.time_until_next_tick(), None);
    }

    #[test]
    fn test_question_edit_resets_but_stays_in_play_mode() {
        let mut session = session(2);
        session.set_play_mode(true);

        session.edit_packs(|p| p.push_question(Question::with_answer("new", "a", ["b", "c", "d"])));

        assert!(session.is_play_mode());
        assert!(!session.engine().is_round_active());
        assert!(session.can_enter_play_mode());
    }

    #[test]
    fn test_removing_last_question_disables_start() {
        let mut session = session(1);
        session.edit_packs(|p| p.remove_question(0));

        assert!(!session.can_enter_play_mode());
        assert!(!session.start_round());
    }
}
