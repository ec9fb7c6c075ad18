//! Tick scheduler integration tests.
//!
//! These tests run an engine from an event-loop style driver on a manual
//! clock and check that ticks land on one-second boundaries of each armed
//! timer phase.

use std::time::Duration;

use quiz_round::core::RoundConfig;
use quiz_round::pack::{Question, QuestionPack};
use quiz_round::round::{RoundEngine, RoundState, TimerPhase};
use quiz_round::schedule::{ManualClock, TickScheduler, TICK_INTERVAL};

fn engine_with(questions: usize, seconds: u32) -> RoundEngine {
    let pack = (0..questions).fold(QuestionPack::new("sched").with_time_per_question(seconds), |p, i| {
        p.with_question(Question::with_answer(format!("q{i}"), "A", ["B", "C", "D"]))
    });
    let mut engine = RoundEngine::new(RoundConfig::default().with_seed(21));
    assert!(engine.start_round(&pack));
    engine
}

/// Fine-grained polling and one big catch-up poll end in the same place.
#[test]
fn test_polling_granularity_does_not_matter() {
    let fine_clock = ManualClock::new();
    let mut fine = TickScheduler::with_clock(fine_clock.clone());
    let mut fine_engine = engine_with(3, 4);
    fine.sync(&fine_engine);

    let coarse_clock = ManualClock::new();
    let mut coarse = TickScheduler::with_clock(coarse_clock.clone());
    let mut coarse_engine = engine_with(3, 4);
    coarse.sync(&coarse_engine);

    for _ in 0..130 {
        fine_clock.advance(Duration::from_millis(100));
        fine.poll(&mut fine_engine);
    }
    coarse_clock.advance(Duration::from_secs(13));
    coarse.poll(&mut coarse_engine);

    assert_eq!(fine_engine.snapshot(), coarse_engine.snapshot());
    assert_eq!(fine_engine.current_question_number(), 3);
    assert_eq!(fine_engine.remaining_seconds(), 3);
}

/// A driver loop that sleeps until the next tick finishes the round.
#[test]
fn test_event_loop_until_finished() {
    let clock = ManualClock::new();
    let mut scheduler = TickScheduler::with_clock(clock.clone());
    let mut engine = engine_with(2, 3);
    scheduler.sync(&engine);

    let mut total_ticks = 0;
    while let Some(wait) = scheduler.time_until_next_tick(&engine) {
        clock.advance(wait);
        total_ticks += scheduler.poll(&mut engine);
    }

    // 2 questions x (3 countdown + 2 feedback)
    assert_eq!(total_ticks, 10);
    assert_eq!(engine.state(), RoundState::Finished);
}

/// Restarting the round realigns the scheduler to the new countdown.
#[test]
fn test_restart_realigns() {
    let clock = ManualClock::new();
    let mut scheduler = TickScheduler::with_clock(clock.clone());
    let mut engine = engine_with(1, 10);
    scheduler.sync(&engine);

    clock.advance(Duration::from_millis(900));
    let pack = QuestionPack::new("again")
        .with_time_per_question(10)
        .with_question(Question::with_answer("q", "A", ["B", "C", "D"]));
    engine.start_round(&pack);
    scheduler.sync(&engine);

    clock.advance(Duration::from_millis(900));
    assert_eq!(scheduler.poll(&mut engine), 0);
    assert_eq!(engine.remaining_seconds(), 10);

    clock.advance(Duration::from_millis(100));
    assert_eq!(scheduler.poll(&mut engine), 1);
}

/// An external timer carrying an old epoch cannot touch a newer phase.
#[test]
fn test_external_stale_timer() {
    let mut engine = engine_with(2, 10);
    let countdown = engine.timer_epoch();

    engine.submit_answer(0);
    assert_eq!(engine.phase(), TimerPhase::FeedbackPause);

    for _ in 0..5 {
        assert!(!engine.tick_for(countdown));
    }
    assert_eq!(engine.current_question_number(), 1);
    assert_eq!(engine.round().feedback_remaining(), 2);
}

#[test]
fn test_interval_is_one_second() {
    assert_eq!(TICK_INTERVAL, Duration::from_secs(1));
}
