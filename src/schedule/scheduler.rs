//! Single periodic tick source.
//!
//! The scheduler remembers when the engine's current timer phase was armed
//! (keyed by [`TimerEpoch`]) and, on each `poll`, delivers one tick for
//! every whole interval elapsed since then. A tick that arms a new phase
//! starts that phase's timing at the tick's own instant, so catching up
//! after a long gap behaves the same as polling every millisecond.

use std::time::{Duration, Instant};

use tracing::trace;

use super::clock::{Clock, SystemClock};
use crate::round::{RoundEngine, TimerEpoch, TimerPhase};

/// Tick resolution used by rounds.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Cooperative 1-second tick source for a [`RoundEngine`].
#[derive(Debug)]
pub struct TickScheduler<C: Clock = SystemClock> {
    clock: C,
    interval: Duration,
    armed: Option<(TimerEpoch, Instant)>,
}

impl TickScheduler<SystemClock> {
    /// Scheduler on wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TickScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TickScheduler<C> {
    /// Scheduler on the given clock.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            interval: TICK_INTERVAL,
            armed: None,
        }
    }

    /// The clock driving this scheduler.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Record the engine's current timer so its first tick is one interval from now.
    ///
    /// Call after any command that may arm or stop a timer. Polling alone
    /// also notices new epochs, but only at poll time.
    pub fn sync(&mut self, engine: &RoundEngine) {
        let now = self.clock.now();
        self.align(engine, now);
    }

    /// Deliver every tick that is due. Returns how many were delivered.
    pub fn poll(&mut self, engine: &mut RoundEngine) -> usize {
        let now = self.clock.now();
        let mut delivered = 0;

        while let Some(armed_at) = self.align(engine, now) {
            let due = armed_at + self.interval;
            if due > now {
                break;
            }

            let epoch = engine.timer_epoch();
            if !engine.tick_for(epoch) {
                break;
            }
            delivered += 1;

            // The same phase continues from `due`; a newly armed phase starts there too.
            self.armed = Some((engine.timer_epoch(), due));
        }

        if delivered > 0 {
            trace!(delivered, "ticks delivered");
        }
        delivered
    }

    /// Time until the next tick is due, or `None` if no timer is armed.
    #[must_use]
    pub fn time_until_next_tick(&self, engine: &RoundEngine) -> Option<Duration> {
        if engine.phase() == TimerPhase::Stopped {
            return None;
        }
        let now = self.clock.now();
        let armed_at = match self.armed {
            Some((epoch, at)) if epoch == engine.timer_epoch() => at,
            _ => now,
        };
        Some((armed_at + self.interval).saturating_duration_since(now))
    }

    /// Returns the instant the current phase was armed, re-arming on a new epoch.
    fn align(&mut self, engine: &RoundEngine, now: Instant) -> Option<Instant> {
        if engine.phase() == TimerPhase::Stopped {
            self.armed = None;
            return None;
        }

        let epoch = engine.timer_epoch();
        match self.armed {
            Some((armed_epoch, at)) if armed_epoch == epoch => Some(at),
            _ => {
                trace!(%epoch, "scheduler aligned to new timer");
                self.armed = Some((epoch, now));
                Some(now)
            }
        }
    }
}
