use std::time::Duration;

use bevy::time::{Timer, TimerMode};
use smallvec::SmallVec;

/// Repeating timer that first clears a set of shapes and then, after a
/// short delay, asks for a fresh set.
///
/// It knows nothing about wall clocks.
/// Whoever owns it calls [`RegenerationCycle::tick`] with the elapsed time,
/// typically the frame delta.
#[derive(Debug, Clone)]
pub struct RegenerationCycle {
    every: Timer,
    after_clear: Timer,
    awaiting_regeneration: bool,
}

/// What the owner should do now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    /// Fade out and drop the current set.
    Clear,
    /// Generate and show a new set.
    Regenerate,
}

/// Zero length timers never tick properly.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

impl RegenerationCycle {
    /// The delay is capped at the interval so that every clear is followed
    /// by a regeneration before the next clear.
    pub fn new(interval: Duration, post_clear_delay: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);

        Self {
            every: Timer::new(interval, TimerMode::Repeating),
            after_clear: Timer::new(
                post_clear_delay.min(interval),
                TimerMode::Once,
            ),
            awaiting_regeneration: false,
        }
    }

    /// Advances the cycle.
    /// When both steps fall into the same tick, the pending regeneration is
    /// emitted before the next clear.
    pub fn tick(&mut self, delta: Duration) -> SmallVec<[CycleStep; 2]> {
        let mut steps = SmallVec::new();

        if self.awaiting_regeneration {
            self.after_clear.tick(delta);
            if self.after_clear.finished() {
                self.awaiting_regeneration = false;
                steps.push(CycleStep::Regenerate);
            }
        }

        self.every.tick(delta);
        if self.every.just_finished() {
            self.after_clear.reset();
            self.awaiting_regeneration = true;
            steps.push(CycleStep::Clear);
        }

        steps
    }

    #[cfg(test)]
    pub(crate) fn is_awaiting_regeneration(&self) -> bool {
        self.awaiting_regeneration
    }
}
