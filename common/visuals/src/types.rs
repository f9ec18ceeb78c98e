use std::time::Duration;

use bevy::prelude::*;

/// Moves the entity up from its origin at a constant speed.
/// Once the full rise is covered, it jumps back to the origin and repeats.
///
/// Nothing moves until the start delay has elapsed.
/// Entities of a group share the delay, which makes them move in waves.
#[derive(Component, Debug, Clone, Reflect)]
pub struct RisingLoop {
    /// Where the entity starts and returns to.
    pub origin: Vec2,
    /// How many pixels up the entity travels in one period.
    pub rise: f32,
    /// How long it takes to cover the rise.
    pub period: Duration,
    /// How long the entity stays at the origin before it starts moving.
    pub delay: Duration,
    /// Kept within one period past the delay.
    elapsed: Duration,
}

/// Changes the alpha of the entity's color material over time.
#[derive(Component, Debug, Clone, Reflect)]
pub struct ColorFade {
    /// Alpha at the start.
    pub from: f32,
    /// Alpha at the end.
    pub to: f32,
    /// Drives the fade.
    pub timer: Timer,
    /// What happens after the fade.
    pub then: FadeEnd,
}

/// What happens to the entity after the fade is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum FadeEnd {
    /// Remove just the [`ColorFade`] component.
    Keep,
    /// Despawn the entity with its children.
    Despawn,
}

impl RisingLoop {
    /// Starts at the origin.
    pub fn new(
        origin: Vec2,
        rise: f32,
        period: Duration,
        delay: Duration,
    ) -> Self {
        Self {
            origin,
            rise,
            period,
            delay,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the motion.
    pub fn tick(&mut self, delta: Duration) {
        self.elapsed += delta;

        let period = self.period.as_nanos();
        if period == 0 {
            return;
        }

        // wrap around so that the float math in offset stays precise however
        // long the screen is shown
        if let Some(moving) = self.elapsed.checked_sub(self.delay) {
            let wrapped = (moving.as_nanos() % period) as u64;
            self.elapsed = self.delay + Duration::from_nanos(wrapped);
        }
    }

    /// How far up from the origin the entity is now.
    pub fn offset(&self) -> f32 {
        let Some(moving) = self.elapsed.checked_sub(self.delay) else {
            return 0.0;
        };

        if self.period.is_zero() {
            return 0.0;
        }

        let progress = moving.as_secs_f32() / self.period.as_secs_f32();
        self.rise * progress.fract()
    }

    /// Origin plus the current offset.
    pub fn position(&self) -> Vec2 {
        self.origin + Vec2::Y * self.offset()
    }
}

impl ColorFade {
    /// From transparent to opaque.
    pub fn fade_in(duration: Duration) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            timer: Timer::new(duration, TimerMode::Once),
            then: FadeEnd::Keep,
        }
    }

    /// From the current alpha to transparent, then despawn.
    pub fn fade_out_and_despawn(from: f32, duration: Duration) -> Self {
        Self {
            from,
            to: 0.0,
            timer: Timer::new(duration, TimerMode::Once),
            then: FadeEnd::Despawn,
        }
    }

    /// Sets the alpha the fade ends at.
    pub fn to(mut self, to: f32) -> Self {
        self.to = to;
        self
    }

    /// Linear between [`ColorFade::from`] and [`ColorFade::to`].
    pub fn alpha(&self) -> f32 {
        self.from + (self.to - self.from) * self.timer.fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn approx_eq(expected: f32, actual: f32) {
        assert!(
            (expected - actual).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn it_waits_for_the_delay() {
        let mut cloud =
            RisingLoop::new(Vec2::new(10.0, -900.0), 1000.0, ms(10_000), ms(500));

        cloud.tick(ms(499));
        approx_eq(0.0, cloud.offset());
        assert_eq!(Vec2::new(10.0, -900.0), cloud.position());

        cloud.tick(ms(1_001));
        approx_eq(100.0, cloud.offset());
    }

    #[test]
    fn it_rises_linearly_and_loops_without_reversing() {
        let mut cloud = RisingLoop::new(Vec2::ZERO, 1000.0, ms(10_000), ms(0));

        cloud.tick(ms(2_500));
        approx_eq(250.0, cloud.offset());

        cloud.tick(ms(7_000));
        approx_eq(950.0, cloud.offset());

        // past one period it starts over from the origin
        cloud.tick(ms(1_000));
        approx_eq(50.0, cloud.offset());
    }

    #[test]
    fn it_stays_precise_after_many_periods() {
        let mut cloud = RisingLoop::new(Vec2::ZERO, 844.0, ms(10_000), ms(1_000));

        for _ in 0..(60 * 60 * 60) {
            cloud.tick(ms(16));
        }
        // 3456s in total, 3455s of that moving, half a period past the last
        // full one
        approx_eq(844.0 * 0.5, cloud.offset());
    }

    #[test]
    fn it_does_not_move_with_zero_period() {
        let mut cloud = RisingLoop::new(Vec2::ZERO, 844.0, Duration::ZERO, ms(0));

        cloud.tick(ms(100));
        approx_eq(0.0, cloud.offset());
    }

    #[test]
    fn it_fades_linearly() {
        let mut fade = ColorFade::fade_out_and_despawn(0.8, ms(500));
        approx_eq(0.8, fade.alpha());

        fade.timer.tick(ms(250));
        approx_eq(0.4, fade.alpha());

        fade.timer.tick(ms(250));
        approx_eq(0.0, fade.alpha());
        assert!(fade.timer.finished());
        assert_eq!(FadeEnd::Despawn, fade.then);
    }

    #[test]
    fn it_fades_in_to_given_alpha() {
        let mut fade = ColorFade::fade_in(ms(300)).to(0.8);
        approx_eq(0.0, fade.alpha());

        fade.timer.tick(ms(300));
        approx_eq(0.8, fade.alpha());
        assert_eq!(FadeEnd::Keep, fade.then);
    }
}
