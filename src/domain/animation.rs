//! Animation bookkeeping for the bar model
//!
//! Two small pieces of transient state: an eased progress transition started
//! by an animated progress change, and the wrapping phase offset that moves
//! the stripe pattern. Both are advanced by the model's `tick`.

use std::time::Duration;

/// Reference frame rate the stripe velocity is expressed against.
///
/// A velocity of 1.0 moves the pattern one pixel per frame at this rate,
/// regardless of how often `tick` is actually called.
pub const REFERENCE_FPS: f32 = 30.0;

/// Duration of an animated progress change.
pub const PROGRESS_TRANSITION: Duration = Duration::from_millis(250);

/// An in-flight eased change of the progress value
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTransition {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl ProgressTransition {
    /// Starts a transition between two already-pinned progress values
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
        }
    }

    /// Advances the transition clock
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    /// Current interpolated value, eased with a smoothstep curve
    pub fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        let eased = t * t * (3.0 - 2.0 * t);
        self.from + (self.to - self.from) * eased
    }

    /// Target value of the transition
    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Wrapping offset accumulator for the stripe pattern
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StripePhase {
    offset: f32,
}

impl StripePhase {
    /// Current phase offset in pixels, already wrapped to the period
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Moves the phase by `delta` pixels and wraps it into `[0, period)`.
    ///
    /// A non-positive period leaves the phase untouched; that happens when
    /// stripes are configured away entirely.
    pub fn advance(&mut self, delta: f32, period: f32) {
        if period <= 0.0 {
            return;
        }
        self.offset = (self.offset + delta).rem_euclid(period);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_starts_at_from_and_ends_at_to() {
        let mut t = ProgressTransition::new(0.2, 0.8, Duration::from_millis(250));
        assert!((t.value() - 0.2).abs() < 1e-6);

        t.advance(Duration::from_millis(250));
        assert!(t.finished());
        assert!((t.value() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn transition_is_monotonic_upwards() {
        let mut t = ProgressTransition::new(0.0, 1.0, Duration::from_millis(250));
        let mut last = t.value();
        for _ in 0..10 {
            t.advance(Duration::from_millis(25));
            let v = t.value();
            assert!(v >= last);
            last = v;
        }
        assert!((last - 1.0).abs() < 1e-6);
    }

    #[test]
    fn transition_clock_saturates_at_duration() {
        let mut t = ProgressTransition::new(0.0, 0.5, Duration::from_millis(100));
        t.advance(Duration::from_secs(5));
        assert!(t.finished());
        assert!((t.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_transition_jumps_to_target() {
        let t = ProgressTransition::new(0.1, 0.9, Duration::ZERO);
        assert!((t.value() - 0.9).abs() < 1e-6);
        assert!(t.finished());
    }

    #[test]
    fn phase_wraps_into_period() {
        let mut phase = StripePhase::default();
        phase.advance(10.0, 14.0);
        assert!((phase.offset() - 10.0).abs() < 1e-6);

        phase.advance(10.0, 14.0);
        assert!((phase.offset() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn phase_wraps_negative_movement() {
        let mut phase = StripePhase::default();
        phase.advance(-3.0, 14.0);
        assert!((phase.offset() - 11.0).abs() < 1e-6);
    }

    #[test]
    fn phase_ignores_degenerate_period() {
        let mut phase = StripePhase::default();
        phase.advance(5.0, 0.0);
        assert_eq!(phase.offset(), 0.0);
    }
}
