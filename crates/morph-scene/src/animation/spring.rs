//! Closed-form spring curves.
//!
//! A spring animation's progress is the position of a damped harmonic
//! oscillator released at rest one unit away from its target. The closed
//! form lets the engine evaluate progress at arbitrary times without keeping
//! simulation state, and lets it compute the settling time up front — a
//! spring animation's duration is this settling time, not a caller-supplied
//! value.

use serde::{Deserialize, Serialize};

/// Fraction of the initial displacement below which the spring counts as
/// settled.
pub const REST_THRESHOLD: f32 = 0.001;

/// A damped harmonic oscillator normalized to travel from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringCurve {
    pub mass: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl SpringCurve {
    /// # Panics
    /// Panics if any parameter is not strictly positive.
    pub fn new(mass: f32, stiffness: f32, damping: f32) -> Self {
        assert!(
            mass > 0.0 && stiffness > 0.0 && damping > 0.0,
            "Spring parameters must be strictly positive"
        );
        Self {
            mass,
            stiffness,
            damping,
        }
    }

    /// Undamped natural frequency ω₀ = √(k/m), in radians per second.
    fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    /// Damping ratio ζ = c / (2·√(k·m)).
    fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Spring position at `t_secs` seconds after release.
    ///
    /// Starts at 0.0 with zero velocity, converges on 1.0; underdamped
    /// springs overshoot past 1.0 before settling.
    pub fn value_at(&self, t_secs: f32) -> f32 {
        if t_secs <= 0.0 {
            return 0.0;
        }

        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        let t = t_secs;

        // Displacement y(t) from the target, with y(0) = -1, y'(0) = 0.
        let y = if (zeta - 1.0).abs() < 1e-4 {
            // Critically damped
            -((1.0 + w0 * t) * (-w0 * t).exp())
        } else if zeta < 1.0 {
            // Underdamped
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            -(envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin()))
        } else {
            // Overdamped
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r1 - r2)
        };

        1.0 + y
    }

    /// Time in milliseconds for the decay envelope to drop below
    /// `rest_threshold` of the initial displacement.
    pub fn settling_duration_ms(&self, rest_threshold: f32) -> f32 {
        assert!(
            rest_threshold > 0.0 && rest_threshold < 1.0,
            "Rest threshold must be in (0, 1)"
        );

        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();

        // The slowest-decaying exponent bounds the envelope.
        let decay_rate = if zeta < 1.0 {
            zeta * w0
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            w0 * (zeta - root)
        };

        (1.0 / rest_threshold).ln() / decay_rate * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        let s = SpringCurve::new(1.0, 180.0, 22.0);
        assert_eq!(s.value_at(0.0), 0.0);
        assert_eq!(s.value_at(-1.0), 0.0);
    }

    #[test]
    fn test_settles_at_target() {
        let s = SpringCurve::new(1.0, 180.0, 22.0);
        let settle_secs = s.settling_duration_ms(REST_THRESHOLD) / 1000.0;
        let v = s.value_at(settle_secs);
        assert!(
            (v - 1.0).abs() < 2.0 * REST_THRESHOLD,
            "spring should be at rest after its settling time, got {}",
            v
        );
    }

    #[test]
    fn test_underdamped_overshoots() {
        // Low damping relative to stiffness: ζ < 1.
        let s = SpringCurve::new(1.0, 200.0, 10.0);
        let mut max: f32 = 0.0;
        for i in 0..200 {
            max = max.max(s.value_at(i as f32 / 100.0));
        }
        assert!(max > 1.0, "underdamped spring should overshoot, max {}", max);
    }

    #[test]
    fn test_overdamped_monotonic() {
        // ζ > 1: approaches the target without crossing it.
        let s = SpringCurve::new(1.0, 100.0, 50.0);
        let mut last = 0.0;
        for i in 1..200 {
            let v = s.value_at(i as f32 / 100.0);
            assert!(v >= last - 1e-5);
            assert!(v <= 1.0 + 1e-5);
            last = v;
        }
    }

    #[test]
    fn test_settling_time_shrinks_with_damping() {
        let light = SpringCurve::new(1.0, 180.0, 10.0);
        let heavy = SpringCurve::new(1.0, 180.0, 24.0);
        assert!(
            heavy.settling_duration_ms(REST_THRESHOLD)
                < light.settling_duration_ms(REST_THRESHOLD)
        );
    }

    #[test]
    #[should_panic(expected = "Spring parameters must be strictly positive")]
    fn test_invalid_params() {
        SpringCurve::new(1.0, -5.0, 10.0);
    }
}
