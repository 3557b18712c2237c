//! Pure easing functions for height transitions.
//!
//! Maps input progress [0, 1] to output [0, 1]. The spring curve follows the
//! closed-form solution of a damped unit spring, normalised so it settles by
//! t = 1.

use serde::{Deserialize, Serialize};

/// Natural frequency of the unit spring, chosen so the response settles
/// within the normalised [0, 1] timeline.
const NATURAL_FREQUENCY: f32 = 8.0;

/// Animation timing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    Spring,
}

impl AnimationCurve {
    /// Apply the curve to a progress value.
    ///
    /// `damping` and `velocity` only affect the spring curve; the fixed
    /// curves ignore them.
    #[inline]
    pub fn apply(&self, t: f32, damping: f32, velocity: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            AnimationCurve::Linear => t,
            AnimationCurve::EaseIn => cubic_ease_in(t),
            AnimationCurve::EaseOut => cubic_ease_out(t),
            AnimationCurve::EaseInOut => cubic_ease_in_out(t),
            AnimationCurve::Spring => spring(t, damping, velocity),
        }
    }
}

/// Cubic ease-in: f(t) = t³
#[inline]
fn cubic_ease_in(t: f32) -> f32 {
    t * t * t
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Cubic ease-in-out: ease-in below the midpoint, ease-out above it
#[inline]
fn cubic_ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// Damped unit spring released at displacement 1 with the given initial
/// velocity, returning progress toward the rest position.
///
/// `damping` below 1 uses the under-damped solution (slight overshoot);
/// 1 and above uses the critically damped form.
#[inline]
fn spring(t: f32, damping: f32, velocity: f32) -> f32 {
    let zeta = damping.clamp(0.05, 4.0);
    let omega = NATURAL_FREQUENCY;

    if zeta >= 1.0 {
        let displacement = (1.0 + (omega - velocity) * t) * (-omega * t).exp();
        return 1.0 - displacement;
    }

    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
    let decay = (-zeta * omega * t).exp();
    let sin_coeff = (zeta * omega - velocity) / omega_d;
    let displacement = decay * ((omega_d * t).cos() + sin_coeff * (omega_d * t).sin());
    1.0 - displacement
}
