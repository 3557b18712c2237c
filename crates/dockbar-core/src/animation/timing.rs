//! Time calculation utilities for height transitions.
//!
//! Pure functions over elapsed time. Time is injected by the host's tick, so
//! there are no wall-clock reads here.

use std::time::Duration;

/// Transition progress (0.0 to 1.0) for the elapsed time.
///
/// A zero duration is already complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f32() / duration.as_secs_f32();
    ratio.clamp(0.0, 1.0)
}

/// Check if a transition has run its full duration
#[inline]
pub fn is_complete(elapsed: Duration, duration: Duration) -> bool {
    elapsed >= duration
}

/// Linear interpolation between two heights
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let duration = Duration::from_millis(250);
        assert!((progress(Duration::ZERO, duration) - 0.0).abs() < 0.001);
        assert!((progress(Duration::from_millis(125), duration) - 0.5).abs() < 0.001);
        assert!((progress(Duration::from_millis(250), duration) - 1.0).abs() < 0.001);
        assert!((progress(Duration::from_millis(400), duration) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_is_complete() {
        let duration = Duration::from_millis(100);
        assert!(!is_complete(Duration::from_millis(99), duration));
        assert!(is_complete(Duration::from_millis(100), duration));
        assert!(is_complete(Duration::from_millis(250), duration));
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(44.0, 144.0, 0.0) - 44.0).abs() < 0.001);
        assert!((lerp(44.0, 144.0, 0.5) - 94.0).abs() < 0.001);
        assert!((lerp(44.0, 144.0, 1.0) - 144.0).abs() < 0.001);
        assert!((lerp(144.0, 44.0, 0.5) - 94.0).abs() < 0.001);
    }
}
