//! Height transition driver.
//!
//! Combines easing and timing to run at most one height transition. The bar
//! starts a transition, then advances the driver once per frame with the
//! elapsed delta; interpolated heights come back for presentation and a
//! finished step carries the generation so stale completions are detectable.

use std::time::Duration;

use super::easing::AnimationCurve;
use super::timing::{is_complete, lerp, progress};
use crate::config::AnimationConfig;

/// Timing resolved for one transition
#[derive(Debug, Clone, Copy)]
pub struct TransitionTiming {
    /// Interpolation duration
    pub duration: Duration,
    /// Hold time before interpolation starts
    pub delay: Duration,
    /// Timing curve
    pub curve: AnimationCurve,
    /// Spring damping ratio, used when the curve is a spring
    pub spring_damping: f32,
    /// Initial spring velocity in total-distance units per second
    pub initial_velocity: f32,
}

impl From<&AnimationConfig> for TransitionTiming {
    fn from(config: &AnimationConfig) -> Self {
        Self {
            duration: config.duration(),
            delay: config.delay(),
            curve: config.curve,
            spring_damping: config.spring_damping,
            initial_velocity: config.initial_velocity,
        }
    }
}

/// Active height transition state
#[derive(Debug, Clone)]
struct ActiveTransition {
    /// Starting height
    from: f32,
    /// Target height
    to: f32,
    /// Time accumulated so far, including any delay
    elapsed: Duration,
    /// Resolved timing
    timing: TransitionTiming,
    /// Generation this transition belongs to
    generation: u64,
}

/// Result of advancing the driver by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// No transition in flight
    Idle,
    /// Transition running; the interpolated height to present
    Running(f32),
    /// Transition just finished; the committed target and its generation
    Finished { target: f32, generation: u64 },
}

/// Height transition driver
///
/// Holds the currently presented (display) height at all times. Starting a
/// new transition replaces the active one and bumps the generation counter,
/// so the replaced transition never reports `Finished`.
#[derive(Debug)]
pub struct HeightAnimator {
    /// Current active transition (if any)
    transition: Option<ActiveTransition>,
    /// Currently presented height
    display: f32,
    /// Generation of the most recently started transition
    generation: u64,
}

impl HeightAnimator {
    pub fn new(initial: f32) -> Self {
        Self {
            transition: None,
            display: initial,
            generation: 0,
        }
    }

    /// Currently presented height
    #[inline]
    pub fn display(&self) -> f32 {
        self.display
    }

    /// Check if a transition is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// The height the driver is heading toward (the display height when idle)
    pub fn target(&self) -> f32 {
        self.transition
            .as_ref()
            .map(|t| t.to)
            .unwrap_or(self.display)
    }

    /// Generation of the most recently started transition
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Jump to a height immediately, cancelling any active transition
    pub fn set_display(&mut self, height: f32) {
        self.transition = None;
        self.display = height;
    }

    /// Start a transition, replacing any active one.
    ///
    /// Returns the generation of the new transition. The replaced
    /// transition's completion is dropped, never fired.
    pub fn begin(&mut self, from: f32, to: f32, timing: TransitionTiming) -> u64 {
        self.generation += 1;
        self.display = from;
        self.transition = Some(ActiveTransition {
            from,
            to,
            elapsed: Duration::ZERO,
            timing,
            generation: self.generation,
        });
        self.generation
    }

    /// Cancel the active transition, holding the current display height
    pub fn cancel(&mut self) {
        self.transition = None;
    }

    /// Advance the active transition by a frame delta.
    ///
    /// Call once per frame. `Finished` is reported exactly once per
    /// transition that runs to completion.
    pub fn advance(&mut self, dt: Duration) -> Step {
        let Some(transition) = self.transition.as_mut() else {
            return Step::Idle;
        };

        transition.elapsed += dt;
        let active = transition.elapsed.saturating_sub(transition.timing.delay);

        if is_complete(active, transition.timing.duration) {
            let target = transition.to;
            let generation = transition.generation;
            self.display = target;
            self.transition = None;
            return Step::Finished { target, generation };
        }

        if transition.elapsed < transition.timing.delay {
            self.display = transition.from;
            return Step::Running(self.display);
        }

        let t = progress(active, transition.timing.duration);
        let eased = transition.timing.curve.apply(
            t,
            transition.timing.spring_damping,
            transition.timing.initial_velocity,
        );
        self.display = lerp(transition.from, transition.to, eased);
        Step::Running(self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(duration_ms: u64) -> TransitionTiming {
        TransitionTiming {
            duration: Duration::from_millis(duration_ms),
            delay: Duration::ZERO,
            curve: AnimationCurve::Linear,
            spring_damping: 0.8,
            initial_velocity: 0.0,
        }
    }

    #[test]
    fn test_begin_starts_transition() {
        let mut animator = HeightAnimator::new(44.0);
        animator.begin(44.0, 144.0, linear(100));
        assert!(animator.is_animating());
        assert_eq!(animator.target(), 144.0);
        assert_eq!(animator.display(), 44.0);
    }

    #[test]
    fn test_advance_interpolates_then_finishes() {
        let mut animator = HeightAnimator::new(44.0);
        let generation = animator.begin(44.0, 144.0, linear(100));

        match animator.advance(Duration::from_millis(50)) {
            Step::Running(h) => assert!((h - 94.0).abs() < 0.001),
            step => panic!("expected Running, got {:?}", step),
        }

        match animator.advance(Duration::from_millis(50)) {
            Step::Finished { target, generation: g } => {
                assert_eq!(target, 144.0);
                assert_eq!(g, generation);
            }
            step => panic!("expected Finished, got {:?}", step),
        }

        assert_eq!(animator.advance(Duration::from_millis(16)), Step::Idle);
        assert_eq!(animator.display(), 144.0);
    }

    #[test]
    fn test_replacement_drops_old_completion() {
        let mut animator = HeightAnimator::new(0.0);
        let first = animator.begin(0.0, 100.0, linear(100));
        animator.advance(Duration::from_millis(50));

        let second = animator.begin(animator.display(), 30.0, linear(100));
        assert!(second > first);

        let mut finishes = Vec::new();
        for _ in 0..20 {
            if let Step::Finished { target, generation } =
                animator.advance(Duration::from_millis(16))
            {
                finishes.push((target, generation));
            }
        }
        assert_eq!(finishes, vec![(30.0, second)]);
    }

    #[test]
    fn test_begin_from_current_display() {
        let mut animator = HeightAnimator::new(0.0);
        animator.begin(0.0, 100.0, linear(100));
        animator.advance(Duration::from_millis(50));
        let midway = animator.display();
        assert!((midway - 50.0).abs() < 0.001);

        animator.begin(midway, 0.0, linear(100));
        assert_eq!(animator.display(), midway);
    }

    #[test]
    fn test_set_display_cancels() {
        let mut animator = HeightAnimator::new(0.0);
        animator.begin(0.0, 100.0, linear(100));
        animator.set_display(60.0);
        assert!(!animator.is_animating());
        assert_eq!(animator.display(), 60.0);
        assert_eq!(animator.advance(Duration::from_millis(16)), Step::Idle);
    }

    #[test]
    fn test_delay_holds_start_height() {
        let mut animator = HeightAnimator::new(10.0);
        let timing = TransitionTiming {
            delay: Duration::from_millis(50),
            ..linear(100)
        };
        animator.begin(10.0, 110.0, timing);

        match animator.advance(Duration::from_millis(25)) {
            Step::Running(h) => assert_eq!(h, 10.0),
            step => panic!("expected Running, got {:?}", step),
        }

        match animator.advance(Duration::from_millis(75)) {
            Step::Running(h) => assert!((h - 60.0).abs() < 0.001),
            step => panic!("expected Running, got {:?}", step),
        }
    }

    #[test]
    fn test_zero_duration_finishes_on_first_advance() {
        let mut animator = HeightAnimator::new(0.0);
        let generation = animator.begin(0.0, 50.0, linear(0));
        assert_eq!(
            animator.advance(Duration::ZERO),
            Step::Finished {
                target: 50.0,
                generation
            }
        );
    }
}
