//! Height transition animation system.
//!
//! Implements the interpolation behind animated bar height changes with
//! configurable easing and timing parameters.
//!
//! # Architecture
//!
//! - `easing` - Pure easing functions (cubic family, damped spring)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `driver` - Transition driver combining the two
//!
//! # Usage
//!
//! ```ignore
//! use dockbar_core::animation::{HeightAnimator, TransitionTiming};
//!
//! let mut animator = HeightAnimator::new(44.0);
//! animator.begin(44.0, 120.0, TransitionTiming::from(&config.animation));
//!
//! // In the frame loop, advance with the elapsed delta
//! match animator.advance(frame_delta) {
//!     Step::Running(height) => present(height),
//!     Step::Finished { target, .. } => commit(target),
//!     Step::Idle => {}
//! }
//! ```

pub mod driver;
pub mod easing;
pub mod timing;

// Re-exports for convenient access
pub use driver::{HeightAnimator, Step, TransitionTiming};
pub use easing::AnimationCurve;
