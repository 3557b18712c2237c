//! Host-side collaboration hooks.
//!
//! Every method has a default implementation, so a host implements only the
//! hooks it cares about. Hooks fire synchronously on the calling thread at
//! fixed points in the height pipeline and keyboard handling.

use crate::keyboard::{KeyboardNotification, KeyboardTiming};

/// Snapshot of bar state passed to every delegate hook
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStatus {
    /// The most recently decided target height (equals the committed height
    /// when no transition is in flight)
    pub height: f32,
    /// The last committed height
    pub committed_height: f32,
    /// Whether the keyboard is currently presented
    pub keyboard_presented: bool,
    /// The bar's frame height on the host surface
    pub frame_height: f32,
    /// Whether a height transition is currently animating
    pub animating: bool,
}

/// Collaboration hooks the host screen can implement.
pub trait BarDelegate {
    /// Lowest y the bar's top edge may reach, measured from the top of the
    /// screen. `None` falls back to the host surface's top bar height.
    fn maximum_bar_y(&mut self, status: BarStatus) -> Option<f32> {
        let _ = status;
        None
    }

    /// Override the height the pipeline is about to apply. Receives the
    /// clamped suggestion and the current bar height (the pending target
    /// while a transition is in flight); the return value is applied
    /// without re-clamping.
    fn next_height(&mut self, status: BarStatus, suggested: f32, current: f32) -> f32 {
        let _ = (status, current);
        suggested
    }

    /// Runs inside the animated block of a height transition, before
    /// interpolation starts.
    fn will_animate_to_height(&mut self, status: BarStatus, height: f32, keyboard_height: f32) {
        let _ = (status, height, keyboard_height);
    }

    /// Runs after a height transition commits.
    fn did_animate_to_height(&mut self, status: BarStatus, height: f32, keyboard_height: f32) {
        let _ = (status, height, keyboard_height);
    }

    /// The keyboard is about to present. `height` is the total presented
    /// height (keyboard plus bar content); `timing` carries the keyboard's
    /// own animation parameters for hosts that co-animate.
    fn keyboard_will_present(&mut self, status: BarStatus, height: f32, timing: &KeyboardTiming) {
        let _ = (status, height, timing);
    }

    /// The keyboard is about to dismiss. The raw notification is forwarded
    /// so hosts can read frames and timing.
    fn keyboard_will_dismiss(&mut self, status: BarStatus, notification: &KeyboardNotification) {
        let _ = (status, notification);
    }

    /// The visible keyboard height changed outside a presentation, for
    /// example during an interactive dismissal or an interactive enable.
    fn keyboard_did_change_height(&mut self, status: BarStatus, height: f32) {
        let _ = (status, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::keyboard::KeyboardNotification;

    struct Defaults;

    impl BarDelegate for Defaults {}

    fn status() -> BarStatus {
        BarStatus {
            height: 44.0,
            committed_height: 44.0,
            keyboard_presented: false,
            frame_height: 44.0,
            animating: false,
        }
    }

    #[test]
    fn test_defaults_pass_through() {
        let mut delegate = Defaults;
        assert_eq!(delegate.maximum_bar_y(status()), None);
        assert_eq!(delegate.next_height(status(), 120.0, 44.0), 120.0);

        let note = KeyboardNotification::will_hide(
            Rect::new(0.0, 500.0, 375.0, 300.0),
            Rect::new(0.0, 800.0, 375.0, 300.0),
            KeyboardTiming::default(),
        );
        delegate.will_animate_to_height(status(), 120.0, 420.0);
        delegate.did_animate_to_height(status(), 120.0, 420.0);
        delegate.keyboard_will_present(status(), 344.0, &KeyboardTiming::default());
        delegate.keyboard_will_dismiss(status(), &note);
        delegate.keyboard_did_change_height(status(), 150.0);
    }
}
