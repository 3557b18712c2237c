//! Content components hosted by the bar.
//!
//! A component supplies the bar's content height and optionally an input
//! surface that receives focus. Exactly one component is selected at a time;
//! the bar drives the selected component's layout hooks around every height
//! transition.

/// Identifier for a component registered with the bar.
///
/// Minted by the bar when the component is registered. Stable for the
/// lifetime of the registration, never reused within one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Identifier for a focusable input surface owned by the host.
///
/// The engine never holds the surface itself; it only routes focus requests
/// through the host by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputSurfaceId(u64);

impl InputSurfaceId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// A swappable piece of bar content.
pub trait Component {
    /// Desired content height for the bar, in points.
    fn content_height(&self) -> f32;

    /// The focusable input surface this component exposes, if any.
    fn input_surface(&self) -> Option<InputSurfaceId> {
        None
    }

    /// Runs inside the animated block of a height transition, before the
    /// interpolation starts. `height` is the transition target.
    fn on_animated_layout(&mut self, height: f32) {
        let _ = height;
    }

    /// Runs after a height transition commits.
    fn on_post_animation_layout(&mut self, height: f32) {
        let _ = height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Component for Fixed {
        fn content_height(&self) -> f32 {
            120.0
        }
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut c = Fixed;
        assert_eq!(c.content_height(), 120.0);
        assert_eq!(c.input_surface(), None);
        c.on_animated_layout(200.0);
        c.on_post_animation_layout(200.0);
    }

    #[test]
    fn test_id_round_trip() {
        let id = ComponentId::from_raw(7);
        assert_eq!(id.as_raw(), 7);
        let surface = InputSurfaceId::from_raw(42);
        assert_eq!(surface.as_raw(), 42);
    }
}
