//! Geometry primitives shared across the engine.
//!
//! All lengths are f32 points. Height comparisons go through half-unit
//! rounding so sub-pixel noise from layout math never triggers spurious
//! transitions.

/// A point in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }
}

/// Edge insets for scrollable content
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// Round a length to the nearest half point
#[inline]
pub fn round_to_nearest_half(value: f32) -> f32 {
    (value * 2.0).round() / 2.0
}

/// Whether two lengths agree after half-point rounding
#[inline]
pub fn heights_equal(a: f32, b: f32) -> bool {
    round_to_nearest_half(a) == round_to_nearest_half(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_nearest_half() {
        assert_eq!(round_to_nearest_half(44.0), 44.0);
        assert_eq!(round_to_nearest_half(44.2), 44.0);
        assert_eq!(round_to_nearest_half(44.25), 44.5);
        assert_eq!(round_to_nearest_half(44.3), 44.5);
        assert_eq!(round_to_nearest_half(44.75), 45.0);
        assert_eq!(round_to_nearest_half(-0.3), -0.5);
    }

    #[test]
    fn test_heights_equal_absorbs_layout_noise() {
        assert!(heights_equal(100.0, 100.2));
        assert!(heights_equal(100.26, 100.5));
        assert!(!heights_equal(100.0, 100.5));
        assert!(!heights_equal(100.0, 101.0));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(0.0, 450.0, 375.0, 350.0);
        assert_eq!(r.min_y(), 450.0);
        assert_eq!(r.max_y(), 800.0);
        assert_eq!(r.height(), 350.0);
        assert_eq!(r.width(), 375.0);
    }
}
