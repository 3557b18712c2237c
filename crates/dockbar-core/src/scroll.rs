//! Scroll surface state fed into the drag controller.
//!
//! The host owns the real scroll view; the engine only ever sees immutable
//! metric snapshots and pan gesture phase changes.

use crate::geometry::EdgeInsets;

/// Pan gesture recognizer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// Snapshot of a scroll surface's layout at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Total scrollable content height
    pub content_height: f32,
    /// Visible frame height of the scroll surface
    pub frame_height: f32,
    /// Content insets
    pub insets: EdgeInsets,
    /// Current vertical content offset
    pub offset_y: f32,
}

impl ScrollMetrics {
    pub fn new(content_height: f32, frame_height: f32, insets: EdgeInsets, offset_y: f32) -> Self {
        Self {
            content_height,
            frame_height,
            insets,
            offset_y,
        }
    }

    /// The offset at which the content bottom meets the frame bottom.
    ///
    /// Negative when the content is shorter than the frame; an unscrolled
    /// surface is then already at the bottom.
    pub fn bottom_offset(&self) -> f32 {
        self.content_height - (self.frame_height - self.insets.bottom)
    }

    /// Whether the surface is scrolled to (or past) the bottom of its content
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.offset_y >= self.bottom_offset() - 0.5
    }

    /// The same metrics moved to the bottom offset
    pub fn scrolled_to_bottom(&self) -> Self {
        Self {
            offset_y: self.bottom_offset(),
            ..*self
        }
    }
}
