//! Attachment tray component.
//!
//! A fixed-height grid of attachment thumbnails with an optional search
//! field. The tray never drives the bar height from its content; switching
//! to it snaps the bar to the configured tray height.

use tracing::debug;

use dockbar_core::component::{Component, InputSurfaceId};

/// A fixed-height thumbnail tray hosted in the bar.
pub struct AttachmentTray {
    content_height: f32,
    search_surface: Option<InputSurfaceId>,
    thumbnail_count: usize,
    /// Height passed into the most recent layout hook
    last_layout_height: Option<f32>,
    animated_layouts: u32,
    post_layouts: u32,
}

impl Default for AttachmentTray {
    fn default() -> Self {
        Self {
            content_height: 200.0,
            search_surface: None,
            thumbnail_count: 0,
            last_layout_height: None,
            animated_layouts: 0,
            post_layouts: 0,
        }
    }
}

impl AttachmentTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tray with a focusable search field
    pub fn with_search_surface(surface: InputSurfaceId) -> Self {
        Self {
            search_surface: Some(surface),
            ..Self::default()
        }
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height;
    }

    pub fn thumbnail_count(&self) -> usize {
        self.thumbnail_count
    }

    pub fn set_thumbnail_count(&mut self, count: usize) {
        self.thumbnail_count = count;
    }

    pub fn last_layout_height(&self) -> Option<f32> {
        self.last_layout_height
    }

    pub fn animated_layouts(&self) -> u32 {
        self.animated_layouts
    }

    pub fn post_layouts(&self) -> u32 {
        self.post_layouts
    }
}

impl Component for AttachmentTray {
    fn content_height(&self) -> f32 {
        self.content_height
    }

    fn input_surface(&self) -> Option<InputSurfaceId> {
        self.search_surface
    }

    fn on_animated_layout(&mut self, height: f32) {
        self.animated_layouts += 1;
        self.last_layout_height = Some(height);
    }

    fn on_post_animation_layout(&mut self, height: f32) {
        self.post_layouts += 1;
        self.last_layout_height = Some(height);
        debug!(height, thumbnails = self.thumbnail_count, "tray layout finalized");
    }
}
