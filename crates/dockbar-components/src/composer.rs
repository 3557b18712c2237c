//! Text composer component.
//!
//! Reports a content height derived from the wrapped row count of its text
//! buffer, so the bar grows as the user types and shrinks when lines are
//! deleted. The composer owns no real text view; the host renders the buffer
//! and forwards edits here.

use std::cell::Cell;

use tracing::trace;

use dockbar_core::component::{Component, InputSurfaceId};

use crate::text::{wrapped_row_count, FontMetrics};

/// Wrap result reused until the buffer or measurement inputs change
#[derive(Debug, Clone, Copy)]
struct WrapCache {
    revision: u64,
    columns: usize,
    rows: usize,
}

/// A growing text input hosted in the bar.
pub struct TextComposer {
    surface: InputSurfaceId,
    text: String,
    placeholder: String,
    minimum_height: f32,
    vertical_margin: f32,
    horizontal_margin: f32,
    font: FontMetrics,
    bar_width: f32,
    left_slot_width: f32,
    right_slot_width: f32,
    /// Vertical scroll of the composer's own text area
    scroll_offset: f32,
    /// Bumped by every edit or measurement change
    revision: u64,
    wrap_cache: Cell<Option<WrapCache>>,
}

impl TextComposer {
    pub fn new(surface: InputSurfaceId) -> Self {
        Self {
            surface,
            text: String::new(),
            placeholder: String::new(),
            minimum_height: 44.0,
            vertical_margin: 7.0,
            horizontal_margin: 12.0,
            font: FontMetrics::default(),
            bar_width: 375.0,
            left_slot_width: 0.0,
            right_slot_width: 0.0,
            scroll_offset: 0.0,
            revision: 0,
            wrap_cache: Cell::new(None),
        }
    }

    // ----- text buffer -----

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.mark_dirty();
    }

    /// Append at the end of the buffer
    pub fn insert_str(&mut self, s: &str) {
        self.text.push_str(s);
        self.mark_dirty();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.mark_dirty();
    }

    /// Whether a send action should be available
    pub fn is_send_enabled(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    // ----- measurement inputs -----

    pub fn minimum_height(&self) -> f32 {
        self.minimum_height
    }

    pub fn set_minimum_height(&mut self, height: f32) {
        self.minimum_height = height;
        self.mark_dirty();
    }

    pub fn vertical_margin(&self) -> f32 {
        self.vertical_margin
    }

    pub fn set_vertical_margin(&mut self, margin: f32) {
        self.vertical_margin = margin;
        self.mark_dirty();
    }

    pub fn set_horizontal_margin(&mut self, margin: f32) {
        self.horizontal_margin = margin;
        self.mark_dirty();
    }

    pub fn font(&self) -> FontMetrics {
        self.font
    }

    pub fn set_font(&mut self, font: FontMetrics) {
        self.font = font;
        self.mark_dirty();
    }

    /// Width of the bar the composer lays out in
    pub fn set_bar_width(&mut self, width: f32) {
        self.bar_width = width;
        self.mark_dirty();
    }

    /// Widths reserved for accessory views left and right of the text area
    pub fn set_slot_widths(&mut self, left: f32, right: f32) {
        self.left_slot_width = left;
        self.right_slot_width = right;
        self.mark_dirty();
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ----- measurement -----

    fn mark_dirty(&mut self) {
        self.revision += 1;
    }

    fn wrap_width(&self) -> f32 {
        let reserved =
            self.left_slot_width + self.right_slot_width + 2.0 * self.horizontal_margin;
        (self.bar_width - reserved).max(0.0)
    }

    fn rows(&self) -> usize {
        let columns = self.font.columns_for_width(self.wrap_width());
        if let Some(cache) = self.wrap_cache.get() {
            if cache.revision == self.revision && cache.columns == columns {
                return cache.rows;
            }
        }
        let rows = wrapped_row_count(&self.text, columns);
        self.wrap_cache.set(Some(WrapCache {
            revision: self.revision,
            columns,
            rows,
        }));
        rows
    }

    /// Height of the wrapped text alone, without margins
    fn text_height(&self) -> f32 {
        self.rows() as f32 * self.font.line_height
    }
}

impl Component for TextComposer {
    fn content_height(&self) -> f32 {
        if self.text.is_empty() {
            return self.minimum_height;
        }
        let measured = self.text_height() + 2.0 * self.vertical_margin;
        measured.max(self.minimum_height)
    }

    fn input_surface(&self) -> Option<InputSurfaceId> {
        Some(self.surface)
    }

    fn on_animated_layout(&mut self, height: f32) {
        // Keep the caret line visible while the bar resizes
        let visible = (height - 2.0 * self.vertical_margin).max(0.0);
        self.scroll_offset = (self.text_height() - visible).max(0.0);
    }

    fn on_post_animation_layout(&mut self, height: f32) {
        let rows = self.rows();
        trace!(height, rows, "composer layout finalized");
    }
}
