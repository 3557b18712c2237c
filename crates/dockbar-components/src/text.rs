//! Text measurement for height-driving components.
//!
//! Nothing here renders text. Heights come from counting wrapped rows at a
//! column width derived from approximate font metrics, which is enough to
//! drive the bar's height pipeline deterministically.

use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Approximate metrics of the composer font.
///
/// The defaults model a 14pt-ish monospace face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Height of one text row, in points
    pub line_height: f32,
    /// Horizontal advance of one display column, in points
    pub advance_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            line_height: 17.0,
            advance_width: 8.0,
        }
    }
}

impl FontMetrics {
    pub fn new(line_height: f32, advance_width: f32) -> Self {
        Self {
            line_height,
            advance_width,
        }
    }

    /// Number of whole display columns that fit in `width` points
    pub fn columns_for_width(&self, width: f32) -> usize {
        if self.advance_width <= 0.0 || width <= 0.0 {
            return 0;
        }
        (width / self.advance_width).floor() as usize
    }
}

/// Display width of `text` in columns; the widest hard line wins
pub fn display_columns(text: &str) -> usize {
    text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0)
}

/// Count the rows `text` occupies when wrapped to `columns` display columns.
///
/// Empty text still occupies one row (the caret line), and a trailing
/// newline opens a new one. Hard line breaks wrap independently. A zero
/// column width degenerates to hard lines only.
pub fn wrapped_row_count(text: &str, columns: usize) -> usize {
    if text.is_empty() {
        return 1;
    }
    let mut rows = 0;
    for line in text.split('\n') {
        if columns == 0 || UnicodeWidthStr::width(line) <= columns {
            rows += 1;
        } else {
            rows += wrap(line, columns).len();
        }
    }
    rows
}
