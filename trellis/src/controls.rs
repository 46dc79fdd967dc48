//! Reference controls: `Block` and `TextBlock`.
//!
//! These are the leaves used by the scene tool and the tests. They do not
//! draw anything; they only answer measurements and remember where they
//! were placed.

use unicode_width::UnicodeWidthStr;

use crate::control::{Control, Measurement};
use crate::primitives::{add_lengths, Point, Rect, Size};

// =========================================================================
// Block
// =========================================================================

/// A box with fixed size preferences.
#[derive(Debug, Clone)]
pub struct Block {
    label: Option<String>,
    hint: Size,
    min: Size,
    max: Size,
    position: Point,
    visible: bool,
    on_top: bool,
    bounds: Rect,
}

impl Block {
    pub fn new(hint: Size, min: Size, max: Size) -> Self {
        Self {
            label: None,
            hint,
            min,
            max,
            position: Point::ORIGIN,
            visible: true,
            on_top: false,
            bounds: Rect::ZERO,
        }
    }

    /// Exactly `size`, neither growing nor shrinking.
    pub fn fixed(size: Size) -> Self {
        Self::new(size, size, size)
    }

    /// Prefers `hint`, accepts anything from zero to unbounded.
    pub fn flexible(hint: Size) -> Self {
        Self::new(hint, Size::ZERO, Size::UNBOUNDED)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Position used by layouts that let children place themselves.
    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn on_top(mut self) -> Self {
        self.on_top = true;
        self
    }

    /// Change the size preferences. The owner must be told the child resized.
    pub fn set_sizes(&mut self, hint: Size, min: Size, max: Size) {
        self.hint = hint;
        self.min = min;
        self.max = max;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Control for Block {
    fn on_measure(&mut self, _available: Size) -> Measurement {
        Measurement::new(self.hint, self.min, self.max)
    }

    fn layout_update(&mut self, position: Point, size: Size) {
        self.bounds = Rect::from_origin_size(position, size);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn hint_position(&self) -> Point {
        self.position
    }

    fn always_on_top(&self) -> bool {
        self.on_top
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

// =========================================================================
// TextBlock
// =========================================================================

/// Word-wrapped text on a fixed character grid.
///
/// Without a width limit the text stays on one line. With one it wraps
/// greedily at spaces, never narrower than its longest word, so its height
/// depends on the width it is given.
#[derive(Debug, Clone)]
pub struct TextBlock {
    label: Option<String>,
    text: String,
    char_width: i32,
    line_height: i32,
    visible: bool,
    bounds: Rect,
}

impl TextBlock {
    pub const DEFAULT_CHAR_WIDTH: i32 = 8;
    pub const DEFAULT_LINE_HEIGHT: i32 = 16;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
            char_width: Self::DEFAULT_CHAR_WIDTH,
            line_height: Self::DEFAULT_LINE_HEIGHT,
            visible: true,
            bounds: Rect::ZERO,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Cell size of one character.
    pub fn metrics(mut self, char_width: i32, line_height: i32) -> Self {
        self.char_width = char_width.max(0);
        self.line_height = line_height.max(0);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The owner must be told the child resized.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn word_widths(&self) -> Vec<i32> {
        self.text
            .split_whitespace()
            .map(|w| (w.width() as i32).saturating_mul(self.char_width))
            .collect()
    }

    /// Lay the text out for `wrap_width`. Returns `(widest line, line count)`.
    fn wrap(&self, words: &[i32], wrap_width: i32) -> (i32, i32) {
        let space = self.char_width;
        let mut widest = 0;
        let mut lines = 1;
        let mut line = 0;

        for &word in words {
            if line == 0 {
                line = word;
                continue;
            }
            let extended = add_lengths(add_lengths(line, space), word);
            if extended <= wrap_width {
                line = extended;
            } else {
                widest = widest.max(line);
                lines += 1;
                line = word;
            }
        }

        (widest.max(line), lines)
    }
}

impl Control for TextBlock {
    fn on_measure(&mut self, available: Size) -> Measurement {
        let words = self.word_widths();
        let longest = words.iter().copied().max().unwrap_or(0);
        let wrap_width = if available.width < 0 {
            i32::MAX
        } else {
            available.width.max(longest)
        };
        let (width, lines) = self.wrap(&words, wrap_width);

        let size = Size::new(width, lines.saturating_mul(self.line_height));
        let min = Size::new(longest, self.line_height);
        Measurement::new(size, min, Size::UNBOUNDED).depending_on_space()
    }

    fn layout_update(&mut self, position: Point, size: Size) {
        self.bounds = Rect::from_origin_size(position, size);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
