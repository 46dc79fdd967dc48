//! Orientation, alignment and padding types.
//!
//! Shared by strategies that line children up along an axis and then place
//! each control inside the slot it was given.

use serde::{Deserialize, Serialize};

use crate::primitives::{Point, Size};

/// Direction children are lined up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Left to right; width is the main axis.
    #[default]
    Horizontal,
    /// Top to bottom; height is the main axis.
    Vertical,
}

impl Orientation {
    /// Component of `size` along the main axis.
    #[inline]
    pub fn main(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.width,
            Orientation::Vertical => size.height,
        }
    }

    /// Component of `size` along the cross axis.
    #[inline]
    pub fn cross(self, size: Size) -> i32 {
        match self {
            Orientation::Horizontal => size.height,
            Orientation::Vertical => size.width,
        }
    }

    /// Build a size from main and cross components.
    #[inline]
    pub fn size(self, main: i32, cross: i32) -> Size {
        match self {
            Orientation::Horizontal => Size::new(main, cross),
            Orientation::Vertical => Size::new(cross, main),
        }
    }

    /// Build a point from main and cross coordinates.
    #[inline]
    pub fn point(self, main: i32, cross: i32) -> Point {
        match self {
            Orientation::Horizontal => Point::new(main, cross),
            Orientation::Vertical => Point::new(cross, main),
        }
    }

    /// Total padding along the main axis.
    #[inline]
    pub fn main_padding(self, padding: &Padding) -> i32 {
        match self {
            Orientation::Horizontal => padding.horizontal(),
            Orientation::Vertical => padding.vertical(),
        }
    }

    /// Leading padding as `(main, cross)`.
    #[inline]
    pub fn leading(self, padding: &Padding) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (padding.left, padding.top),
            Orientation::Vertical => (padding.top, padding.left),
        }
    }

    /// Total padding along the cross axis.
    #[inline]
    pub fn cross_padding(self, padding: &Padding) -> i32 {
        match self {
            Orientation::Horizontal => padding.vertical(),
            Orientation::Vertical => padding.horizontal(),
        }
    }
}

/// Horizontal placement of a control inside its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignHorizontal {
    /// Hint width, against the left edge.
    Left,
    /// Hint width, centered.
    Center,
    /// Hint width, against the right edge.
    Right,
    /// Take the whole slot width, up to the control's max width.
    #[default]
    Fill,
    /// Grow up to the control's max width, against the left edge.
    LeftGrow,
    /// Grow up to the control's max width, centered.
    CenterGrow,
    /// Grow up to the control's max width, against the right edge.
    RightGrow,
    /// Hint width but never below min, overflowing the slot to the right.
    ClipLeft,
    /// Hint width but never below min, overflowing on both sides.
    ClipCenter,
    /// Hint width but never below min, overflowing the slot to the left.
    ClipRight,
}

/// Vertical placement of a control inside its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlignVertical {
    Top,
    Center,
    Bottom,
    #[default]
    Fill,
    TopGrow,
    CenterGrow,
    BottomGrow,
    ClipTop,
    ClipCenter,
    ClipBottom,
}

/// Axis-agnostic form of the two alignment enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpanAlign {
    Start,
    Center,
    End,
    Fill,
    StartGrow,
    CenterGrow,
    EndGrow,
    ClipStart,
    ClipCenter,
    ClipEnd,
}

impl From<AlignHorizontal> for SpanAlign {
    fn from(value: AlignHorizontal) -> Self {
        match value {
            AlignHorizontal::Left => SpanAlign::Start,
            AlignHorizontal::Center => SpanAlign::Center,
            AlignHorizontal::Right => SpanAlign::End,
            AlignHorizontal::Fill => SpanAlign::Fill,
            AlignHorizontal::LeftGrow => SpanAlign::StartGrow,
            AlignHorizontal::CenterGrow => SpanAlign::CenterGrow,
            AlignHorizontal::RightGrow => SpanAlign::EndGrow,
            AlignHorizontal::ClipLeft => SpanAlign::ClipStart,
            AlignHorizontal::ClipCenter => SpanAlign::ClipCenter,
            AlignHorizontal::ClipRight => SpanAlign::ClipEnd,
        }
    }
}

impl From<AlignVertical> for SpanAlign {
    fn from(value: AlignVertical) -> Self {
        match value {
            AlignVertical::Top => SpanAlign::Start,
            AlignVertical::Center => SpanAlign::Center,
            AlignVertical::Bottom => SpanAlign::End,
            AlignVertical::Fill => SpanAlign::Fill,
            AlignVertical::TopGrow => SpanAlign::StartGrow,
            AlignVertical::CenterGrow => SpanAlign::CenterGrow,
            AlignVertical::BottomGrow => SpanAlign::EndGrow,
            AlignVertical::ClipTop => SpanAlign::ClipStart,
            AlignVertical::ClipCenter => SpanAlign::ClipCenter,
            AlignVertical::ClipBottom => SpanAlign::ClipEnd,
        }
    }
}

/// Place a control of the given hint/min/max length inside a slot span
/// starting at `start` with length `avail`. Returns `(position, length)`.
pub(crate) fn place_span(
    align: SpanAlign,
    start: i32,
    avail: i32,
    hint: i32,
    min: i32,
    max: i32,
) -> (i32, i32) {
    let avail = avail.max(0);
    let len = match align {
        SpanAlign::Fill => max.min(avail),
        SpanAlign::Start | SpanAlign::Center | SpanAlign::End => hint.min(avail),
        SpanAlign::StartGrow | SpanAlign::CenterGrow | SpanAlign::EndGrow => max.min(avail),
        SpanAlign::ClipStart | SpanAlign::ClipCenter | SpanAlign::ClipEnd => {
            hint.min(avail).max(min)
        }
    }
    .max(0);

    let offset = match align {
        SpanAlign::Fill | SpanAlign::Start | SpanAlign::StartGrow | SpanAlign::ClipStart => 0,
        SpanAlign::Center | SpanAlign::CenterGrow | SpanAlign::ClipCenter => (avail - len) / 2,
        SpanAlign::End | SpanAlign::EndGrow | SpanAlign::ClipEnd => avail - len,
    };

    (start.saturating_add(offset), len)
}

/// Padding around a control inside its slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Padding {
    /// Create padding with explicit values for each side (CSS order).
    pub fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform padding on all sides.
    pub fn all(value: i32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric padding (horizontal, vertical).
    pub fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal padding.
    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Total vertical padding.
    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// Both totals as a size.
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }

    /// Offset of the inner area from the outer top-left corner.
    pub fn leading(&self) -> Point {
        Point::new(self.left, self.top)
    }
}
