//! Core primitive types for Trellis.
//!
//! Integer pixel geometry shared by the layout engine and the controls it
//! arranges. Lengths are `i32`; a negative component of an available space
//! means "unlimited" on that axis.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Largest representable length, used for unbounded maximum sizes.
pub const SIZE_LIMIT: i32 = i32::MAX;

/// Add two lengths, saturating at [`SIZE_LIMIT`] instead of wrapping.
#[inline]
pub fn add_lengths(a: i32, b: i32) -> i32 {
    a.saturating_add(b)
}

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_add(rhs.x),
            y: self.y.saturating_add(rhs.y),
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x.saturating_sub(rhs.x),
            y: self.y.saturating_sub(rhs.y),
        }
    }
}

/// A 2D size, also used for available spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    /// Available space without any constraint on either axis.
    pub const UNRESTRICTED: Self = Self { width: -1, height: -1 };

    /// The largest size a control can ask for.
    pub const UNBOUNDED: Self = Self {
        width: SIZE_LIMIT,
        height: SIZE_LIMIT,
    };

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether this space leaves both axes unconstrained.
    #[inline]
    pub fn is_unrestricted(&self) -> bool {
        self.width < 0 && self.height < 0
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Size) -> Size {
        Size::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Clamp into `[min, max]` component-wise. `min` wins when the two cross.
    #[inline]
    pub fn clamp(self, min: Size, max: Size) -> Size {
        Size::new(
            self.width.min(max.width).max(min.width),
            self.height.min(max.height).max(min.height),
        )
    }

    /// Replace negative components with zero.
    #[inline]
    pub fn non_negative(self) -> Size {
        Size::new(self.width.max(0), self.height.max(0))
    }

    /// Component-wise saturating addition.
    #[inline]
    pub fn saturating_add(self, other: Size) -> Size {
        Size::new(
            add_lengths(self.width, other.width),
            add_lengths(self.height, other.height),
        )
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self { width, height }
    }
}

/// A rectangle in the coordinate space of the owning container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Get the origin point of this rectangle.
    #[inline]
    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// Get the size of this rectangle.
    #[inline]
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Get the right edge X coordinate.
    #[inline]
    pub fn right(&self) -> i32 {
        add_lengths(self.x, self.width)
    }

    /// Get the bottom edge Y coordinate.
    #[inline]
    pub fn bottom(&self) -> i32 {
        add_lengths(self.y, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_add_sub() {
        let p = Point::new(10, 20) + Point::new(5, 5);
        assert_eq!(p, Point::new(15, 25));
        assert_eq!(p - Point::new(15, 25), Point::ORIGIN);
    }

    #[test]
    fn test_size_unrestricted() {
        assert!(Size::UNRESTRICTED.is_unrestricted());
        assert!(!Size::new(-1, 100).is_unrestricted());
        assert!(!Size::ZERO.is_unrestricted());
    }

    #[test]
    fn test_size_clamp_prefers_min() {
        let clamped = Size::new(50, 50).clamp(Size::new(60, 10), Size::new(40, 30));
        assert_eq!(clamped, Size::new(60, 30));
    }

    #[test]
    fn test_size_saturating_add() {
        let big = Size::new(SIZE_LIMIT, 10).saturating_add(Size::new(100, 10));
        assert_eq!(big, Size::new(SIZE_LIMIT, 20));
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.right(), 40);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.origin(), Point::new(10, 20));
        assert_eq!(r.size(), Size::new(30, 40));
        assert_eq!(Rect::from_origin_size(r.origin(), r.size()), r);
    }
}
