//! The contract between layouts and the controls they arrange.
//!
//! A layout never owns controls. It reaches them through a [`LayoutHost`]
//! (normally the owning [`Container`]) and talks to each one through the
//! [`Control`] trait: measure it, then tell it where it ended up.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::container::Container;
use crate::primitives::{Point, Rect, Size};

// =========================================================================
// Measurement
// =========================================================================

/// Result of measuring a control for a given available space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Measurement {
    /// Preferred ("hint") size.
    pub size: Size,
    /// Smallest usable size.
    pub min: Size,
    /// Largest useful size.
    pub max: Size,
    /// Whether `size` was derived from the available space (wrapping text).
    pub size_from_space: bool,
}

impl Measurement {
    /// A measurement that does not depend on the available space.
    pub const fn new(size: Size, min: Size, max: Size) -> Self {
        Self {
            size,
            min,
            max,
            size_from_space: false,
        }
    }

    /// A control that is exactly `size` big.
    pub const fn fixed(size: Size) -> Self {
        Self::new(size, size, size)
    }

    /// A control that prefers `size` but accepts anything from zero up.
    pub const fn flexible(size: Size) -> Self {
        Self::new(size, Size::ZERO, Size::UNBOUNDED)
    }

    /// Mark the measurement as depending on the available space.
    pub const fn depending_on_space(mut self) -> Self {
        self.size_from_space = true;
        self
    }
}

// =========================================================================
// ControlId
// =========================================================================

/// Stable handle of a child control, assigned when it joins a container.
///
/// Slots store this instead of a reference so a layout never borrows the
/// controls it arranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u32);

static NEXT_CONTROL_ID: AtomicU32 = AtomicU32::new(1);

impl ControlId {
    /// Allocate a new unique id.
    pub fn next() -> Self {
        Self(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u32 {
        self.0
    }
}

// =========================================================================
// Control trait
// =========================================================================

/// A visual element that can be measured and placed by a layout.
pub trait Control {
    /// Report the sizes this control wants for `available` space.
    ///
    /// A negative component of `available` means that axis is unlimited.
    fn on_measure(&mut self, available: Size) -> Measurement;

    /// Apply the final position (relative to the parent's layout area) and
    /// size. Called once per arrange pass of the parent's layout.
    fn layout_update(&mut self, position: Point, size: Size);

    /// The bounds last applied by `layout_update`.
    fn bounds(&self) -> Rect;

    /// Hidden controls are neither measured nor placed.
    fn is_visible(&self) -> bool {
        true
    }

    /// Where the control wants to be when its parent does not position it.
    fn hint_position(&self) -> Point {
        Point::ORIGIN
    }

    /// Controls that always stay above (after) their regular siblings.
    fn always_on_top(&self) -> bool {
        false
    }

    /// Called by the parent container after the control's index changed.
    fn index_changed(&mut self) {}

    /// Optional name used by diagnostics and scene dumps.
    fn label(&self) -> Option<&str> {
        None
    }

    fn as_container(&self) -> Option<&Container> {
        None
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        None
    }
}

// =========================================================================
// LayoutHost trait
// =========================================================================

/// The owner side of a layout: the available space and the child list.
///
/// Implemented by [`Container`]. Tests implement it directly to drive a
/// layout without a container.
pub trait LayoutHost {
    /// Space available to the layout, after the owner's own padding.
    fn layout_space(&self) -> Size;

    fn child_count(&self) -> usize;

    fn child_id(&self, index: usize) -> Option<ControlId>;

    fn child(&self, index: usize) -> Option<&dyn Control>;

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Control>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_constructors() {
        let fixed = Measurement::fixed(Size::new(10, 20));
        assert_eq!(fixed.min, fixed.max);
        assert!(!fixed.size_from_space);

        let flexible = Measurement::flexible(Size::new(10, 20)).depending_on_space();
        assert_eq!(flexible.min, Size::ZERO);
        assert_eq!(flexible.max, Size::UNBOUNDED);
        assert!(flexible.size_from_space);
    }

    #[test]
    fn test_control_ids_are_unique() {
        let a = ControlId::next();
        let b = ControlId::next();
        assert_ne!(a, b);
        assert!(b.get() > a.get());
    }
}
