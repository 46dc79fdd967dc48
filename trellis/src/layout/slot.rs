//! Per-child layout record.

use crate::control::ControlId;
use crate::layout::cache::SizeCache;
use crate::primitives::{Rect, Size};

/// One child as seen by a layout.
///
/// `E` carries strategy data (alignment, anchors, weights). The base layout
/// only touches the handle, the caches and the bounds.
#[derive(Debug, Clone)]
pub struct Slot<E> {
    control: ControlId,
    pub(crate) unrestricted: SizeCache,
    pub(crate) restricted: SizeCache,
    pub(crate) bounds: Rect,
    pub(crate) visible: bool,
    pub data: E,
}

impl<E> Slot<E> {
    pub(crate) fn new(control: ControlId, data: E) -> Self {
        Self {
            control,
            unrestricted: SizeCache::new(),
            restricted: SizeCache::new(),
            bounds: Rect::ZERO,
            visible: true,
            data,
        }
    }

    /// Handle of the child this slot belongs to.
    pub fn control(&self) -> ControlId {
        self.control
    }

    /// Placement computed by the last arrange pass.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Visibility sampled at the start of the current pass.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Best known hint size: restricted measurement first, then unrestricted.
    pub fn hint_size(&self) -> Size {
        self.best_cache().map(SizeCache::size).unwrap_or(Size::ZERO)
    }

    pub fn min_size(&self) -> Size {
        self.best_cache().map(SizeCache::min).unwrap_or(Size::ZERO)
    }

    pub fn max_size(&self) -> Size {
        self.best_cache().map(SizeCache::max).unwrap_or(Size::ZERO)
    }

    /// Whether the child reported a measurement that depends on the space.
    pub fn depends_on_space(&self) -> bool {
        (self.unrestricted.is_valid() && self.unrestricted.size_from_space())
            || (self.restricted.is_valid() && self.restricted.size_from_space())
    }

    /// Drop both cached measurements.
    pub fn invalidate(&mut self) {
        self.unrestricted.invalidate();
        self.restricted.invalidate();
    }

    fn best_cache(&self) -> Option<&SizeCache> {
        if self.restricted.is_valid() {
            Some(&self.restricted)
        } else if self.unrestricted.is_valid() {
            Some(&self.unrestricted)
        } else {
            None
        }
    }
}
