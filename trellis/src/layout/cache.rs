//! Measurement cache for slots and layouts.
//!
//! A `SizeCache` stores one hint/min/max triple together with the available
//! space it was measured for. When the measurement does not depend on the
//! available space the cache answers for any space.

use crate::control::Measurement;
use crate::primitives::Size;

/// A cached measurement, keyed by the space it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeCache {
    valid: bool,
    space: Size,
    size: Size,
    min: Size,
    max: Size,
    size_from_space: bool,
}

impl SizeCache {
    /// Create an empty (invalid) cache.
    pub const fn new() -> Self {
        Self {
            valid: false,
            space: Size::ZERO,
            size: Size::ZERO,
            min: Size::ZERO,
            max: Size::ZERO,
            size_from_space: false,
        }
    }

    /// Store a measurement.
    ///
    /// Negative values are treated as zero, `max` is raised to `min` and the
    /// hint size is clamped into `[min, max]`.
    pub fn store(&mut self, space: Size, measurement: Measurement) {
        let min = measurement.min.non_negative();
        let max = measurement.max.non_negative().max(min);
        self.valid = true;
        self.space = space;
        self.min = min;
        self.max = max;
        self.size = measurement.size.non_negative().clamp(min, max);
        self.size_from_space = measurement.size_from_space;
    }

    /// Mark the cache as stale.
    #[inline]
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the cached value answers a request for `space`.
    #[inline]
    pub fn covers(&self, space: Size) -> bool {
        self.valid && (!self.size_from_space || self.space == space)
    }

    /// The space the cached value was measured for.
    #[inline]
    pub fn space(&self) -> Size {
        self.space
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn min(&self) -> Size {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Size {
        self.max
    }

    #[inline]
    pub fn size_from_space(&self) -> bool {
        self.size_from_space
    }

    /// The cached value as a measurement.
    #[inline]
    pub fn measurement(&self) -> Measurement {
        Measurement {
            size: self.size,
            min: self.min,
            max: self.max,
            size_from_space: self.size_from_space,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_clamps_size() {
        let mut cache = SizeCache::new();
        cache.store(
            Size::new(100, 100),
            Measurement::new(Size::new(5, 500), Size::new(10, 10), Size::new(200, 200)),
        );

        assert!(cache.is_valid());
        assert_eq!(cache.size(), Size::new(10, 200));
    }

    #[test]
    fn test_store_raises_max_to_min() {
        let mut cache = SizeCache::new();
        cache.store(
            Size::UNRESTRICTED,
            Measurement::new(Size::new(20, 20), Size::new(30, 30), Size::new(10, 40)),
        );

        assert_eq!(cache.max(), Size::new(30, 40));
        assert_eq!(cache.size(), Size::new(30, 30));
    }

    #[test]
    fn test_space_independent_cache_covers_any_space() {
        let mut cache = SizeCache::new();
        cache.store(Size::UNRESTRICTED, Measurement::fixed(Size::new(40, 20)));

        assert!(cache.covers(Size::new(10, 10)));
        assert!(cache.covers(Size::UNRESTRICTED));
    }

    #[test]
    fn test_space_dependent_cache_covers_only_its_space() {
        let mut cache = SizeCache::new();
        let m = Measurement::fixed(Size::new(40, 20)).depending_on_space();
        cache.store(Size::new(40, -1), m);

        assert!(cache.covers(Size::new(40, -1)));
        assert!(!cache.covers(Size::new(50, -1)));

        cache.invalidate();
        assert!(!cache.covers(Size::new(40, -1)));
    }
}
