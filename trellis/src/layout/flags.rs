//! Reaction and dirt flags.
//!
//! A strategy declares which events require a re-arrangement
//! (`LAYOUT_ON_*`) and which may change its own aggregate size
//! (`RESIZE_ON_*`). Dirt is reported with a [`DirtyFlags`] reason and a
//! [`DirtySource`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Why something became dirty.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct DirtyFlags: u8 {
        const SIZE     = 0b001;
        const POSITION = 0b010;
        const INDEX    = 0b100;
    }
}

/// Where the dirt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirtySource {
    /// The container owning the layout was resized, moved or reordered.
    Container,
    /// One of the children changed.
    Content,
}

bitflags! {
    /// What a layout reacts to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct LayoutFlags: u16 {
        const LAYOUT_ON_CONTAINER_RESIZE       = 1 << 0;
        const LAYOUT_ON_CONTAINER_REPOSITION   = 1 << 1;
        const LAYOUT_ON_CONTAINER_INDEX_CHANGE = 1 << 2;
        const LAYOUT_ON_CONTENT_RESIZE         = 1 << 3;
        const LAYOUT_ON_CONTENT_REPOSITION     = 1 << 4;
        const LAYOUT_ON_CONTENT_INDEX_CHANGE   = 1 << 5;

        const RESIZE_ON_CONTAINER_RESIZE       = 1 << 6;
        const RESIZE_ON_CONTAINER_REPOSITION   = 1 << 7;
        const RESIZE_ON_CONTAINER_INDEX_CHANGE = 1 << 8;
        const RESIZE_ON_CONTENT_RESIZE         = 1 << 9;
        const RESIZE_ON_CONTENT_REPOSITION     = 1 << 10;
        const RESIZE_ON_CONTENT_INDEX_CHANGE   = 1 << 11;

        /// Re-arrange on any container change.
        const LAYOUT_ON_CONTAINER = Self::LAYOUT_ON_CONTAINER_RESIZE.bits()
            | Self::LAYOUT_ON_CONTAINER_REPOSITION.bits()
            | Self::LAYOUT_ON_CONTAINER_INDEX_CHANGE.bits();
        /// Re-arrange on any content change.
        const LAYOUT_ON_CONTENT = Self::LAYOUT_ON_CONTENT_RESIZE.bits()
            | Self::LAYOUT_ON_CONTENT_REPOSITION.bits()
            | Self::LAYOUT_ON_CONTENT_INDEX_CHANGE.bits();
    }
}

impl LayoutFlags {
    /// Flags that make `reason` from `source` trigger a re-arrangement.
    pub fn layout_triggers(reason: DirtyFlags, source: DirtySource) -> LayoutFlags {
        let mut out = LayoutFlags::empty();
        let (size, pos, index) = match source {
            DirtySource::Container => (
                LayoutFlags::LAYOUT_ON_CONTAINER_RESIZE,
                LayoutFlags::LAYOUT_ON_CONTAINER_REPOSITION,
                LayoutFlags::LAYOUT_ON_CONTAINER_INDEX_CHANGE,
            ),
            DirtySource::Content => (
                LayoutFlags::LAYOUT_ON_CONTENT_RESIZE,
                LayoutFlags::LAYOUT_ON_CONTENT_REPOSITION,
                LayoutFlags::LAYOUT_ON_CONTENT_INDEX_CHANGE,
            ),
        };
        out.set(size, reason.contains(DirtyFlags::SIZE));
        out.set(pos, reason.contains(DirtyFlags::POSITION));
        out.set(index, reason.contains(DirtyFlags::INDEX));
        out
    }

    /// Flags that make `reason` from `source` change the aggregate size.
    pub fn resize_triggers(reason: DirtyFlags, source: DirtySource) -> LayoutFlags {
        let mut out = LayoutFlags::empty();
        let (size, pos, index) = match source {
            DirtySource::Container => (
                LayoutFlags::RESIZE_ON_CONTAINER_RESIZE,
                LayoutFlags::RESIZE_ON_CONTAINER_REPOSITION,
                LayoutFlags::RESIZE_ON_CONTAINER_INDEX_CHANGE,
            ),
            DirtySource::Content => (
                LayoutFlags::RESIZE_ON_CONTENT_RESIZE,
                LayoutFlags::RESIZE_ON_CONTENT_REPOSITION,
                LayoutFlags::RESIZE_ON_CONTENT_INDEX_CHANGE,
            ),
        };
        out.set(size, reason.contains(DirtyFlags::SIZE));
        out.set(pos, reason.contains(DirtyFlags::POSITION));
        out.set(index, reason.contains(DirtyFlags::INDEX));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_triggers_follow_source() {
        let t = LayoutFlags::layout_triggers(
            DirtyFlags::SIZE | DirtyFlags::INDEX,
            DirtySource::Content,
        );
        assert_eq!(
            t,
            LayoutFlags::LAYOUT_ON_CONTENT_RESIZE | LayoutFlags::LAYOUT_ON_CONTENT_INDEX_CHANGE
        );

        let t = LayoutFlags::layout_triggers(DirtyFlags::POSITION, DirtySource::Container);
        assert_eq!(t, LayoutFlags::LAYOUT_ON_CONTAINER_REPOSITION);
    }

    #[test]
    fn test_resize_triggers() {
        let t = LayoutFlags::resize_triggers(DirtyFlags::SIZE, DirtySource::Content);
        assert_eq!(t, LayoutFlags::RESIZE_ON_CONTENT_RESIZE);
        assert!(LayoutFlags::resize_triggers(DirtyFlags::empty(), DirtySource::Content).is_empty());
    }
}
