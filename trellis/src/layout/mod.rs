//! Layout system for Trellis
//!
//! A layout belongs to exactly one container and keeps one slot per child.
//! Arrangement is lazy: dirt is recorded when something changes and the
//! work happens on the next `request_arrange`, reusing every measurement
//! whose cache is still valid.
//!
//! # Architecture
//!
//! ```text
//! child change -> mark_slot_dirty -> parent notified if size may change
//! frame tick   -> request_arrange -> measure slots -> strategy -> layout_update
//! ```

pub mod align;
pub mod cache;
pub mod diagnostics;
pub mod flags;
pub mod slot;

mod distribute;

// base must come before the strategies (they implement its trait)
pub mod base;
pub mod anchor;
pub mod container_layout;
pub mod list;
pub mod proxy;
pub mod stack;

// Re-export core types
pub use align::{AlignHorizontal, AlignVertical, Orientation, Padding};
pub use base::{clamped_placement, AnyLayout, ArrangeConfig, ArrangeCtx, Layout, Strategy};
pub use cache::SizeCache;
pub use diagnostics::LayoutDiagnostic;
pub use flags::{DirtyFlags, DirtySource, LayoutFlags};
pub use slot::Slot;

// Re-export strategies
pub use anchor::{AnchorLayout, AnchorSlot, AnchorStrategy, HorizontalAnchor, VerticalAnchor};
pub use container_layout::{ContainerLayout, FreeStrategy};
pub use list::{ListLayout, ListSlot, ListStrategy, ShrinkingRule, SizingRule, Weight};
pub use proxy::{ProxyHost, ProxyLayout, ProxyStrategy};
pub use stack::{StackLayout, StackStrategy};
