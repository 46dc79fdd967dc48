//! Trellis: retained-mode UI layout engine
//!
//! Trellis computes where the controls of a UI tree go. Controls report a
//! hint, minimum and maximum size for the space they are offered; layouts
//! combine those measurements and hand every control its final rectangle.
//!
//! # Architecture
//!
//! ```text
//! Container ── owns ──> children (Box<dyn Control>)
//!     │
//!     └─ owns ──> Layout<S> ── one Slot per child ── strategy S
//! ```
//!
//! Measurements are cached per slot and per layout. Dirt travels up
//! (`notify_child_changed` returns whether the parent must re-measure) and
//! arrangement travels down (`Container::arrange`).
//!
//! # Usage
//!
//! ```
//! use trellis::{Block, Container, Orientation, Size};
//! use trellis::layout::ListLayout;
//!
//! let mut root = Container::new().with_layout(ListLayout::list(Orientation::Horizontal));
//! root.push(Block::flexible(Size::new(50, 20)));
//! root.push(Block::flexible(Size::new(50, 20)));
//! root.arrange_root(Size::new(300, 40));
//!
//! assert_eq!(root.child(1).unwrap().bounds().x, 150);
//! ```

// Core primitives
pub mod primitives;

// Control contract and container
pub mod container;
pub mod control;

// Layout system
pub mod layout;

// Reference controls
pub mod controls;

pub use container::{Container, SizeMode};
pub use control::{Control, ControlId, LayoutHost, Measurement};
pub use controls::{Block, TextBlock};
pub use layout::{
    AlignHorizontal, AlignVertical, AnyLayout, ArrangeConfig, DirtyFlags, DirtySource, Layout,
    LayoutDiagnostic, LayoutFlags, Orientation, Padding,
};
pub use primitives::{Point, Rect, Size, SIZE_LIMIT};
