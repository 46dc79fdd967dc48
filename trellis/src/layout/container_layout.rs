//! The layout a container uses when nothing else is attached.
//!
//! Children sit at their own hint position with their hint size. They do
//! not influence the container's size.

use crate::control::Measurement;
use crate::layout::base::{ArrangeCtx, Layout, Strategy};
use crate::layout::flags::LayoutFlags;
use crate::primitives::{Point, Rect, Size};

#[derive(Debug, Clone, Default)]
pub struct FreeStrategy;

pub type ContainerLayout = Layout<FreeStrategy>;

impl Strategy for FreeStrategy {
    type SlotData = ();

    fn default_flags(&self) -> LayoutFlags {
        LayoutFlags::LAYOUT_ON_CONTENT_RESIZE | LayoutFlags::LAYOUT_ON_CONTENT_REPOSITION
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>) {
        for index in ctx.visible_indices() {
            let m = ctx.measure_slot(index, Size::UNRESTRICTED);
            let position = ctx
                .child(index)
                .map(|c| c.hint_position())
                .unwrap_or(Point::ORIGIN);
            ctx.slot_mut(index)
                .set_bounds(Rect::from_origin_size(position, m.size));
        }
        ctx.set_measured_sizes(Measurement::flexible(Size::ZERO));
    }

    // Children may move without resizing, so read the position again.
    fn place(&mut self, ctx: &mut ArrangeCtx<'_, ()>, index: usize) -> Rect {
        let position = ctx
            .child(index)
            .map(|c| c.hint_position())
            .unwrap_or(Point::ORIGIN);
        Rect::from_origin_size(position, ctx.slot(index).bounds().size())
    }
}

impl Layout<FreeStrategy> {
    pub fn free() -> Self {
        Layout::new(FreeStrategy)
    }
}
