//! Stack layout: every visible child covers the whole layout space.

use crate::control::Measurement;
use crate::layout::base::{ArrangeCtx, Layout, Strategy};
use crate::layout::flags::LayoutFlags;
use crate::primitives::{Point, Rect, Size};

#[derive(Debug, Clone, Default)]
pub struct StackStrategy;

pub type StackLayout = Layout<StackStrategy>;

impl Strategy for StackStrategy {
    type SlotData = ();

    fn default_flags(&self) -> LayoutFlags {
        LayoutFlags::LAYOUT_ON_CONTAINER_RESIZE
            | LayoutFlags::LAYOUT_ON_CONTENT_RESIZE
            | LayoutFlags::RESIZE_ON_CONTENT_RESIZE
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>) {
        let space = ctx.space();
        let mut hint = Size::ZERO;
        let mut min = Size::ZERO;
        let mut max = Size::UNBOUNDED;

        for index in ctx.visible_indices() {
            let m = ctx.measure_slot(index, space);
            hint = hint.max(m.size);
            min = min.max(m.min);
            max = max.min(m.max);

            // Unlimited axes fall back to the child's own hint.
            let size = Size::new(
                if space.width < 0 { m.size.width } else { space.width },
                if space.height < 0 { m.size.height } else { space.height },
            );
            ctx.slot_mut(index)
                .set_bounds(Rect::from_origin_size(Point::ORIGIN, size));
        }

        ctx.set_measured_sizes(Measurement::new(hint, min, max));
    }
}

impl Layout<StackStrategy> {
    pub fn stack() -> Self {
        Layout::new(StackStrategy)
    }
}
