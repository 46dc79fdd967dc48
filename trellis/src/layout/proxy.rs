//! Proxy layout: arrangement decided by a compound control.
//!
//! The control implements [`ProxyHost`] and hands it to the layout. Dirt
//! tracking and measurement caching still happen in the base layout.

use crate::control::Control;
use crate::layout::base::{clamped_placement, ArrangeCtx, Layout, Strategy};
use crate::layout::flags::LayoutFlags;
use crate::primitives::Rect;

/// Arrangement callbacks supplied by a compound control.
pub trait ProxyHost {
    fn layout_flags(&self) -> LayoutFlags {
        LayoutFlags::LAYOUT_ON_CONTAINER_RESIZE
            | LayoutFlags::LAYOUT_ON_CONTENT
            | LayoutFlags::RESIZE_ON_CONTENT_RESIZE
    }

    /// A slot was created for `control`.
    fn slot_created(&mut self, _control: &dyn Control) {}

    fn pre_arrange(&mut self, _ctx: &mut ArrangeCtx<'_, ()>) {}

    /// Same contract as [`Strategy::arrange`].
    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>);

    fn place(&mut self, ctx: &mut ArrangeCtx<'_, ()>, index: usize) -> Rect {
        clamped_placement(ctx, index)
    }
}

pub struct ProxyStrategy {
    host: Box<dyn ProxyHost>,
}

pub type ProxyLayout = Layout<ProxyStrategy>;

impl ProxyStrategy {
    pub fn new(host: Box<dyn ProxyHost>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &dyn ProxyHost {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn ProxyHost {
        self.host.as_mut()
    }
}

impl Strategy for ProxyStrategy {
    type SlotData = ();

    fn default_flags(&self) -> LayoutFlags {
        self.host.layout_flags()
    }

    fn create_slot(&mut self, control: &dyn Control) {
        self.host.slot_created(control);
    }

    fn pre_arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>) {
        self.host.pre_arrange(ctx);
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>) {
        self.host.arrange(ctx);
    }

    fn place(&mut self, ctx: &mut ArrangeCtx<'_, ()>, index: usize) -> Rect {
        self.host.place(ctx, index)
    }
}

impl Layout<ProxyStrategy> {
    pub fn proxy(host: impl ProxyHost + 'static) -> Self {
        Layout::new(ProxyStrategy::new(Box::new(host)))
    }
}
