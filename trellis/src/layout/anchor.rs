//! Anchor layout: children positioned by percentages of the layout space.
//!
//! Each axis is resolved independently. An edge anchored to the near side
//! sits at `space * percent`, one anchored to the far side at
//! `space * (1 - percent)`. With both edges anchored the child stretches
//! between them; with one it keeps its wanted size at that edge; with none
//! it is centered on the average of the two percentages.

use serde::{Deserialize, Serialize};

use crate::control::Measurement;
use crate::layout::base::{ArrangeCtx, Layout, Strategy};
use crate::layout::flags::LayoutFlags;
use crate::primitives::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalAnchor {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VerticalAnchor {
    #[default]
    None,
    Top,
    Bottom,
}

/// Per-slot anchors. Percentages are fractions, `0.1` meaning 10%.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSlot {
    pub left: HorizontalAnchor,
    pub right: HorizontalAnchor,
    pub top: VerticalAnchor,
    pub bottom: VerticalAnchor,
    pub left_percent: f32,
    pub right_percent: f32,
    pub top_percent: f32,
    pub bottom_percent: f32,
}

impl AnchorSlot {
    /// Stretch between both edges, `margin` percent away from each.
    pub fn fill(margin: f32) -> Self {
        Self {
            left: HorizontalAnchor::Left,
            right: HorizontalAnchor::Right,
            top: VerticalAnchor::Top,
            bottom: VerticalAnchor::Bottom,
            left_percent: margin,
            right_percent: margin,
            top_percent: margin,
            bottom_percent: margin,
        }
    }
}

/// Where an anchored edge points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Free,
    Near,
    Far,
}

impl From<HorizontalAnchor> for Edge {
    fn from(value: HorizontalAnchor) -> Self {
        match value {
            HorizontalAnchor::None => Edge::Free,
            HorizontalAnchor::Left => Edge::Near,
            HorizontalAnchor::Right => Edge::Far,
        }
    }
}

impl From<VerticalAnchor> for Edge {
    fn from(value: VerticalAnchor) -> Self {
        match value {
            VerticalAnchor::None => Edge::Free,
            VerticalAnchor::Top => Edge::Near,
            VerticalAnchor::Bottom => Edge::Far,
        }
    }
}

/// Coordinate of an edge anchored with `edge` at `percent`.
fn edge_position(space: f64, edge: Edge, percent: f64) -> f64 {
    match edge {
        Edge::Far => space * (1.0 - percent),
        Edge::Near | Edge::Free => space * percent,
    }
}

/// Resolve one axis. Returns `(position, length)`.
fn resolve_axis(
    space: i32,
    wanted: i32,
    start: Edge,
    end: Edge,
    start_percent: f32,
    end_percent: f32,
) -> (i32, i32) {
    let space_f = f64::from(space.max(0));
    let (sp, ep) = (f64::from(start_percent), f64::from(end_percent));
    let wanted_f = f64::from(wanted);

    let (pos, len) = match (start, end) {
        (Edge::Free, Edge::Free) => {
            let center = (sp + ep) * 0.5;
            (space_f * center - wanted_f * 0.5, wanted_f)
        }
        (_, Edge::Free) => (edge_position(space_f, start, sp), wanted_f),
        (Edge::Free, _) => {
            // The end edge counts from the far side when anchored there.
            match end {
                Edge::Far => (space_f * (1.0 - ep) - wanted_f, wanted_f),
                _ => (space_f * ep, wanted_f),
            }
        }
        _ => {
            let a = edge_position(space_f, start, sp);
            let b = match end {
                Edge::Far => space_f * (1.0 - ep),
                _ => space_f * ep,
            };
            if a >= b {
                ((sp + ep) * 0.5 * space_f, 0.0)
            } else {
                (a, b - a)
            }
        }
    };

    let pos = pos.round() as i32;
    let len = len.round().max(0.0) as i32;
    (pos, len)
}

/// The anchor strategy. Use it through [`AnchorLayout`].
#[derive(Debug, Clone, Default)]
pub struct AnchorStrategy;

pub type AnchorLayout = Layout<AnchorStrategy>;

impl Strategy for AnchorStrategy {
    type SlotData = AnchorSlot;

    fn default_flags(&self) -> LayoutFlags {
        LayoutFlags::LAYOUT_ON_CONTAINER_RESIZE
            | LayoutFlags::LAYOUT_ON_CONTENT_RESIZE
            | LayoutFlags::RESIZE_ON_CONTENT_RESIZE
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, AnchorSlot>) {
        let space = ctx.space();
        let mut hint = Size::ZERO;
        let mut min = Size::ZERO;

        for index in ctx.visible_indices() {
            let m = ctx.measure_slot(index, space);
            hint = hint.max(m.size);
            min = min.max(m.min);

            let a = ctx.slot(index).data;
            let (x, width) = resolve_axis(
                space.width,
                m.size.width,
                a.left.into(),
                a.right.into(),
                a.left_percent,
                a.right_percent,
            );
            let (y, height) = resolve_axis(
                space.height,
                m.size.height,
                a.top.into(),
                a.bottom.into(),
                a.top_percent,
                a.bottom_percent,
            );
            ctx.slot_mut(index)
                .set_bounds(Rect::new(x, y, width, height));
        }

        ctx.set_measured_sizes(Measurement::new(hint, min, Size::UNBOUNDED));
    }
}

impl Layout<AnchorStrategy> {
    pub fn anchor() -> Self {
        Layout::new(AnchorStrategy)
    }

    pub fn anchor_slot(&self, index: usize) -> Option<&AnchorSlot> {
        self.slot(index).map(|s| &s.data)
    }

    /// Replace a slot's anchors. Anchors never change the layout's own
    /// size, so this always returns `false`.
    pub fn set_anchor_slot(&mut self, index: usize, value: AnchorSlot) -> bool {
        let Some(slot) = self.slot_mut(index) else {
            return false;
        };
        if slot.data != value {
            slot.data = value;
            self.mark_rearrange();
        }
        false
    }

    pub fn set_horizontal_anchors(
        &mut self,
        index: usize,
        left: HorizontalAnchor,
        left_percent: f32,
        right: HorizontalAnchor,
        right_percent: f32,
    ) -> bool {
        let Some(mut value) = self.anchor_slot(index).copied() else {
            return false;
        };
        value.left = left;
        value.left_percent = left_percent;
        value.right = right;
        value.right_percent = right_percent;
        self.set_anchor_slot(index, value)
    }

    pub fn set_vertical_anchors(
        &mut self,
        index: usize,
        top: VerticalAnchor,
        top_percent: f32,
        bottom: VerticalAnchor,
        bottom_percent: f32,
    ) -> bool {
        let Some(mut value) = self.anchor_slot(index).copied() else {
            return false;
        };
        value.top = top;
        value.top_percent = top_percent;
        value.bottom = bottom;
        value.bottom_percent = bottom_percent;
        self.set_anchor_slot(index, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_edges_anchored() {
        let (x, w) = resolve_axis(200, 50, Edge::Near, Edge::Far, 0.1, 0.1);
        assert_eq!((x, w), (20, 160));
    }

    #[test]
    fn test_crossing_edges_collapse_to_midpoint() {
        let (x, w) = resolve_axis(100, 50, Edge::Near, Edge::Far, 0.8, 0.8);
        assert_eq!((x, w), (80, 0));
    }

    #[test]
    fn test_single_edge_keeps_wanted_size() {
        assert_eq!(resolve_axis(200, 50, Edge::Near, Edge::Free, 0.25, 0.0), (50, 50));
        assert_eq!(resolve_axis(200, 50, Edge::Far, Edge::Free, 0.25, 0.0), (150, 50));
        assert_eq!(resolve_axis(200, 50, Edge::Free, Edge::Far, 0.0, 0.25), (100, 50));
        assert_eq!(resolve_axis(200, 50, Edge::Free, Edge::Near, 0.0, 0.25), (50, 50));
    }

    #[test]
    fn test_unanchored_is_centered() {
        assert_eq!(resolve_axis(200, 50, Edge::Free, Edge::Free, 0.5, 0.5), (75, 50));
        assert_eq!(resolve_axis(200, 40, Edge::Free, Edge::Free, 0.0, 0.5), (30, 40));
    }

    #[test]
    fn test_full_span_round_trip() {
        for space in [0, 1, 7, 200, 1919] {
            assert_eq!(
                resolve_axis(space, 10, Edge::Near, Edge::Far, 0.0, 0.0),
                (0, space)
            );
        }
    }
}
