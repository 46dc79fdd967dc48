//! Distributive list layout.
//!
//! Lines children up along one axis. Each slot starts at its wanted size;
//! surplus space goes to the slots of the dominant sizing tier by weight,
//! and a deficit is taken from slots in shrinking waves:
//!
//! - wave 1: `CanShrink` and `IgnoreMinimum`, proportionally to how far
//!   each can shrink,
//! - wave 2: `LateShrink`,
//! - degrade: every slot except `KeepSize`, toward zero.
//!
//! On the cross axis every slot gets the available space minus its padding.
//! Alignment then places the control inside its slot.

use serde::{Deserialize, Serialize};

use crate::control::Measurement;
use crate::layout::align::{place_span, AlignHorizontal, AlignVertical, Orientation, Padding};
use crate::layout::base::{ArrangeCtx, Layout, Strategy};
use crate::layout::distribute::{distribute, Share};
use crate::layout::flags::LayoutFlags;
use crate::primitives::{add_lengths, Rect, Size};

// =========================================================================
// Slot configuration
// =========================================================================

/// How a slot takes part in growth.
///
/// Surplus only goes to the dominant tier: `Expanding` (with
/// `GrowExpanding`), else `GrowExpanding`/`GrowExact`, else `Exact`, else
/// `Shrink`, else everyone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SizingRule {
    Expanding,
    GrowExpanding,
    GrowExact,
    #[default]
    Exact,
    /// Starts at its minimum when a higher tier is present.
    Shrink,
    /// Starts at its minimum when any other rule is present.
    Minimal,
}

/// How a slot gives up space when there is not enough of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShrinkingRule {
    /// Shrinks down to its minimum in the first wave.
    #[default]
    CanShrink,
    /// Shrinks down to its minimum after the first wave is exhausted.
    LateShrink,
    /// Never shrinks; may overflow the layout.
    KeepSize,
    /// Shrinks in the first wave and may go below its minimum.
    IgnoreMinimum,
}

/// Growth weight per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weight {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for Weight {
    fn default() -> Self {
        Self {
            horizontal: 1.0,
            vertical: 1.0,
        }
    }
}

impl Weight {
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self { horizontal, vertical }
    }

    /// Weight along `orientation`.
    pub fn along(&self, orientation: Orientation) -> f32 {
        match orientation {
            Orientation::Horizontal => self.horizontal,
            Orientation::Vertical => self.vertical,
        }
    }
}

/// Per-slot settings of the list layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSlot {
    pub horizontal_align: AlignHorizontal,
    pub vertical_align: AlignVertical,
    pub padding: Padding,
    pub sizing: SizingRule,
    pub shrinking: ShrinkingRule,
    pub weight: Weight,
}

impl ListSlot {
    /// Whether `other` only differs in alignment.
    fn same_extent(&self, other: &ListSlot) -> bool {
        self.padding == other.padding
            && self.sizing == other.sizing
            && self.shrinking == other.shrinking
            && self.weight == other.weight
    }
}

// =========================================================================
// Strategy
// =========================================================================

/// The list strategy. Use it through [`ListLayout`].
#[derive(Debug, Clone, Default)]
pub struct ListStrategy {
    orientation: Orientation,
    /// Main-axis padding of all visible slots, computed once per pass.
    padding_total: i32,
}

impl ListStrategy {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            padding_total: 0,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

pub type ListLayout = Layout<ListStrategy>;

impl Strategy for ListStrategy {
    type SlotData = ListSlot;

    fn default_flags(&self) -> LayoutFlags {
        LayoutFlags::LAYOUT_ON_CONTAINER_RESIZE
            | LayoutFlags::LAYOUT_ON_CONTENT
            | LayoutFlags::RESIZE_ON_CONTENT_RESIZE
            | LayoutFlags::RESIZE_ON_CONTENT_INDEX_CHANGE
    }

    fn pre_arrange(&mut self, ctx: &mut ArrangeCtx<'_, ListSlot>) {
        let o = self.orientation;
        self.padding_total = ctx
            .visible_indices()
            .into_iter()
            .map(|i| o.main_padding(&ctx.slot(i).data.padding))
            .fold(0, add_lengths);
    }

    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ListSlot>) {
        let o = self.orientation;
        let space = ctx.space();
        let space_cross = o.cross(space);

        let mut entries = Vec::new();
        let mut hint = (0, 0);
        let mut min = (0, 0);
        let mut max = (0, 0);

        for index in ctx.visible_indices() {
            let data = ctx.slot(index).data;
            let main_pad = o.main_padding(&data.padding);
            let cross_pad = o.cross_padding(&data.padding);

            let cross_avail = if space_cross < 0 {
                -1
            } else {
                (space_cross - cross_pad).max(0)
            };
            // First round asks for the natural length; later rounds measure
            // at the length the previous round handed out.
            let main_avail = if ctx.iteration() == 0 {
                -1
            } else {
                o.main(ctx.slot(index).bounds().size())
            };

            let m = ctx.measure_slot(index, o.size(main_avail, cross_avail));

            hint.0 = add_lengths(hint.0, add_lengths(o.main(m.size), main_pad));
            min.0 = add_lengths(min.0, add_lengths(o.main(m.min), main_pad));
            max.0 = add_lengths(max.0, add_lengths(o.main(m.max), main_pad));
            hint.1 = hint.1.max(add_lengths(o.cross(m.size), cross_pad));
            min.1 = min.1.max(add_lengths(o.cross(m.min), cross_pad));
            max.1 = max.1.max(add_lengths(o.cross(m.max), cross_pad));

            entries.push(Entry {
                index,
                wanted: o.main(m.size),
                min: o.main(m.min),
                max: o.main(m.max),
                cross: if cross_avail < 0 { o.cross(m.size) } else { cross_avail },
                sizing: data.sizing,
                shrinking: data.shrinking,
                weight: f64::from(data.weight.along(o)),
            });
        }

        ctx.set_measured_sizes(Measurement::new(
            o.size(hint.0, hint.1),
            o.size(min.0, min.1),
            o.size(max.0, max.1),
        ));

        let space_main = o.main(space);
        let lengths: Vec<i32> = if space_main < 0 {
            entries.iter().map(|e| e.wanted).collect()
        } else {
            allocate(&entries, space_main.saturating_sub(self.padding_total))
        };

        let mut position = 0;
        for (entry, length) in entries.iter().zip(lengths) {
            let padding = ctx.slot(entry.index).data.padding;
            let (lead_main, lead_cross) = o.leading(&padding);
            let trail_main = o.main_padding(&padding) - lead_main;

            position = add_lengths(position, lead_main);
            let origin = o.point(position, lead_cross);
            let size = o.size(length, entry.cross);
            ctx.slot_mut(entry.index)
                .set_bounds(Rect::from_origin_size(origin, size));
            position = add_lengths(position, add_lengths(length, trail_main));
        }
    }

    fn place(&mut self, ctx: &mut ArrangeCtx<'_, ListSlot>, index: usize) -> Rect {
        let slot = ctx.slot(index);
        let cell = slot.bounds();
        let (hint, min, max) = (slot.hint_size(), slot.min_size(), slot.max_size());

        let (x, width) = place_span(
            slot.data.horizontal_align.into(),
            cell.x,
            cell.width,
            hint.width,
            min.width,
            max.width,
        );
        let (y, height) = place_span(
            slot.data.vertical_align.into(),
            cell.y,
            cell.height,
            hint.height,
            min.height,
            max.height,
        );
        Rect::new(x, y, width, height)
    }
}

// =========================================================================
// Distribution
// =========================================================================

/// One visible slot as seen by the distribution.
#[derive(Debug, Clone, Copy)]
struct Entry {
    index: usize,
    wanted: i32,
    min: i32,
    max: i32,
    cross: i32,
    sizing: SizingRule,
    shrinking: ShrinkingRule,
    weight: f64,
}

/// Main-axis lengths for `entries` sharing `available` pixels.
fn allocate(entries: &[Entry], available: i32) -> Vec<i32> {
    if available <= 0 {
        return vec![0; entries.len()];
    }

    let has = |rule: SizingRule| entries.iter().any(|e| e.sizing == rule);
    let expanding = has(SizingRule::Expanding);
    let growing = has(SizingRule::GrowExpanding) || has(SizingRule::GrowExact);
    let exact = has(SizingRule::Exact);
    let shrink = has(SizingRule::Shrink);
    let above_shrink = expanding || growing || exact;
    let non_minimal = entries.iter().any(|e| e.sizing != SizingRule::Minimal);

    let in_tier = |rule: SizingRule| {
        if expanding {
            matches!(rule, SizingRule::Expanding | SizingRule::GrowExpanding)
        } else if growing {
            matches!(rule, SizingRule::GrowExpanding | SizingRule::GrowExact)
        } else if exact {
            rule == SizingRule::Exact
        } else if shrink {
            rule == SizingRule::Shrink
        } else {
            true
        }
    };

    let mut lengths: Vec<i32> = entries
        .iter()
        .map(|e| {
            let at_min = match e.sizing {
                SizingRule::Shrink => above_shrink,
                SizingRule::Minimal => non_minimal,
                _ => false,
            };
            if at_min { e.min } else { e.wanted }
        })
        .collect();

    let used: i64 = lengths.iter().map(|&l| i64::from(l)).sum();
    let remaining = i64::from(available) - used;

    if remaining >= 0 {
        let amount = remaining.min(i64::from(i32::MAX)) as i32;
        let eligible: Vec<usize> = (0..entries.len())
            .filter(|&i| in_tier(entries[i].sizing))
            .collect();
        let shares: Vec<Share> = eligible
            .iter()
            .map(|&i| {
                let room = entries[i].max.saturating_sub(lengths[i]).max(0);
                Share::new(entries[i].weight, room)
            })
            .collect();
        for (k, given) in distribute(amount, &shares).into_iter().enumerate() {
            lengths[eligible[k]] += given;
        }
    } else {
        let deficit = (-remaining).min(i64::from(i32::MAX)) as i32;
        let deficit = shrink_wave(&mut lengths, deficit, |i, len| match entries[i].shrinking {
            ShrinkingRule::CanShrink => Some(len - entries[i].min),
            ShrinkingRule::IgnoreMinimum => Some(len),
            _ => None,
        });
        let deficit = shrink_wave(&mut lengths, deficit, |i, len| match entries[i].shrinking {
            ShrinkingRule::LateShrink => Some(len - entries[i].min),
            _ => None,
        });
        let deficit = shrink_wave(&mut lengths, deficit, |i, len| match entries[i].shrinking {
            ShrinkingRule::KeepSize => None,
            _ => Some(len),
        });
        if deficit > 0 {
            tracing::trace!("list overflows by {} pixels", deficit);
        }
    }

    lengths
}

/// Take up to `deficit` pixels from the slots `budget` admits, in proportion
/// to their budgets. Returns what is still missing.
fn shrink_wave(
    lengths: &mut [i32],
    deficit: i32,
    budget: impl Fn(usize, i32) -> Option<i32>,
) -> i32 {
    if deficit <= 0 {
        return 0;
    }
    let members: Vec<(usize, i32)> = (0..lengths.len())
        .filter_map(|i| budget(i, lengths[i]).map(|b| (i, b.max(0))))
        .collect();
    let shares: Vec<Share> = members
        .iter()
        .map(|&(_, b)| Share::new(f64::from(b), b))
        .collect();

    let mut left = deficit;
    for (k, taken) in distribute(deficit, &shares).into_iter().enumerate() {
        lengths[members[k].0] -= taken;
        left -= taken;
    }
    left
}

// =========================================================================
// Configuration
// =========================================================================

impl Layout<ListStrategy> {
    /// A list layout along `orientation`.
    pub fn list(orientation: Orientation) -> Self {
        Layout::new(ListStrategy::new(orientation))
    }

    pub fn orientation(&self) -> Orientation {
        self.strategy().orientation
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        if self.strategy().orientation == orientation {
            return false;
        }
        self.strategy_mut().orientation = orientation;
        self.invalidate()
    }

    pub fn list_slot(&self, index: usize) -> Option<&ListSlot> {
        self.slot(index).map(|s| &s.data)
    }

    /// Replace all settings of a slot. Returns whether the layout's own
    /// size may have changed.
    pub fn set_list_slot(&mut self, index: usize, value: ListSlot) -> bool {
        let Some(slot) = self.slot_mut(index) else {
            return false;
        };
        let old = slot.data;
        if old == value {
            return false;
        }
        slot.data = value;
        if old.same_extent(&value) {
            self.mark_reposition();
            false
        } else {
            self.invalidate()
        }
    }

    pub fn set_horizontal_align(&mut self, index: usize, align: AlignHorizontal) -> bool {
        self.edit(index, |d| d.horizontal_align = align)
    }

    pub fn set_vertical_align(&mut self, index: usize, align: AlignVertical) -> bool {
        self.edit(index, |d| d.vertical_align = align)
    }

    pub fn set_padding(&mut self, index: usize, padding: Padding) -> bool {
        self.edit(index, |d| d.padding = padding)
    }

    pub fn set_sizing(&mut self, index: usize, sizing: SizingRule) -> bool {
        self.edit(index, |d| d.sizing = sizing)
    }

    pub fn set_shrinking(&mut self, index: usize, shrinking: ShrinkingRule) -> bool {
        self.edit(index, |d| d.shrinking = shrinking)
    }

    pub fn set_weight(&mut self, index: usize, weight: Weight) -> bool {
        self.edit(index, |d| d.weight = weight)
    }

    fn edit(&mut self, index: usize, f: impl FnOnce(&mut ListSlot)) -> bool {
        let Some(mut value) = self.list_slot(index).copied() else {
            return false;
        };
        f(&mut value);
        self.set_list_slot(index, value)
    }
}
