//! Integration tests for arranging container trees.
//!
//! These drive whole containers the way a host would: build a tree, size the
//! root, arrange, then read back the bounds every control received.

use std::cell::Cell;
use std::rc::Rc;

use trellis::layout::{
    AnchorLayout, AnchorSlot, AnchorStrategy, ArrangeCtx, HorizontalAnchor, ListLayout, ListSlot,
    ListStrategy, ProxyHost, ProxyLayout, ShrinkingRule, SizingRule, StackLayout, Weight,
};
use trellis::{
    AlignHorizontal, Block, Container, Control, DirtyFlags, DirtySource, Measurement, Orientation,
    Padding, Point, Rect, Size,
};

// =========================================================================
// Helpers
// =========================================================================

/// A control whose measurement can be changed from outside and which counts
/// how often it is measured and placed.
struct Probe {
    measurement: Rc<Cell<Measurement>>,
    measures: Rc<Cell<u32>>,
    updates: Rc<Cell<u32>>,
    visible: bool,
    bounds: Rect,
}

#[derive(Clone)]
struct ProbeHandle {
    measurement: Rc<Cell<Measurement>>,
    measures: Rc<Cell<u32>>,
    updates: Rc<Cell<u32>>,
}

impl Probe {
    fn new(measurement: Measurement) -> (Self, ProbeHandle) {
        let handle = ProbeHandle {
            measurement: Rc::new(Cell::new(measurement)),
            measures: Rc::new(Cell::new(0)),
            updates: Rc::new(Cell::new(0)),
        };
        let probe = Self {
            measurement: handle.measurement.clone(),
            measures: handle.measures.clone(),
            updates: handle.updates.clone(),
            visible: true,
            bounds: Rect::ZERO,
        };
        (probe, handle)
    }

    fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Control for Probe {
    fn on_measure(&mut self, _available: Size) -> Measurement {
        self.measures.set(self.measures.get() + 1);
        self.measurement.get()
    }

    fn layout_update(&mut self, position: Point, size: Size) {
        self.updates.set(self.updates.get() + 1);
        self.bounds = Rect::from_origin_size(position, size);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

fn list(orientation: Orientation) -> Container {
    Container::new().with_layout(ListLayout::list(orientation))
}

fn bounds_of(c: &Container) -> Vec<Rect> {
    (0..c.child_count())
        .filter_map(|i| c.child(i).map(|ch| ch.bounds()))
        .collect()
}

fn configure_list(c: &mut Container, index: usize, slot: ListSlot) {
    c.configure_layout::<ListStrategy, _>(|l| l.set_list_slot(index, slot));
}

// =========================================================================
// Concrete scenarios
// =========================================================================

#[test]
fn test_list_surplus_scenario() {
    let mut root = list(Orientation::Horizontal);
    for _ in 0..3 {
        root.push(Block::new(Size::new(50, 20), Size::new(10, 0), Size::UNBOUNDED));
    }
    root.arrange_root(Size::new(180, 20));

    let b = bounds_of(&root);
    assert_eq!(b.iter().map(|r| r.x).collect::<Vec<_>>(), vec![0, 60, 120]);
    assert_eq!(b.iter().map(|r| r.width).collect::<Vec<_>>(), vec![60, 60, 60]);
}

#[test]
fn test_list_deficit_scenario() {
    let mut root = list(Orientation::Horizontal);
    for _ in 0..3 {
        root.push(Block::new(Size::new(50, 20), Size::new(10, 0), Size::new(50, 20)));
    }
    root.arrange_root(Size::new(90, 20));

    let b = bounds_of(&root);
    assert_eq!(b.iter().map(|r| r.width).collect::<Vec<_>>(), vec![30, 30, 30]);
    assert_eq!(b.iter().map(|r| r.x).collect::<Vec<_>>(), vec![0, 30, 60]);
}

#[test]
fn test_anchor_scenario() {
    let mut root = Container::new().with_layout(AnchorLayout::anchor());
    root.push(Block::flexible(Size::new(50, 50)));
    root.configure_layout::<AnchorStrategy, _>(|l| {
        l.set_horizontal_anchors(0, HorizontalAnchor::Left, 0.1, HorizontalAnchor::Right, 0.1)
    });
    root.arrange_root(Size::new(200, 100));

    let r = bounds_of(&root)[0];
    assert_eq!(r.x, 20);
    assert_eq!(r.width, 160);
}

// =========================================================================
// Arrangement protocol
// =========================================================================

#[test]
fn test_arrange_is_idempotent() {
    let mut root = list(Orientation::Vertical);
    let mut handles = Vec::new();
    for _ in 0..3 {
        let (probe, handle) = Probe::new(Measurement::flexible(Size::new(40, 20)));
        root.push(probe);
        handles.push(handle);
    }

    root.arrange_root(Size::new(100, 100));
    root.arrange(false);
    root.arrange(false);
    assert!(handles.iter().all(|h| h.updates.get() == 1));

    // A forced pass places again but measures nothing new.
    let measured: Vec<u32> = handles.iter().map(|h| h.measures.get()).collect();
    root.arrange(true);
    assert!(handles.iter().all(|h| h.updates.get() == 2));
    assert_eq!(
        handles.iter().map(|h| h.measures.get()).collect::<Vec<_>>(),
        measured
    );
}

#[test]
fn test_hidden_children_are_skipped() {
    let mut root = list(Orientation::Horizontal);
    let (hidden, hidden_handle) = Probe::new(Measurement::flexible(Size::new(40, 20)));
    root.push(Block::flexible(Size::new(40, 20)));
    root.push(hidden.hidden());
    root.push(Block::flexible(Size::new(40, 20)));
    root.arrange_root(Size::new(100, 20));

    assert_eq!(hidden_handle.measures.get(), 0);
    assert_eq!(hidden_handle.updates.get(), 0);

    let b = bounds_of(&root);
    assert_eq!(b[0], Rect::new(0, 0, 50, 20));
    assert_eq!(b[2], Rect::new(50, 0, 50, 20));
}

#[test]
fn test_alignment_change_only_repositions() {
    let mut root = list(Orientation::Horizontal);
    let (probe, handle) = Probe::new(Measurement::flexible(Size::new(40, 10)));
    root.push(probe);
    root.arrange_root(Size::new(200, 50));
    assert_eq!(bounds_of(&root)[0], Rect::new(0, 0, 200, 50));
    let measures = handle.measures.get();

    let resized = root.configure_layout::<ListStrategy, _>(|l| {
        l.set_horizontal_align(0, AlignHorizontal::Right)
    });
    assert_eq!(resized, Some(false));
    root.arrange(false);

    assert_eq!(bounds_of(&root)[0], Rect::new(160, 0, 40, 50));
    assert_eq!(handle.measures.get(), measures);
    assert_eq!(handle.updates.get(), 2);
}

#[test]
fn test_child_resize_propagates_to_root() {
    let mut inner = list(Orientation::Horizontal);
    let (probe, handle) = Probe::new(Measurement::flexible(Size::new(30, 10)));
    inner.push(probe);

    let mut root = list(Orientation::Vertical);
    root.push(inner);
    root.push(Block::fixed(Size::new(200, 20)));
    root.arrange_root(Size::new(200, 100));
    assert_eq!(root.layout().hint_size(), Size::new(200, 30));

    handle
        .measurement
        .set(Measurement::flexible(Size::new(30, 50)));
    assert!(root.update_descendant(&[0, 0], |_| DirtyFlags::SIZE));
    assert!(root.layout().is_dirty());

    root.arrange(false);
    assert_eq!(root.layout().hint_size(), Size::new(200, 70));
    assert_eq!(bounds_of(&root)[1], Rect::new(0, 80, 200, 20));
}

#[test]
fn test_update_child_without_change_is_quiet() {
    let mut root = list(Orientation::Horizontal);
    root.push(Block::fixed(Size::new(10, 10)));
    root.arrange_root(Size::new(100, 10));

    assert!(!root.update_child(0, |_| DirtyFlags::empty()));
    assert!(!root.layout().is_dirty());
    assert!(!root.update_child(3, |_| DirtyFlags::SIZE));
}

#[test]
fn test_nested_container_is_arranged() {
    let mut inner = list(Orientation::Vertical).with_padding(Padding::all(5));
    inner.push(Block::flexible(Size::new(10, 10)));
    inner.push(Block::flexible(Size::new(10, 10)));

    let mut root = list(Orientation::Horizontal);
    root.push(Block::fixed(Size::new(40, 60)));
    root.push(inner);
    root.arrange_root(Size::new(100, 60));

    let nested = root.child(1).and_then(|c| c.as_container()).map(bounds_of);
    assert_eq!(
        nested,
        Some(vec![Rect::new(0, 0, 50, 25), Rect::new(0, 25, 50, 25)])
    );

    let mut seen = Vec::new();
    root.walk(&mut |depth, _, rect| seen.push((depth, rect)));
    assert_eq!(seen.len(), 4);
    assert_eq!(seen[1], (0, Rect::new(40, 0, 60, 60)));
    assert_eq!(seen[2], (1, Rect::new(45, 5, 50, 25)));
}

// =========================================================================
// List properties
// =========================================================================

#[test]
fn test_clamp_invariant() {
    let specs = [
        (Size::new(40, 10), Size::new(20, 5), Size::new(80, 30)),
        (Size::new(60, 20), Size::new(30, 10), Size::new(200, 40)),
        (Size::new(25, 25), Size::new(25, 25), Size::new(25, 25)),
    ];
    let min_total: i32 = specs.iter().map(|s| s.1.width).sum();

    for width in (0..420).step_by(7) {
        let mut root = list(Orientation::Horizontal);
        for (hint, min, max) in specs {
            root.push(Block::new(hint, min, max));
        }
        configure_list(
            &mut root,
            1,
            ListSlot {
                sizing: SizingRule::Expanding,
                ..ListSlot::default()
            },
        );
        root.arrange_root(Size::new(width, 50));

        let b = bounds_of(&root);
        for (rect, (_, min, max)) in b.iter().zip(specs) {
            assert!(rect.width >= 0 && rect.height >= 0, "width {width}: {rect:?}");
            assert!(rect.width <= max.width && rect.height <= max.height, "width {width}: {rect:?}");
            if width >= min_total {
                assert!(rect.width >= min.width, "width {width}: {rect:?}");
                assert!(rect.height >= min.height, "width {width}: {rect:?}");
            }
        }
    }
}

#[test]
fn test_surplus_conservation() {
    let padding = Padding::new(0, 2, 0, 3);
    let hints = [30, 45, 10, 70];
    let wanted: i32 = hints.iter().sum::<i32>() + 5 * hints.len() as i32;

    for available in (wanted..wanted + 300).step_by(11) {
        let mut root = list(Orientation::Horizontal);
        for (i, h) in hints.iter().enumerate() {
            root.push(Block::flexible(Size::new(*h, 10)));
            configure_list(
                &mut root,
                i,
                ListSlot {
                    padding,
                    weight: Weight::new(i as f32 + 0.5, 1.0),
                    ..ListSlot::default()
                },
            );
        }
        root.arrange_root(Size::new(available, 10));

        let b = bounds_of(&root);
        let total: i32 = b.iter().map(|r| r.width + padding.horizontal()).sum();
        assert_eq!(total, available);
        assert_eq!(b.last().map(|r| r.right() + padding.right), Some(available));
    }
}

#[test]
fn test_deficit_conservation() {
    let padding = Padding::symmetric(2, 0);
    let pad_total = 3 * padding.horizontal();
    let wanted = 3 * 50 + pad_total;

    for available in 0..wanted {
        let mut root = list(Orientation::Horizontal);
        for i in 0..3 {
            root.push(Block::new(Size::new(50, 10), Size::new(20, 10), Size::new(50, 10)));
            let shrinking = if i == 1 {
                ShrinkingRule::IgnoreMinimum
            } else {
                ShrinkingRule::CanShrink
            };
            configure_list(
                &mut root,
                i,
                ListSlot {
                    padding,
                    shrinking,
                    ..ListSlot::default()
                },
            );
        }
        root.arrange_root(Size::new(available, 10));

        let b = bounds_of(&root);
        assert!(b.iter().all(|r| r.width >= 0));
        let total: i32 = b.iter().map(|r| r.width).sum();
        assert_eq!(total, (available - pad_total).max(0), "available {available}");
    }
}

#[test]
fn test_weight_monotonicity() {
    for w2 in [1.0f32, 1.5, 2.0, 3.0, 7.25] {
        for available in [100, 137, 250, 999] {
            let mut root = list(Orientation::Horizontal);
            for (i, w) in [1.0f32, w2].into_iter().enumerate() {
                root.push(Block::flexible(Size::new(20, 10)));
                configure_list(
                    &mut root,
                    i,
                    ListSlot {
                        sizing: SizingRule::Expanding,
                        weight: Weight::new(w, 1.0),
                        ..ListSlot::default()
                    },
                );
            }
            root.arrange_root(Size::new(available, 10));

            let b = bounds_of(&root);
            assert!(b[1].width >= b[0].width, "w2 {w2}, available {available}");
        }
    }
}

#[test]
fn test_keep_size_overflows() {
    let mut root = list(Orientation::Horizontal);
    root.push(Block::fixed(Size::new(60, 10)));
    root.push(Block::new(Size::new(60, 10), Size::new(10, 10), Size::new(60, 10)));
    configure_list(
        &mut root,
        0,
        ListSlot {
            shrinking: ShrinkingRule::KeepSize,
            ..ListSlot::default()
        },
    );
    root.arrange_root(Size::new(50, 10));

    let b = bounds_of(&root);
    assert_eq!(b[0].width, 60);
    assert_eq!(b[1].width, 0);
}

#[test]
fn test_vertical_list_with_center_alignment() {
    let mut root = list(Orientation::Vertical);
    root.push(Block::fixed(Size::new(20, 10)));
    root.push(Block::fixed(Size::new(40, 10)));
    configure_list(
        &mut root,
        0,
        ListSlot {
            horizontal_align: AlignHorizontal::Center,
            padding: Padding::new(4, 0, 6, 0),
            ..ListSlot::default()
        },
    );
    root.arrange_root(Size::new(100, 100));

    let b = bounds_of(&root);
    assert_eq!(b[0], Rect::new(40, 4, 20, 10));
    // Fixed size caps Fill at the control's max.
    assert_eq!(b[1], Rect::new(0, 20, 40, 10));
}

// =========================================================================
// Other strategies
// =========================================================================

#[test]
fn test_anchor_round_trip() {
    for size in [0, 1, 33, 200, 1024] {
        let mut root = Container::new().with_layout(AnchorLayout::anchor());
        root.push(Block::flexible(Size::new(10, 10)));
        root.configure_layout::<AnchorStrategy, _>(|l| l.set_anchor_slot(0, AnchorSlot::fill(0.0)));
        root.arrange_root(Size::new(size, size));

        assert_eq!(bounds_of(&root)[0], Rect::new(0, 0, size, size));
    }
}

#[test]
fn test_anchor_change_rearranges() {
    let mut root = Container::new().with_layout(AnchorLayout::anchor());
    root.push(Block::flexible(Size::new(10, 10)));
    root.arrange_root(Size::new(100, 100));
    assert_eq!(bounds_of(&root)[0].x, -5);

    root.configure_layout::<AnchorStrategy, _>(|l| {
        l.set_horizontal_anchors(0, HorizontalAnchor::Right, 0.0, HorizontalAnchor::None, 0.0)
    });
    root.arrange(false);
    assert_eq!(bounds_of(&root)[0].x, 100);
}

#[test]
fn test_stack_fills_space() {
    let mut root = Container::new().with_layout(StackLayout::stack());
    root.push(Block::flexible(Size::new(10, 10)));
    root.push(Block::new(Size::new(10, 10), Size::ZERO, Size::new(50, 500)));
    root.arrange_root(Size::new(100, 80));

    let b = bounds_of(&root);
    assert_eq!(b[0], Rect::new(0, 0, 100, 80));
    assert_eq!(b[1], Rect::new(0, 0, 50, 80));
    assert_eq!(root.layout().max_size(), Size::new(50, 500));
}

/// Places children diagonally, `step` pixels apart.
struct Diagonal {
    step: i32,
}

impl ProxyHost for Diagonal {
    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>) {
        let mut extent = Size::ZERO;
        for (n, index) in ctx.visible_indices().into_iter().enumerate() {
            let m = ctx.measure_slot(index, Size::UNRESTRICTED);
            let offset = self.step * n as i32;
            ctx.slot_mut(index)
                .set_bounds(Rect::new(offset, offset, m.size.width, m.size.height));
            extent = extent.max(Size::new(offset + m.size.width, offset + m.size.height));
        }
        ctx.set_measured_sizes(Measurement::flexible(extent));
    }
}

#[test]
fn test_proxy_layout_delegates() {
    let mut root = Container::new().with_layout(ProxyLayout::proxy(Diagonal { step: 10 }));
    root.push(Block::fixed(Size::new(20, 20)));
    root.push(Block::fixed(Size::new(20, 20)));
    root.arrange_root(Size::new(100, 100));

    let b = bounds_of(&root);
    assert_eq!(b[0], Rect::new(0, 0, 20, 20));
    assert_eq!(b[1], Rect::new(10, 10, 20, 20));
    assert_eq!(root.layout().hint_size(), Size::new(30, 30));
}

/// Overlays children at the origin and raises content resize dirt from
/// inside the pass while `requeue` is set.
struct Requeue {
    requeue: Rc<Cell<bool>>,
}

impl ProxyHost for Requeue {
    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, ()>) {
        let mut extent = Size::ZERO;
        for index in ctx.visible_indices() {
            let m = ctx.measure_slot(index, Size::UNRESTRICTED);
            ctx.slot_mut(index)
                .set_bounds(Rect::from_origin_size(Point::ORIGIN, m.size));
            extent = extent.max(m.size);
        }
        ctx.set_measured_sizes(Measurement::flexible(extent));
        if self.requeue.get() {
            ctx.defer_dirty(DirtyFlags::SIZE, DirtySource::Content);
        }
    }
}

fn requeue_layout() -> (ProxyLayout, Rc<Cell<bool>>) {
    let requeue = Rc::new(Cell::new(true));
    let layout = ProxyLayout::proxy(Requeue {
        requeue: requeue.clone(),
    });
    (layout, requeue)
}

#[test]
fn test_dirt_raised_while_arranging_keeps_measurement() {
    let (layout, requeue) = requeue_layout();
    let mut root = Container::new().with_layout(layout);
    root.push(Block::fixed(Size::new(20, 20)));
    root.arrange_root(Size::new(100, 100));

    assert!(root.layout().is_dirty());
    assert_eq!(root.layout().hint_size(), Size::new(20, 20));
    assert_eq!(root.layout().last_diagnostic(), None);
    assert_eq!(bounds_of(&root)[0], Rect::new(0, 0, 20, 20));

    requeue.set(false);
    assert!(!root.arrange(false));
    assert!(!root.layout().is_dirty());
    assert_eq!(root.layout().last_diagnostic(), None);
}

#[test]
fn test_nested_dirt_raised_while_arranging_reaches_parent() {
    let (layout, requeue) = requeue_layout();
    let mut nested = Container::new().with_layout(layout);
    nested.push(Block::fixed(Size::new(20, 20)));
    let mut root = list(Orientation::Vertical);
    root.push(nested);
    root.arrange_root(Size::new(100, 100));

    let nested_layout = |root: &Container| -> (bool, Option<trellis::LayoutDiagnostic>) {
        let layout = root
            .child(0)
            .and_then(|c| c.as_container())
            .map(|c| c.layout())
            .unwrap();
        (layout.is_dirty(), layout.last_diagnostic().cloned())
    };
    assert!(root.layout().is_dirty());
    assert_eq!(nested_layout(&root), (true, None));

    requeue.set(false);
    root.arrange(false);
    assert!(!root.layout().is_dirty());
    assert_eq!(nested_layout(&root), (false, None));
    let inner = root.child(0).and_then(|c| c.as_container()).map(bounds_of);
    assert_eq!(inner, Some(vec![Rect::new(0, 0, 20, 20)]));
}

#[test]
fn test_slot_settings_round_trip_through_json() {
    let slot = ListSlot {
        sizing: SizingRule::GrowExact,
        shrinking: ShrinkingRule::LateShrink,
        weight: Weight::new(2.0, 0.5),
        ..ListSlot::default()
    };
    let json = serde_json::to_string(&slot).unwrap();
    let back: ListSlot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, slot);

    // Missing fields fall back to defaults.
    let partial: ListSlot = serde_json::from_str(r#"{"sizing":"Expanding"}"#).unwrap();
    assert_eq!(partial.sizing, SizingRule::Expanding);
    assert_eq!(partial.weight, Weight::default());
}
