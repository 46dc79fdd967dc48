//! Container: a control that owns child controls and one layout.
//!
//! The container keeps its layout's slots in sync with the child list and
//! forwards dirt in both directions:
//!
//! - down: its own resize/reposition/index change marks the layout,
//! - up: a child change marks the slot, and the returned flag tells the
//!   caller whether the container's own size may have changed.
//!
//! Arrangement runs top-down from [`Container::arrange`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::control::{Control, ControlId, LayoutHost, Measurement};
use crate::layout::{AnyLayout, ContainerLayout, DirtyFlags, DirtySource, Layout, Padding, Strategy};
use crate::primitives::{Point, Rect, Size};

bitflags! {
    /// Which sizes the container takes from its layout. The others come
    /// from the explicit values set on the container.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SizeMode: u8 {
        const HINT_FROM_LAYOUT = 0b001;
        const MIN_FROM_LAYOUT  = 0b010;
        const MAX_FROM_LAYOUT  = 0b100;
        const FROM_LAYOUT = Self::HINT_FROM_LAYOUT.bits()
            | Self::MIN_FROM_LAYOUT.bits()
            | Self::MAX_FROM_LAYOUT.bits();
    }
}

impl Default for SizeMode {
    fn default() -> Self {
        SizeMode::FROM_LAYOUT
    }
}

// =========================================================================
// Children
// =========================================================================

struct Entry {
    id: ControlId,
    control: Box<dyn Control>,
}

/// The child list as the layout sees it.
#[derive(Default)]
struct Children {
    entries: Vec<Entry>,
    space: Size,
}

impl Children {
    /// Number of children that are not always on top.
    fn regular_count(&self) -> usize {
        self.entries
            .iter()
            .take_while(|e| !e.control.always_on_top())
            .count()
    }
}

impl LayoutHost for Children {
    fn layout_space(&self) -> Size {
        self.space
    }

    fn child_count(&self) -> usize {
        self.entries.len()
    }

    fn child_id(&self, index: usize) -> Option<ControlId> {
        self.entries.get(index).map(|e| e.id)
    }

    fn child(&self, index: usize) -> Option<&dyn Control> {
        self.entries.get(index).map(|e| e.control.as_ref())
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut dyn Control> {
        match self.entries.get_mut(index) {
            Some(e) => Some(e.control.as_mut()),
            None => None,
        }
    }
}

// =========================================================================
// Container
// =========================================================================

pub struct Container {
    label: Option<String>,
    children: Children,
    layout: Box<dyn AnyLayout>,
    explicit_layout: bool,
    padding: Padding,
    bounds: Rect,
    position: Point,
    visible: bool,
    on_top: bool,
    size_mode: SizeMode,
    hint: Size,
    min: Size,
    max: Size,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// An empty container using the free-placement layout.
    pub fn new() -> Self {
        Self {
            label: None,
            children: Children::default(),
            layout: Box::new(ContainerLayout::free()),
            explicit_layout: false,
            padding: Padding::default(),
            bounds: Rect::ZERO,
            position: Point::ORIGIN,
            visible: true,
            on_top: false,
            size_mode: SizeMode::default(),
            hint: Size::ZERO,
            min: Size::ZERO,
            max: Size::UNBOUNDED,
        }
    }

    pub fn with_layout<S: Strategy>(mut self, layout: Layout<S>) -> Self {
        self.set_layout(Box::new(layout));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn on_top(mut self) -> Self {
        self.on_top = true;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.set_padding(padding);
        self
    }

    // ---------------------------------------------------------------------
    // Layout
    // ---------------------------------------------------------------------

    pub fn layout(&self) -> &dyn AnyLayout {
        self.layout.as_ref()
    }

    /// Typed access to the attached layout.
    pub fn layout_as<S: Strategy>(&self) -> Option<&Layout<S>> {
        self.layout.as_any().downcast_ref::<Layout<S>>()
    }

    pub fn layout_as_mut<S: Strategy>(&mut self) -> Option<&mut Layout<S>> {
        self.layout.as_any_mut().downcast_mut::<Layout<S>>()
    }

    /// Change the attached layout's settings. `f` returns whether the
    /// layout's size may have changed, as the layout setters do. The result
    /// is `None` if a different layout is attached, else whether the
    /// container's own size may have changed.
    pub fn configure_layout<S, F>(&mut self, f: F) -> Option<bool>
    where
        S: Strategy,
        F: FnOnce(&mut Layout<S>) -> bool,
    {
        let layout = self.layout_as_mut::<S>()?;
        let resized = f(layout);
        Some(resized && self.size_mode != SizeMode::empty())
    }

    /// Attach `layout`, returning the previously attached explicit layout.
    pub fn set_layout(&mut self, mut layout: Box<dyn AnyLayout>) -> Option<Box<dyn AnyLayout>> {
        layout.attach(&self.children);
        let mut old = std::mem::replace(&mut self.layout, layout);
        old.detach();
        let had_explicit = std::mem::replace(&mut self.explicit_layout, true);
        had_explicit.then_some(old)
    }

    /// Detach the explicit layout and fall back to free placement.
    /// Returns `None` when no explicit layout was attached.
    pub fn detach_layout(&mut self) -> Option<Box<dyn AnyLayout>> {
        if !self.explicit_layout {
            return None;
        }
        let mut free: Box<dyn AnyLayout> = Box::new(ContainerLayout::free());
        free.attach(&self.children);
        let mut old = std::mem::replace(&mut self.layout, free);
        old.detach();
        self.explicit_layout = false;
        Some(old)
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Returns whether the container's own size may have changed.
    pub fn set_padding(&mut self, padding: Padding) -> bool {
        if self.padding == padding {
            return false;
        }
        self.padding = padding;
        self.children.space = self.inner_size(self.bounds.size());
        self.layout.mark_dirty(DirtyFlags::SIZE, DirtySource::Container);
        self.size_mode != SizeMode::empty()
    }

    /// Space available to the layout.
    pub fn layout_space(&self) -> Size {
        self.children.space
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    pub fn set_size_mode(&mut self, mode: SizeMode) {
        self.size_mode = mode;
    }

    /// Sizes reported for the parts not taken from the layout.
    pub fn set_explicit_sizes(&mut self, hint: Size, min: Size, max: Size) {
        self.hint = hint;
        self.min = min;
        self.max = max;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn inner_size(&self, outer: Size) -> Size {
        Size::new(
            (outer.width - self.padding.horizontal()).max(0),
            (outer.height - self.padding.vertical()).max(0),
        )
    }

    // ---------------------------------------------------------------------
    // Children
    // ---------------------------------------------------------------------

    pub fn child_count(&self) -> usize {
        self.children.entries.len()
    }

    pub fn child(&self, index: usize) -> Option<&dyn Control> {
        self.children.child(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut dyn Control> {
        self.children.child_mut(index)
    }

    pub fn child_id(&self, index: usize) -> Option<ControlId> {
        self.children.child_id(index)
    }

    pub fn index_of(&self, id: ControlId) -> Option<usize> {
        self.children.entries.iter().position(|e| e.id == id)
    }

    /// Append a child. See [`Container::add_child`].
    pub fn push(&mut self, control: impl Control + 'static) -> usize {
        self.add_child(Box::new(control), usize::MAX)
    }

    /// Insert a child at `index`, clamped so that always-on-top children
    /// stay after the regular ones. Returns the index it ended up at.
    pub fn add_child(&mut self, control: Box<dyn Control>, index: usize) -> usize {
        let regular = self.children.regular_count();
        let count = self.children.entries.len();
        let index = if control.always_on_top() {
            index.clamp(regular, count)
        } else {
            index.min(regular)
        };

        let id = ControlId::next();
        self.children.entries.insert(index, Entry { id, control });
        self.layout.child_added(&self.children, index);
        self.indices_changed(index + 1, count + 1);
        tracing::trace!("child {} added at {}", id.get(), index);
        index
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Control>> {
        if index >= self.children.entries.len() {
            return None;
        }
        let entry = self.children.entries.remove(index);
        self.layout.child_removed(index);
        self.indices_changed(index, self.children.entries.len());
        Some(entry.control)
    }

    /// Move a child. Fails for invalid indices and for moves across the
    /// always-on-top boundary.
    pub fn move_child(&mut self, from: usize, to: usize) -> bool {
        let count = self.children.entries.len();
        if from >= count || to >= count {
            return false;
        }
        if from == to {
            return true;
        }
        let regular = self.children.regular_count();
        let on_top = self.children.entries[from].control.always_on_top();
        if on_top != (to >= regular) {
            return false;
        }

        let entry = self.children.entries.remove(from);
        self.children.entries.insert(to, entry);
        self.layout.child_moved(from, to);
        self.indices_changed(from.min(to), from.max(to) + 1);
        true
    }

    /// Remove every child.
    pub fn delete_all(&mut self) {
        self.children.entries.clear();
        self.layout.all_deleted();
    }

    fn indices_changed(&mut self, start: usize, end: usize) {
        let end = end.min(self.children.entries.len());
        for entry in &mut self.children.entries[start.min(end)..end] {
            entry.control.index_changed();
        }
    }

    // ---------------------------------------------------------------------
    // Dirt propagation
    // ---------------------------------------------------------------------

    /// Tell the layout that child `index` changed. Returns whether this
    /// container's own size may have changed.
    pub fn notify_child_changed(&mut self, index: usize, reason: DirtyFlags) -> bool {
        let resized = self.layout.mark_slot_dirty(index, reason);
        resized && self.size_mode != SizeMode::empty()
    }

    /// Modify child `index`. `f` returns what changed about it.
    pub fn update_child<F>(&mut self, index: usize, f: F) -> bool
    where
        F: FnOnce(&mut dyn Control) -> DirtyFlags,
    {
        let Some(child) = self.children.child_mut(index) else {
            return false;
        };
        let reason = f(child);
        if reason.is_empty() {
            return false;
        }
        self.notify_child_changed(index, reason)
    }

    /// Modify the control at `path` (child indices from this container
    /// down), propagating dirt up to this container.
    pub fn update_descendant<F>(&mut self, path: &[usize], f: F) -> bool
    where
        F: FnOnce(&mut dyn Control) -> DirtyFlags,
    {
        match path {
            [] => false,
            [index] => self.update_child(*index, f),
            [index, rest @ ..] => {
                let Some(nested) = self
                    .children
                    .child_mut(*index)
                    .and_then(|c| c.as_container_mut())
                else {
                    return false;
                };
                if nested.update_descendant(rest, f) {
                    self.notify_child_changed(*index, DirtyFlags::SIZE)
                } else {
                    false
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Arrangement
    // ---------------------------------------------------------------------

    /// Arrange this container, then every nested container.
    ///
    /// Returns whether dirt raised while arranging may have changed this
    /// container's own size. Nested containers that report so mark their
    /// slot dirty here; the next arrange picks that up.
    pub fn arrange(&mut self, forced: bool) -> bool {
        let mut resized = self.layout.request_arrange(&mut self.children, forced);
        let mut grown = Vec::new();
        for (index, entry) in self.children.entries.iter_mut().enumerate() {
            if !entry.control.is_visible() {
                continue;
            }
            if let Some(nested) = entry.control.as_container_mut() {
                if nested.arrange(forced) {
                    grown.push(index);
                }
            }
        }
        for index in grown {
            tracing::debug!("nested container {} resized while arranging", index);
            resized |= self.layout.mark_slot_dirty(index, DirtyFlags::SIZE);
        }
        resized && self.size_mode != SizeMode::empty()
    }

    /// Size the root container to `size` and arrange the whole tree.
    pub fn arrange_root(&mut self, size: Size) {
        self.layout_update(Point::ORIGIN, size);
        self.arrange(false);
    }

    /// Visit every control in the tree, depth first. The callback gets the
    /// nesting depth and the control's bounds relative to the root.
    pub fn walk(&self, f: &mut dyn FnMut(usize, &dyn Control, Rect)) {
        self.walk_at(0, self.bounds.origin(), f);
    }

    fn walk_at(&self, depth: usize, origin: Point, f: &mut dyn FnMut(usize, &dyn Control, Rect)) {
        let inner = origin + self.padding.leading();
        for entry in &self.children.entries {
            let control = entry.control.as_ref();
            let local = control.bounds();
            let absolute = Rect::from_origin_size(inner + local.origin(), local.size());
            f(depth, control, absolute);
            if let Some(nested) = control.as_container() {
                nested.walk_at(depth + 1, absolute.origin(), f);
            }
        }
    }
}

impl Control for Container {
    fn on_measure(&mut self, available: Size) -> Measurement {
        let shrink = |len: i32, pad: i32| if len < 0 { -1 } else { (len - pad).max(0) };
        let inner = Size::new(
            shrink(available.width, self.padding.horizontal()),
            shrink(available.height, self.padding.vertical()),
        );
        let m = self.layout.measure(&mut self.children, inner);
        let pad = self.padding.size();

        let pick = |flag: SizeMode, layout: Size, explicit: Size| {
            if self.size_mode.contains(flag) {
                layout.saturating_add(pad)
            } else {
                explicit
            }
        };
        Measurement {
            size: pick(SizeMode::HINT_FROM_LAYOUT, m.size, self.hint),
            min: pick(SizeMode::MIN_FROM_LAYOUT, m.min, self.min),
            max: pick(SizeMode::MAX_FROM_LAYOUT, m.max, self.max),
            size_from_space: m.size_from_space,
        }
    }

    fn layout_update(&mut self, position: Point, size: Size) {
        let old = self.bounds;
        self.bounds = Rect::from_origin_size(position, size);
        if old.size() != size {
            self.children.space = self.inner_size(size);
            self.layout.mark_dirty(DirtyFlags::SIZE, DirtySource::Container);
        }
        if old.origin() != position {
            self.layout.mark_dirty(DirtyFlags::POSITION, DirtySource::Container);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn hint_position(&self) -> Point {
        self.position
    }

    fn always_on_top(&self) -> bool {
        self.on_top
    }

    fn index_changed(&mut self) {
        self.layout.mark_dirty(DirtyFlags::INDEX, DirtySource::Container);
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn as_container(&self) -> Option<&Container> {
        Some(self)
    }

    fn as_container_mut(&mut self) -> Option<&mut Container> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::Block;
    use crate::layout::{ListLayout, Orientation};

    fn block(w: i32, h: i32) -> Block {
        Block::fixed(Size::new(w, h))
    }

    #[test]
    fn test_free_layout_uses_hint_position() {
        let mut root = Container::new();
        root.push(block(10, 20).at(Point::new(5, 6)));
        root.arrange_root(Size::new(100, 100));

        assert_eq!(root.child(0).map(|c| c.bounds()), Some(Rect::new(5, 6, 10, 20)));
        assert_eq!(root.layout().hint_size(), Size::ZERO);
    }

    #[test]
    fn test_on_top_children_stay_last() {
        let mut root = Container::new();
        root.push(block(1, 1).label("a"));
        root.push(block(1, 1).label("top").on_top());
        assert_eq!(root.add_child(Box::new(block(1, 1).label("b")), 5), 1);
        assert_eq!(root.child(2).and_then(|c| c.label()), Some("top"));

        // Regular child cannot move behind the on-top one.
        assert!(!root.move_child(0, 2));
        assert!(!root.move_child(2, 0));
        assert!(root.move_child(0, 1));
        assert_eq!(root.child(0).and_then(|c| c.label()), Some("b"));
        assert!(!root.move_child(0, 7));
    }

    #[test]
    fn test_remove_and_delete_all() {
        let mut root = Container::new().with_layout(ListLayout::list(Orientation::Vertical));
        root.push(block(10, 10));
        root.push(block(10, 10));

        assert!(root.remove_child(5).is_none());
        assert!(root.remove_child(0).is_some());
        assert_eq!(root.layout().slot_count(), 1);

        root.delete_all();
        assert_eq!(root.child_count(), 0);
        assert_eq!(root.layout().slot_count(), 0);
    }

    #[test]
    fn test_detach_layout() {
        let mut root = Container::new();
        assert!(root.detach_layout().is_none());

        root.push(block(10, 10));
        let old = root.set_layout(Box::new(ListLayout::list(Orientation::Horizontal)));
        assert!(old.is_none());
        assert!(root.layout_as::<crate::layout::ListStrategy>().is_some());
        assert_eq!(root.layout().slot_count(), 1);

        let detached = root.detach_layout();
        assert!(detached.is_some());
        assert!(root.layout_as::<crate::layout::FreeStrategy>().is_some());
        assert_eq!(root.layout().slot_count(), 1);
    }

    #[test]
    fn test_padding_shrinks_layout_space() {
        let mut root = Container::new().with_padding(Padding::all(10));
        root.layout_update(Point::ORIGIN, Size::new(100, 50));
        assert_eq!(root.layout_space(), Size::new(80, 30));

        root.layout_update(Point::ORIGIN, Size::new(15, 15));
        assert_eq!(root.layout_space(), Size::ZERO);
    }

    #[test]
    fn test_measure_adds_padding() {
        let mut inner = Container::new()
            .with_layout(ListLayout::list(Orientation::Horizontal))
            .with_padding(Padding::symmetric(5, 2));
        inner.push(block(30, 10));
        inner.push(block(20, 12));

        let m = inner.on_measure(Size::UNRESTRICTED);
        assert_eq!(m.size, Size::new(60, 16));
    }

    #[test]
    fn test_explicit_size_mode() {
        let mut c = Container::new().with_layout(ListLayout::list(Orientation::Horizontal));
        c.push(block(30, 10));
        c.set_size_mode(SizeMode::MIN_FROM_LAYOUT);
        c.set_explicit_sizes(Size::new(200, 40), Size::ZERO, Size::new(300, 300));

        let m = c.on_measure(Size::UNRESTRICTED);
        assert_eq!(m.size, Size::new(200, 40));
        assert_eq!(m.min, Size::new(30, 10));
        assert_eq!(m.max, Size::new(300, 300));
    }
}
