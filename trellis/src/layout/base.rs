//! Base layout: the measure/arrange protocol shared by every strategy.
//!
//! [`Layout<S>`] owns one [`Slot`] per child of its host and drives the
//! arrange pass:
//!
//! 1. No visible children: the aggregate is zero, nothing else happens.
//! 2. Every visible slot without a valid unrestricted measurement is
//!    measured for unrestricted space.
//! 3. If the aggregate is still valid for this space and the slot bounds
//!    were computed for it, go straight to placement.
//! 4. `pre_arrange`, then up to `max_iterations` rounds of `arrange`.
//!    After each round, space-dependent slots are measured again at the
//!    bounds they got; if that changes their hint, another round runs.
//! 5. `place` every visible slot, one `layout_update` per child.
//! 6. Apply dirt deferred during the pass.
//!
//! The strategy math lives behind the [`Strategy`] trait. Strategies only see
//! the children through an [`ArrangeCtx`].

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::control::{Control, ControlId, LayoutHost, Measurement};
use crate::layout::cache::SizeCache;
use crate::layout::diagnostics::LayoutDiagnostic;
use crate::layout::flags::{DirtyFlags, DirtySource, LayoutFlags};
use crate::layout::slot::Slot;
use crate::primitives::{Rect, Size};

// =========================================================================
// Configuration
// =========================================================================

/// Per-layout tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangeConfig {
    /// Upper bound of arrange rounds per pass. Values below one count as one.
    pub max_iterations: u32,
}

impl Default for ArrangeConfig {
    fn default() -> Self {
        Self { max_iterations: 3 }
    }
}

// =========================================================================
// Strategy
// =========================================================================

/// The arrangement math of a layout.
pub trait Strategy: 'static {
    /// Strategy-specific data stored in every slot.
    type SlotData: Default + 'static;

    /// Events this strategy reacts to, unless overridden per layout.
    fn default_flags(&self) -> LayoutFlags;

    /// Data for a slot created for `control`.
    fn create_slot(&mut self, _control: &dyn Control) -> Self::SlotData {
        Self::SlotData::default()
    }

    /// Called once per pass before the arrange rounds.
    fn pre_arrange(&mut self, _ctx: &mut ArrangeCtx<'_, Self::SlotData>) {}

    /// Compute slot bounds for `ctx.space()`. Must report the aggregate
    /// through [`ArrangeCtx::set_measured_sizes`].
    fn arrange(&mut self, ctx: &mut ArrangeCtx<'_, Self::SlotData>);

    /// Final rectangle of the control in slot `index`.
    fn place(&mut self, ctx: &mut ArrangeCtx<'_, Self::SlotData>, index: usize) -> Rect {
        clamped_placement(ctx, index)
    }
}

/// Slot bounds with the size clamped into the slot's `[min, max]`.
pub fn clamped_placement<E>(ctx: &ArrangeCtx<'_, E>, index: usize) -> Rect {
    let slot = ctx.slot(index);
    let size = slot.bounds().size().clamp(slot.min_size(), slot.max_size());
    Rect::from_origin_size(slot.bounds().origin(), size)
}

// =========================================================================
// Aggregate measurement
// =========================================================================

/// The layout's own measurement, split like a slot's caches.
///
/// A stale aggregate answers no lookups but still reports its last sizes,
/// so dirt raised during a pass does not zero the layout's size before the
/// next pass measures again.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Aggregate {
    unrestricted: SizeCache,
    restricted: SizeCache,
    stale: bool,
}

impl Aggregate {
    fn invalidate(&mut self) {
        self.unrestricted.invalidate();
        self.restricted.invalidate();
        self.stale = false;
    }

    fn mark_stale(&mut self) {
        self.stale = true;
    }

    fn store(&mut self, space: Size, measurement: Measurement) {
        self.stale = false;
        if space.is_unrestricted() || !measurement.size_from_space {
            self.unrestricted.store(space, measurement);
            self.restricted.invalidate();
        } else {
            self.restricted.store(space, measurement);
        }
    }

    fn lookup(&self, space: Size) -> Option<Measurement> {
        if self.stale {
            return None;
        }
        self.cached(space)
    }

    /// Like `lookup`, but also answers from a stale aggregate.
    fn cached(&self, space: Size) -> Option<Measurement> {
        if space.is_unrestricted() {
            return self
                .unrestricted
                .is_valid()
                .then(|| self.unrestricted.measurement());
        }
        if self.restricted.is_valid() && self.restricted.space() == space {
            return Some(self.restricted.measurement());
        }
        self.unrestricted
            .covers(space)
            .then(|| self.unrestricted.measurement())
    }

    fn best(&self) -> Option<&SizeCache> {
        if self.restricted.is_valid() {
            Some(&self.restricted)
        } else if self.unrestricted.is_valid() {
            Some(&self.unrestricted)
        } else {
            None
        }
    }
}

/// Dirt raised while a pass was running, applied when it ends.
#[derive(Debug, Clone, Copy, Default)]
struct DeferredDirt {
    container: DirtyFlags,
    content: DirtyFlags,
}

// =========================================================================
// ArrangeCtx
// =========================================================================

/// What a strategy sees during a pass: the slots, the host's children and
/// the aggregate measurement.
pub struct ArrangeCtx<'a, E> {
    slots: &'a mut Vec<Slot<E>>,
    host: &'a mut dyn LayoutHost,
    aggregate: &'a mut Aggregate,
    deferred: &'a mut DeferredDirt,
    space: Size,
    iteration: u32,
    measured: bool,
    space_dependent: bool,
    used_hints: Vec<Option<Size>>,
}

impl<'a, E> ArrangeCtx<'a, E> {
    fn new(
        slots: &'a mut Vec<Slot<E>>,
        host: &'a mut dyn LayoutHost,
        aggregate: &'a mut Aggregate,
        deferred: &'a mut DeferredDirt,
        space: Size,
    ) -> Self {
        let count = slots.len();
        Self {
            slots,
            host,
            aggregate,
            deferred,
            space,
            iteration: 0,
            measured: false,
            space_dependent: false,
            used_hints: vec![None; count],
        }
    }

    /// Space the pass arranges for.
    pub fn space(&self) -> Size {
        self.space
    }

    /// Zero-based arrange round of the current pass.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> &Slot<E> {
        &self.slots[index]
    }

    pub fn slot_mut(&mut self, index: usize) -> &mut Slot<E> {
        &mut self.slots[index]
    }

    /// Indices of the slots whose child is visible, in child order.
    pub fn visible_indices(&self) -> Vec<usize> {
        (0..self.slots.len())
            .filter(|&i| self.slots[i].is_visible())
            .collect()
    }

    /// The child behind slot `index`.
    pub fn child(&self, index: usize) -> Option<&dyn Control> {
        self.host.child(index)
    }

    /// Measure slot `index` for `space`, using its caches when they answer.
    pub fn measure_slot(&mut self, index: usize, space: Size) -> Measurement {
        let slot = &mut self.slots[index];

        let cached = if space.is_unrestricted() {
            slot.unrestricted
                .is_valid()
                .then(|| slot.unrestricted.measurement())
        } else if slot.restricted.is_valid() && slot.restricted.space() == space {
            Some(slot.restricted.measurement())
        } else if slot.unrestricted.covers(space) {
            slot.restricted.invalidate();
            Some(slot.unrestricted.measurement())
        } else {
            None
        };

        let measurement = match cached {
            Some(m) => {
                tracing::trace!("slot {} cache hit for {:?}", index, space);
                m
            }
            None => {
                tracing::trace!("slot {} measuring for {:?}", index, space);
                let raw = match self.host.child_mut(index) {
                    Some(child) => child.on_measure(space),
                    None => Measurement::default(),
                };
                if space.is_unrestricted() || !raw.size_from_space {
                    slot.unrestricted.store(space, raw);
                    slot.restricted.invalidate();
                    slot.unrestricted.measurement()
                } else {
                    slot.restricted.store(space, raw);
                    slot.restricted.measurement()
                }
            }
        };

        if measurement.size_from_space {
            self.space_dependent = true;
        }
        self.used_hints[index] = Some(measurement.size);
        measurement
    }

    /// Report the layout's aggregate measurement for the current space.
    pub fn set_measured_sizes(&mut self, measurement: Measurement) {
        let mut measurement = measurement;
        if self.space_dependent {
            measurement.size_from_space = true;
        }
        self.aggregate.store(self.space, measurement);
        self.measured = true;
    }

    /// Record dirt to be applied once the pass is over.
    pub fn defer_dirty(&mut self, reason: DirtyFlags, source: DirtySource) {
        match source {
            DirtySource::Container => self.deferred.container |= reason,
            DirtySource::Content => self.deferred.content |= reason,
        }
    }

    fn begin_iteration(&mut self, iteration: u32) {
        self.iteration = iteration;
        self.used_hints.iter_mut().for_each(|h| *h = None);
    }

    /// Measure space-dependent slots at the bounds they were given.
    /// Returns whether any hint differs from the one the strategy used.
    fn refine(&mut self) -> bool {
        let mut changed = false;
        for index in 0..self.slots.len() {
            let slot = &self.slots[index];
            if !slot.is_visible() || !slot.depends_on_space() {
                continue;
            }
            let used = self.used_hints[index].unwrap_or_else(|| slot.hint_size());
            let bounds = slot.bounds().size();
            let refined = self.measure_slot(index, bounds);
            if refined.size != used {
                tracing::trace!(
                    "slot {} hint changed from {:?} to {:?}",
                    index,
                    used,
                    refined.size
                );
                changed = true;
            }
        }
        changed
    }

    fn apply_placement(&mut self, index: usize, rect: Rect) {
        if let Some(child) = self.host.child_mut(index) {
            child.layout_update(rect.origin(), rect.size());
        }
    }
}

// =========================================================================
// Layout
// =========================================================================

/// A strategy together with its slots, caches and dirt state.
pub struct Layout<S: Strategy> {
    strategy: S,
    slots: Vec<Slot<S::SlotData>>,
    aggregate: Aggregate,
    dirty: bool,
    flags_override: Option<LayoutFlags>,
    flags: LayoutFlags,
    config: ArrangeConfig,
    deferred: DeferredDirt,
    bounds_space: Option<Size>,
    last_diagnostic: Option<LayoutDiagnostic>,
}

impl<S: Strategy> Layout<S> {
    pub fn new(strategy: S) -> Self {
        let flags = strategy.default_flags();
        Self {
            strategy,
            slots: Vec::new(),
            aggregate: Aggregate::default(),
            dirty: true,
            flags_override: None,
            flags,
            config: ArrangeConfig::default(),
            deferred: DeferredDirt::default(),
            bounds_space: None,
            last_diagnostic: None,
        }
    }

    /// Replace the strategy's reaction flags. `None` restores the defaults.
    pub fn with_flags(mut self, flags: Option<LayoutFlags>) -> Self {
        self.set_flags(flags);
        self
    }

    pub fn with_config(mut self, config: ArrangeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_flags(&mut self, flags: Option<LayoutFlags>) {
        self.flags_override = flags;
        self.flags = flags.unwrap_or_else(|| self.strategy.default_flags());
    }

    pub fn flags(&self) -> LayoutFlags {
        self.flags
    }

    pub fn config(&self) -> ArrangeConfig {
        self.config
    }

    pub fn set_config(&mut self, config: ArrangeConfig) {
        self.config = config;
        self.invalidate();
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Mutable strategy access. The caller decides what to invalidate.
    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn slots(&self) -> &[Slot<S::SlotData>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot<S::SlotData>> {
        self.slots.get(index)
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot<S::SlotData>> {
        self.slots.get_mut(index)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn last_diagnostic(&self) -> Option<&LayoutDiagnostic> {
        self.last_diagnostic.as_ref()
    }

    /// Drop the aggregate and slot bounds so the next pass recomputes
    /// everything. Returns `true`: the layout's size may have changed.
    pub fn invalidate(&mut self) -> bool {
        self.aggregate.invalidate();
        self.bounds_space = None;
        self.dirty = true;
        true
    }

    /// Re-run placement only. Slot bounds and measurements stay valid.
    pub(crate) fn mark_reposition(&mut self) {
        self.dirty = true;
    }

    /// Recompute slot bounds on the next pass. The aggregate stays valid.
    pub(crate) fn mark_rearrange(&mut self) {
        self.bounds_space = None;
        self.dirty = true;
    }

    // ---------------------------------------------------------------------
    // Dirt
    // ---------------------------------------------------------------------

    /// React to a change. Returns whether the layout's own size might have
    /// changed, in which case the caller has to tell its parent.
    pub fn mark_dirty(&mut self, reason: DirtyFlags, source: DirtySource) -> bool {
        self.react(reason, source, false)
    }

    fn react(&mut self, reason: DirtyFlags, source: DirtySource, after_pass: bool) -> bool {
        if self.flags.intersects(LayoutFlags::layout_triggers(reason, source)) {
            self.dirty = true;
        }
        if self.flags.intersects(LayoutFlags::resize_triggers(reason, source)) {
            if after_pass {
                // Keep the sizes just reported; the next pass measures again.
                self.aggregate.mark_stale();
                self.bounds_space = None;
            } else {
                self.aggregate.invalidate();
            }
            self.dirty = true;
            return true;
        }
        false
    }

    /// A child changed. `SIZE` drops the slot's measurements first.
    pub fn mark_slot_dirty(&mut self, index: usize, reason: DirtyFlags) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        if reason.contains(DirtyFlags::SIZE) {
            slot.invalidate();
        }
        self.mark_dirty(reason, DirtySource::Content)
    }

    // ---------------------------------------------------------------------
    // Slot lifecycle
    // ---------------------------------------------------------------------

    /// Rebuild all slots from the host's children.
    pub fn attach(&mut self, host: &dyn LayoutHost) {
        self.flags = self
            .flags_override
            .unwrap_or_else(|| self.strategy.default_flags());
        self.slots.clear();
        for index in 0..host.child_count() {
            if let Some(slot) = self.make_slot(host, index) {
                self.slots.push(slot);
            }
        }
        self.invalidate();
    }

    pub fn detach(&mut self) {
        self.slots.clear();
        self.aggregate.invalidate();
        self.bounds_space = None;
        self.dirty = false;
    }

    /// The host inserted a child at `index`.
    pub fn child_added(&mut self, host: &dyn LayoutHost, index: usize) -> bool {
        let Some(slot) = self.make_slot(host, index) else {
            return false;
        };
        let index = index.min(self.slots.len());
        self.slots.insert(index, slot);
        self.structure_changed()
    }

    pub fn child_removed(&mut self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        self.slots.remove(index);
        self.structure_changed()
    }

    pub fn child_moved(&mut self, from: usize, to: usize) -> bool {
        if from >= self.slots.len() || to >= self.slots.len() {
            return false;
        }
        let slot = self.slots.remove(from);
        self.slots.insert(to, slot);
        self.bounds_space = None;
        self.dirty = true;
        self.mark_dirty(DirtyFlags::INDEX, DirtySource::Content)
    }

    pub fn all_deleted(&mut self) -> bool {
        self.slots.clear();
        self.structure_changed()
    }

    fn make_slot(&mut self, host: &dyn LayoutHost, index: usize) -> Option<Slot<S::SlotData>> {
        let id = host.child_id(index)?;
        let child = host.child(index)?;
        let data = self.strategy.create_slot(child);
        Some(Slot::new(id, data))
    }

    fn structure_changed(&mut self) -> bool {
        self.mark_dirty(DirtyFlags::INDEX, DirtySource::Content);
        self.invalidate()
    }

    // ---------------------------------------------------------------------
    // Measurement and arrangement
    // ---------------------------------------------------------------------

    /// Best aggregate hint size, or zero when nothing was measured.
    pub fn hint_size(&self) -> Size {
        self.aggregate.best().map(SizeCache::size).unwrap_or(Size::ZERO)
    }

    pub fn min_size(&self) -> Size {
        self.aggregate.best().map(SizeCache::min).unwrap_or(Size::ZERO)
    }

    pub fn max_size(&self) -> Size {
        self.aggregate.best().map(SizeCache::max).unwrap_or(Size::ZERO)
    }

    /// Arrange for `host.layout_space()` if dirty or `forced`.
    ///
    /// Returns whether dirt raised during the pass may have changed the
    /// layout's own size, in which case the caller has to tell its parent.
    pub fn request_arrange(&mut self, host: &mut dyn LayoutHost, forced: bool) -> bool {
        if !self.dirty && !forced {
            return false;
        }
        let space = host.layout_space();
        self.run_pass(host, space, true)
    }

    /// The layout's measurement for `available`, without placing children.
    pub fn measure(&mut self, host: &mut dyn LayoutHost, available: Size) -> Measurement {
        if let Some(m) = self.aggregate.lookup(available) {
            if !self.slots_need_measuring(host) {
                return m;
            }
        }
        self.run_pass(host, available, false);
        self.aggregate.cached(available).unwrap_or_default()
    }

    fn slots_need_measuring(&self, host: &dyn LayoutHost) -> bool {
        self.slots.iter().enumerate().any(|(i, slot)| {
            let visible = host.child(i).is_some_and(|c| c.is_visible());
            visible != slot.is_visible() || (visible && !slot.unrestricted.is_valid())
        })
    }

    /// One arrange pass. Returns what the deferred dirt reported.
    fn run_pass(&mut self, host: &mut dyn LayoutHost, space: Size, place: bool) -> bool {
        tracing::debug!(
            "arrange pass: space={:?} slots={} place={}",
            space,
            self.slots.len(),
            place
        );
        self.last_diagnostic = None;

        // Sample visibility once per pass.
        let mut changed = false;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let visible = host.child(index).is_some_and(|c| c.is_visible());
            if visible != slot.visible {
                slot.visible = visible;
                changed = true;
            }
        }

        if !self.slots.iter().any(Slot::is_visible) {
            self.aggregate.store(Size::UNRESTRICTED, Measurement::default());
            self.bounds_space = Some(space);
            return self.finish_pass(place, true);
        }

        let mut deferred = DeferredDirt::default();
        let mut ctx = ArrangeCtx::new(
            &mut self.slots,
            host,
            &mut self.aggregate,
            &mut deferred,
            space,
        );

        for index in ctx.visible_indices() {
            if !ctx.slot(index).unrestricted.is_valid() {
                ctx.measure_slot(index, Size::UNRESTRICTED);
                changed = true;
            }
        }

        let up_to_date =
            !changed && ctx.aggregate.lookup(space).is_some() && self.bounds_space == Some(space);
        let mut measured = up_to_date;

        if !up_to_date {
            self.strategy.pre_arrange(&mut ctx);

            let max_iterations = self.config.max_iterations.max(1);
            let mut converged = false;
            let mut rounds = 0;
            while rounds < max_iterations {
                ctx.begin_iteration(rounds);
                self.strategy.arrange(&mut ctx);
                rounds += 1;
                if !ctx.refine() {
                    converged = true;
                    break;
                }
            }
            measured = ctx.measured;

            if !converged {
                let diagnostic = LayoutDiagnostic::NotConverged { iterations: rounds };
                tracing::warn!("{}", diagnostic);
                self.last_diagnostic = Some(diagnostic);
            }
            self.bounds_space = Some(space);
        } else {
            tracing::trace!("slot bounds still valid for {:?}", space);
        }

        if place {
            for index in ctx.visible_indices() {
                let rect = self.strategy.place(&mut ctx, index);
                ctx.apply_placement(index, rect);
            }
        }

        drop(ctx);
        self.deferred.container |= deferred.container;
        self.deferred.content |= deferred.content;
        self.finish_pass(place, measured)
    }

    /// Close a pass: report a strategy that did not measure, then apply the
    /// deferred dirt. Returns whether that dirt may have resized the layout.
    fn finish_pass(&mut self, placed: bool, measured: bool) -> bool {
        if placed {
            self.dirty = false;
        }

        if !measured {
            let diagnostic = LayoutDiagnostic::MissingMeasurement;
            tracing::warn!("{}", diagnostic);
            self.last_diagnostic = Some(diagnostic);
        }

        let deferred = std::mem::take(&mut self.deferred);
        let mut resized = false;
        if !deferred.container.is_empty() {
            resized |= self.react(deferred.container, DirtySource::Container, true);
        }
        if !deferred.content.is_empty() {
            resized |= self.react(deferred.content, DirtySource::Content, true);
        }
        if resized {
            tracing::debug!("dirt raised during the pass resized the layout");
        }
        resized
    }
}

// =========================================================================
// AnyLayout
// =========================================================================

/// Object-safe view of a [`Layout<S>`], so a container can hold any
/// strategy and still get typed access through downcasting.
pub trait AnyLayout: Any {
    fn mark_dirty(&mut self, reason: DirtyFlags, source: DirtySource) -> bool;
    fn mark_slot_dirty(&mut self, index: usize, reason: DirtyFlags) -> bool;
    fn request_arrange(&mut self, host: &mut dyn LayoutHost, forced: bool) -> bool;
    fn measure(&mut self, host: &mut dyn LayoutHost, available: Size) -> Measurement;
    fn hint_size(&self) -> Size;
    fn min_size(&self) -> Size;
    fn max_size(&self) -> Size;
    fn is_dirty(&self) -> bool;
    fn attach(&mut self, host: &dyn LayoutHost);
    fn detach(&mut self);
    fn child_added(&mut self, host: &dyn LayoutHost, index: usize) -> bool;
    fn child_removed(&mut self, index: usize) -> bool;
    fn child_moved(&mut self, from: usize, to: usize) -> bool;
    fn all_deleted(&mut self) -> bool;
    fn slot_count(&self) -> usize;
    fn slot_bounds(&self, index: usize) -> Option<Rect>;
    fn last_diagnostic(&self) -> Option<&LayoutDiagnostic>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: Strategy> AnyLayout for Layout<S> {
    fn mark_dirty(&mut self, reason: DirtyFlags, source: DirtySource) -> bool {
        Layout::mark_dirty(self, reason, source)
    }

    fn mark_slot_dirty(&mut self, index: usize, reason: DirtyFlags) -> bool {
        Layout::mark_slot_dirty(self, index, reason)
    }

    fn request_arrange(&mut self, host: &mut dyn LayoutHost, forced: bool) -> bool {
        Layout::request_arrange(self, host, forced)
    }

    fn measure(&mut self, host: &mut dyn LayoutHost, available: Size) -> Measurement {
        Layout::measure(self, host, available)
    }

    fn hint_size(&self) -> Size {
        Layout::hint_size(self)
    }

    fn min_size(&self) -> Size {
        Layout::min_size(self)
    }

    fn max_size(&self) -> Size {
        Layout::max_size(self)
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn attach(&mut self, host: &dyn LayoutHost) {
        Layout::attach(self, host)
    }

    fn detach(&mut self) {
        Layout::detach(self)
    }

    fn child_added(&mut self, host: &dyn LayoutHost, index: usize) -> bool {
        Layout::child_added(self, host, index)
    }

    fn child_removed(&mut self, index: usize) -> bool {
        Layout::child_removed(self, index)
    }

    fn child_moved(&mut self, from: usize, to: usize) -> bool {
        Layout::child_moved(self, from, to)
    }

    fn all_deleted(&mut self) -> bool {
        Layout::all_deleted(self)
    }

    fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot_bounds(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).map(Slot::bounds)
    }

    fn last_diagnostic(&self) -> Option<&LayoutDiagnostic> {
        self.last_diagnostic.as_ref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// =========================================================================
// Tests
// =========================================================================
