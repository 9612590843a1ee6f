//! A non-owning window over a [`RangeSet`].
//!
//! `RangeSetView<B>` clips every read and write of a backing set to a fixed
//! inclusive window `[lo, hi]`. It holds no runs and caches nothing, so it
//! always reflects the current state of the backing set.
//!
//! The backing handle `B` decides what the view may do:
//! - `&RangeSet` (or any `B: Borrow<RangeSet>`): read-only queries.
//! - `&mut RangeSet` (or any `B: BorrowMut<RangeSet>`): queries and mutation.
//!
//! Mutation rules:
//! - Adding a value or range outside the window fails with `OutOfWindow`;
//!   a view can never grow past its bounds.
//! - Removing and retaining clip silently to the window.
//! - `invert()` and `clear()` affect only the window; the backing set outside
//!   the window is left untouched.
//!
//! A window with `lo > hi` is the empty view, which retains no backing
//! reference at all.

use std::{
    borrow::{Borrow, BorrowMut},
    fmt,
    ops::{RangeBounds, RangeInclusive},
};

use ranged_common::{Result, error::Error};

use crate::{
    RangeSet,
    iter::{Runs, Values},
    range::Run,
    range_list::complement_within,
    range_set::collect_values,
    split::Spliterator,
};

/// A window `[lo, hi]` over a backing [`RangeSet`].
pub struct RangeSetView<B> {
    window: Option<Window<B>>,
}

struct Window<B> {
    backing: B,
    bounds: Run,
}

impl<B> RangeSetView<B> {
    /// The empty view: contains nothing and accepts no additions.
    pub fn empty() -> RangeSetView<B> {
        RangeSetView { window: None }
    }

    /// Bounds of the window, `None` for the empty view.
    #[inline]
    pub fn bounds(&self) -> Option<Run> {
        self.window.as_ref().map(|w| w.bounds)
    }

    /// Narrows `bounds` to the intersection with this view's window.
    #[inline]
    fn narrow(&self, bounds: impl RangeBounds<i64>) -> Option<Run> {
        Run::from_bounds(bounds)?.intersect(self.bounds()?)
    }
}

impl<B: Borrow<RangeSet>> RangeSetView<B> {
    /// Creates a view of `backing` restricted to `bounds`.
    pub fn new(backing: B, bounds: impl RangeBounds<i64>) -> RangeSetView<B> {
        Self::with_window(backing, Run::from_bounds(bounds))
    }

    pub(crate) fn with_window(backing: B, bounds: Option<Run>) -> RangeSetView<B> {
        RangeSetView {
            window: bounds.map(|bounds| Window { backing, bounds }),
        }
    }

    #[inline]
    fn parts(&self) -> Option<(&RangeSet, Run)> {
        self.window
            .as_ref()
            .map(|w| (Borrow::<RangeSet>::borrow(&w.backing), w.bounds))
    }

    #[inline]
    fn backing_runs(&self) -> &[Run] {
        match self.parts() {
            Some((set, _)) => set.range_list().runs(),
            None => &[],
        }
    }

    /// Returns `true` if `value` is inside the window and in the backing set.
    pub fn contains(&self, value: i64) -> bool {
        self.parts()
            .is_some_and(|(set, bounds)| bounds.contains(value) && set.contains(value))
    }

    /// Returns `true` if all of `[lo, hi]` lies inside the window and in the
    /// backing set. An empty range is vacuously contained.
    pub fn contains_inclusive_range(&self, lo: i64, hi: i64) -> bool {
        match Run::checked(lo, hi) {
            Some(run) => self.contains_run(run),
            None => true,
        }
    }

    pub fn contains_range(&self, bounds: impl RangeBounds<i64>) -> bool {
        match Run::from_bounds(bounds) {
            Some(run) => self.contains_run(run),
            None => true,
        }
    }

    fn contains_run(&self, run: Run) -> bool {
        self.parts().is_some_and(|(set, bounds)| {
            bounds.contains_run(run) && set.range_list().contains_run(run)
        })
    }

    /// Returns `true` if any value of `[lo, hi]` inside the window is in the
    /// backing set.
    pub fn contains_any_inclusive(&self, lo: i64, hi: i64) -> bool {
        self.contains_any(lo..=hi)
    }

    pub fn contains_any(&self, bounds: impl RangeBounds<i64>) -> bool {
        match (self.narrow(bounds), self.parts()) {
            (Some(run), Some((set, _))) => set.range_list().overlaps(run),
            _ => false,
        }
    }

    /// Iterates over the backing runs clipped to the window.
    pub fn runs(&self) -> Runs<'_> {
        Runs::new(self.backing_runs(), self.bounds())
    }

    /// Returns the clipped runs in ascending order as fresh copies.
    pub fn ranges(&self) -> Vec<RangeInclusive<i64>> {
        self.runs().map(RangeInclusive::from).collect()
    }

    pub fn values(&self) -> Values<'_> {
        Values::new(self.backing_runs(), self.bounds())
    }

    pub fn spliterator(&self) -> Spliterator<'_> {
        Spliterator::new(self.values())
    }

    pub fn is_empty(&self) -> bool {
        self.runs().len() == 0
    }

    /// Exact number of values inside the window, between 0 and 2^64.
    pub fn exact_size(&self) -> u128 {
        self.runs().map(|run| run.size()).sum()
    }

    /// Number of values inside the window, saturating at `u64::MAX`.
    pub fn len(&self) -> u64 {
        u64::try_from(self.exact_size()).unwrap_or(u64::MAX)
    }

    /// Number of clipped runs inside the window.
    pub fn range_count(&self) -> usize {
        self.runs().len()
    }

    pub fn first(&self) -> Option<i64> {
        self.runs().next().map(|r| r.first)
    }

    pub fn last(&self) -> Option<i64> {
        self.runs().next_back().map(|r| r.last)
    }

    /// Materializes the values inside the window.
    ///
    /// Fails with `CapacityOverflow` if they do not fit a `Vec<i64>`.
    pub fn to_vec(&self) -> Result<Vec<i64>> {
        collect_values(self.exact_size(), self.values())
    }

    /// Copies the window's contents into a new, independent set.
    pub fn to_range_set(&self) -> RangeSet {
        RangeSet::from_runs(self.runs())
    }

    /// A read-only view over the same backing set, narrowed to `bounds`.
    pub fn sub_set(&self, bounds: impl RangeBounds<i64>) -> RangeSetView<&RangeSet> {
        let narrowed = self.narrow(bounds);
        match self.parts() {
            Some((set, _)) => RangeSetView::with_window(set, narrowed),
            None => RangeSetView::empty(),
        }
    }

    /// See [`RangeSet::head_set`].
    pub fn head_set(&self, to: i64) -> RangeSetView<&RangeSet> {
        self.sub_set(..to)
    }

    pub fn tail_set(&self, from: i64) -> RangeSetView<&RangeSet> {
        self.sub_set(from..)
    }
}

impl<B: BorrowMut<RangeSet>> RangeSetView<B> {
    #[inline]
    fn parts_mut(&mut self) -> Option<(&mut RangeSet, Run)> {
        self.window
            .as_mut()
            .map(|w| (BorrowMut::<RangeSet>::borrow_mut(&mut w.backing), w.bounds))
    }

    /// Adds `value`, which must lie inside the window.
    ///
    /// Returns whether the backing set grew, or `OutOfWindow` if `value` is
    /// outside the window.
    pub fn add(&mut self, value: i64) -> Result<bool> {
        self.add_run(Run::point(value))
    }

    /// Adds every value of `[lo, hi]`, which must lie inside the window.
    /// An empty range adds nothing and is not an error.
    pub fn add_inclusive_range(&mut self, lo: i64, hi: i64) -> Result<bool> {
        match Run::checked(lo, hi) {
            Some(run) => self.add_run(run),
            None => Ok(false),
        }
    }

    pub fn add_range(&mut self, bounds: impl RangeBounds<i64>) -> Result<bool> {
        match Run::from_bounds(bounds) {
            Some(run) => self.add_run(run),
            None => Ok(false),
        }
    }

    fn add_run(&mut self, run: Run) -> Result<bool> {
        let window = self.bounds().map(|b| (b.first, b.last));
        match self.parts_mut() {
            Some((set, bounds)) if bounds.contains_run(run) => {
                Ok(set.range_list_mut().insert_run(run))
            }
            _ => Err(Error::out_of_window(run.first, run.last, window)),
        }
    }

    /// Removes `value` if it lies inside the window; values outside are
    /// left alone.
    pub fn remove(&mut self, value: i64) -> bool {
        self.remove_range(value..=value)
    }

    pub fn remove_inclusive_range(&mut self, lo: i64, hi: i64) -> bool {
        self.remove_range(lo..=hi)
    }

    /// Removes the part of `bounds` that lies inside the window.
    pub fn remove_range(&mut self, bounds: impl RangeBounds<i64>) -> bool {
        let narrowed = self.narrow(bounds);
        match (narrowed, self.parts_mut()) {
            (Some(run), Some((set, _))) => set.range_list_mut().remove_run(run),
            _ => false,
        }
    }

    /// Keeps, inside the window, only the values of `[lo, hi]`.
    pub fn retain_inclusive_range(&mut self, lo: i64, hi: i64) -> bool {
        self.retain_range(lo..=hi)
    }

    /// Keeps, inside the window, only the values in `bounds`.
    ///
    /// The retained region is `bounds ∩ window`; the backing set outside the
    /// window is untouched.
    pub fn retain_range(&mut self, bounds: impl RangeBounds<i64>) -> bool {
        let keep = self.narrow(bounds);
        let Some((set, window)) = self.parts_mut() else {
            return false;
        };
        let list = set.range_list_mut();
        let Some(keep) = keep else {
            return list.remove_run(window);
        };

        let mut changed = false;
        if keep.first > window.first {
            changed |= list.remove_run(Run::new(window.first, keep.first - 1));
        }
        if keep.last < window.last {
            changed |= list.remove_run(Run::new(keep.last + 1, window.last));
        }
        changed
    }

    /// Complements the window's contents in place.
    pub fn invert(&mut self) {
        let Some((set, window)) = self.parts_mut() else {
            return;
        };
        let list = set.range_list_mut();
        let gaps = complement_within(list.runs(), window);
        log::trace!("inverting window {window}: {} gaps", gaps.len());
        list.remove_run(window);
        for gap in gaps {
            list.insert_run(gap);
        }
    }

    /// Removes exactly the values inside the window from the backing set.
    pub fn clear(&mut self) {
        if let Some((set, window)) = self.parts_mut() {
            set.range_list_mut().remove_run(window);
        }
    }

    /// A mutable view over the same backing set, narrowed to `bounds`.
    pub fn sub_set_mut(&mut self, bounds: impl RangeBounds<i64>) -> RangeSetView<&mut RangeSet> {
        let narrowed = self.narrow(bounds);
        match self.parts_mut() {
            Some((set, _)) => RangeSetView::with_window(set, narrowed),
            None => RangeSetView::empty(),
        }
    }

    pub fn head_set_mut(&mut self, to: i64) -> RangeSetView<&mut RangeSet> {
        self.sub_set_mut(..to)
    }

    pub fn tail_set_mut(&mut self, from: i64) -> RangeSetView<&mut RangeSet> {
        self.sub_set_mut(from..)
    }
}

impl<'a, B: Borrow<RangeSet>> IntoIterator for &'a RangeSetView<B> {
    type Item = i64;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

impl<B: Borrow<RangeSet>> fmt::Debug for RangeSetView<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeSetView")
            .field("bounds", &self.bounds())
            .field("ranges", &self.ranges())
            .finish()
    }
}
