//! Ordered set of `i64` values stored as maximal disjoint inclusive runs.
//!
//! `RangeSet` models a set S ⊆ [i64::MIN, i64::MAX]. Memory is proportional
//! to the number of runs, never to the number of values: a single run can
//! represent up to 2^64 values.
//!
//! Typical usage
//! - Construct via `none()`, `all()`, `of_discrete(..)` or `all_between(..)`.
//! - Mutate in place with `add`/`remove`/`retain` and their range forms.
//! - Query membership with `contains(..)`, iterate over values or runs.
//! - Take a windowed view with `sub_set(..)` to operate on a sub-interval.
//!
//! Every operation that takes a Rust range (`impl RangeBounds<i64>`) has an
//! `*_inclusive_*` twin taking `(lo, hi)`. Both are normalized by
//! [`Run::from_bounds`], which is also where an exclusive end of `i64::MIN`
//! is read as "through `i64::MAX`".

use std::{
    fmt,
    ops::{RangeBounds, RangeInclusive},
};

use ranged_common::{Result, error::Error};

use crate::{
    iter::{Cursor, Runs, Values},
    range::Run,
    range_list::RangeList,
    split::Spliterator,
    view::RangeSetView,
};

/// A mutable set of `i64` values stored as a sorted list of maximal runs.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct RangeSet {
    list: RangeList,
}

impl RangeSet {
    /// Creates an empty set.
    pub fn none() -> RangeSet {
        RangeSet {
            list: RangeList::new(),
        }
    }

    /// Creates a set holding every `i64`.
    pub fn all() -> RangeSet {
        RangeSet {
            list: RangeList::full(),
        }
    }

    /// Creates a set holding a single value.
    pub fn of(value: i64) -> RangeSet {
        Self::from_runs([Run::point(value)])
    }

    /// Creates a set from discrete values, in any order, duplicates allowed.
    pub fn of_discrete(values: impl IntoIterator<Item = i64>) -> RangeSet {
        Self::from_runs(values.into_iter().map(Run::point))
    }

    /// Creates a set holding every value in `bounds`.
    pub fn all_between(bounds: impl RangeBounds<i64>) -> RangeSet {
        Self::from_runs(Run::from_bounds(bounds))
    }

    /// Creates a set holding every value in `[lo, hi]`; empty if `lo > hi`.
    pub fn all_between_inclusive(lo: i64, hi: i64) -> RangeSet {
        Self::from_runs(Run::checked(lo, hi))
    }

    /// Creates a set holding every `i64` except `value`.
    pub fn all_except(value: i64) -> RangeSet {
        let mut set = Self::all();
        set.remove(value);
        set
    }

    /// Creates a set from runs in any order; overlapping and adjacent runs
    /// are coalesced.
    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> RangeSet {
        RangeSet {
            list: RangeList::from_runs(runs),
        }
    }

    /// Creates a set from inclusive `(lo, hi)` pairs; pairs with `lo > hi`
    /// are empty and contribute nothing.
    pub fn from_inclusive_ranges(ranges: impl IntoIterator<Item = (i64, i64)>) -> RangeSet {
        Self::from_runs(
            ranges
                .into_iter()
                .filter_map(|(lo, hi)| Run::checked(lo, hi)),
        )
    }

    /// Creates a set from Rust ranges (`a..b`, `a..=b`, `a..`, ...).
    pub fn from_ranges<R: RangeBounds<i64>>(ranges: impl IntoIterator<Item = R>) -> RangeSet {
        Self::from_runs(ranges.into_iter().filter_map(Run::from_bounds))
    }

    /// Creates a set from `[lo, hi]` endpoint slices.
    ///
    /// Fails with `InvalidArgument` if any slice does not hold exactly two
    /// endpoints.
    pub fn try_from_pairs<'p>(pairs: impl IntoIterator<Item = &'p [i64]>) -> Result<RangeSet> {
        let mut runs = Vec::new();
        for pair in pairs {
            runs.extend(Run::try_from_pair(pair)?);
        }
        Ok(Self::from_runs(runs))
    }

    /// Returns the underlying run storage.
    #[inline]
    pub fn range_list(&self) -> &RangeList {
        &self.list
    }

    #[inline]
    pub(crate) fn range_list_mut(&mut self) -> &mut RangeList {
        &mut self.list
    }

    /// Test membership of `value`.
    ///
    /// Complexity: O(log n) in the number of runs.
    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.list.contains(value)
    }

    /// Returns `true` if a single run covers all of `[lo, hi]`.
    ///
    /// An empty range (`lo > hi`) is vacuously contained.
    pub fn contains_inclusive_range(&self, lo: i64, hi: i64) -> bool {
        match Run::checked(lo, hi) {
            Some(run) => self.list.contains_run(run),
            None => true,
        }
    }

    /// Returns `true` if every value in `bounds` is in the set.
    pub fn contains_range(&self, bounds: impl RangeBounds<i64>) -> bool {
        match Run::from_bounds(bounds) {
            Some(run) => self.list.contains_run(run),
            None => true,
        }
    }

    /// Returns `true` if any value of `[lo, hi]` is in the set.
    ///
    /// An empty range (`lo > hi`) never overlaps anything.
    pub fn contains_any_inclusive(&self, lo: i64, hi: i64) -> bool {
        Run::checked(lo, hi).is_some_and(|run| self.list.overlaps(run))
    }

    /// Returns `true` if any value in `bounds` is in the set.
    pub fn contains_any(&self, bounds: impl RangeBounds<i64>) -> bool {
        Run::from_bounds(bounds).is_some_and(|run| self.list.overlaps(run))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if the set holds every `i64`.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.list.is_full()
    }

    /// Exact number of values in the set, between 0 and 2^64.
    pub fn exact_size(&self) -> u128 {
        self.list.count_values()
    }

    /// Number of values in the set, saturating at `u64::MAX` for the full
    /// domain (whose 2^64 values do not fit a `u64`).
    pub fn len(&self) -> u64 {
        u64::try_from(self.exact_size()).unwrap_or(u64::MAX)
    }

    /// Number of disjoint runs stored, not the number of values.
    #[inline]
    pub fn range_count(&self) -> usize {
        self.list.len()
    }

    /// Returns the maximal runs in ascending order as fresh copies.
    pub fn ranges(&self) -> Vec<RangeInclusive<i64>> {
        self.list.runs().iter().map(Run::as_range).collect()
    }

    /// Iterates over the maximal runs in ascending order.
    pub fn runs(&self) -> Runs<'_> {
        Runs::new(self.list.runs(), Some(Run::FULL))
    }

    /// Smallest value in the set.
    pub fn first(&self) -> Option<i64> {
        self.list.first().map(|r| r.first)
    }

    /// Largest value in the set.
    pub fn last(&self) -> Option<i64> {
        self.list.last().map(|r| r.last)
    }

    /// Smallest value in the set that is `>= value`.
    pub fn ceiling(&self, value: i64) -> Option<i64> {
        self.list.ceiling(value)
    }

    /// Largest value in the set that is `<= value`.
    pub fn floor(&self, value: i64) -> Option<i64> {
        self.list.floor(value)
    }

    /// Smallest value in the set that is `> value`.
    pub fn higher(&self, value: i64) -> Option<i64> {
        self.list.ceiling(value.checked_add(1)?)
    }

    /// Largest value in the set that is `< value`.
    pub fn lower(&self, value: i64) -> Option<i64> {
        self.list.floor(value.checked_sub(1)?)
    }

    pub fn is_subset(&self, other: &RangeSet) -> bool {
        self.list.runs().iter().all(|&run| other.list.contains_run(run))
    }

    pub fn is_superset(&self, other: &RangeSet) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &RangeSet) -> bool {
        let (small, large) = if self.range_count() <= other.range_count() {
            (self, other)
        } else {
            (other, self)
        };
        !small.list.runs().iter().any(|&run| large.list.overlaps(run))
    }

    /// Adds `value`, returning `true` if the set grew.
    pub fn add(&mut self, value: i64) -> bool {
        self.list.insert(value)
    }

    /// Adds every value of `[lo, hi]`, returning `true` if the set grew.
    ///
    /// Complexity: O(log n + k) where k is the number of runs absorbed.
    pub fn add_inclusive_range(&mut self, lo: i64, hi: i64) -> bool {
        Run::checked(lo, hi).is_some_and(|run| self.list.insert_run(run))
    }

    /// Adds every value in `bounds`, returning `true` if the set grew.
    pub fn add_range(&mut self, bounds: impl RangeBounds<i64>) -> bool {
        Run::from_bounds(bounds).is_some_and(|run| self.list.insert_run(run))
    }

    /// Removes `value`, returning `true` if the set shrank.
    pub fn remove(&mut self, value: i64) -> bool {
        self.list.remove(value)
    }

    /// Removes every value of `[lo, hi]`, returning `true` if the set shrank.
    pub fn remove_inclusive_range(&mut self, lo: i64, hi: i64) -> bool {
        Run::checked(lo, hi).is_some_and(|run| self.list.remove_run(run))
    }

    /// Removes every value in `bounds`, returning `true` if the set shrank.
    pub fn remove_range(&mut self, bounds: impl RangeBounds<i64>) -> bool {
        Run::from_bounds(bounds).is_some_and(|run| self.list.remove_run(run))
    }

    /// Removes every value outside `[lo, hi]`, returning `true` if the set
    /// shrank. Retaining an empty range clears the set.
    pub fn retain_inclusive_range(&mut self, lo: i64, hi: i64) -> bool {
        self.retain_run(Run::checked(lo, hi))
    }

    /// Removes every value outside `bounds`, returning `true` if the set shrank.
    pub fn retain_range(&mut self, bounds: impl RangeBounds<i64>) -> bool {
        self.retain_run(Run::from_bounds(bounds))
    }

    fn retain_run(&mut self, run: Option<Run>) -> bool {
        match run {
            Some(run) => self.list.retain_run(run),
            None => {
                let changed = !self.list.is_empty();
                self.list.clear();
                changed
            }
        }
    }

    /// Replaces the set with its complement across the whole `i64` domain.
    pub fn invert(&mut self) {
        self.list.invert();
    }

    /// Returns the complement of the set, leaving `self` untouched.
    pub fn complement(&self) -> RangeSet {
        let mut set = self.clone();
        set.invert();
        set
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Removes and returns the smallest value.
    pub fn pop_first(&mut self) -> Option<i64> {
        self.list.pop_first()
    }

    /// Removes and returns the largest value.
    pub fn pop_last(&mut self) -> Option<i64> {
        self.list.pop_last()
    }

    /// Adds every value of `other`, returning `true` if the set grew.
    pub fn add_all(&mut self, other: &RangeSet) -> bool {
        self.add_runs(other.runs())
    }

    /// Removes every value of `other`, returning `true` if the set shrank.
    pub fn remove_all(&mut self, other: &RangeSet) -> bool {
        self.remove_runs(other.runs())
    }

    /// Keeps only the values also in `other`, returning `true` if the set
    /// shrank.
    pub fn retain_all(&mut self, other: &RangeSet) -> bool {
        if other.is_empty() {
            return self.retain_run(None);
        }
        // Removing the gaps of `other` leaves exactly the intersection.
        let gaps = crate::range_list::complement_within(other.list.runs(), Run::FULL);
        self.remove_runs(gaps)
    }

    pub fn add_runs(&mut self, runs: impl IntoIterator<Item = Run>) -> bool {
        runs.into_iter()
            .fold(false, |changed, run| self.list.insert_run(run) | changed)
    }

    pub fn remove_runs(&mut self, runs: impl IntoIterator<Item = Run>) -> bool {
        runs.into_iter()
            .fold(false, |changed, run| self.list.remove_run(run) | changed)
    }

    /// Keeps only the values covered by `runs`, returning `true` if the set
    /// shrank.
    pub fn retain_runs(&mut self, runs: impl IntoIterator<Item = Run>) -> bool {
        self.retain_all(&RangeSet::from_runs(runs))
    }

    /// Adds discrete values, returning `true` if the set grew.
    pub fn add_values(&mut self, values: impl IntoIterator<Item = i64>) -> bool {
        values
            .into_iter()
            .fold(false, |changed, value| self.list.insert(value) | changed)
    }

    /// Removes discrete values, returning `true` if the set shrank.
    pub fn remove_values(&mut self, values: impl IntoIterator<Item = i64>) -> bool {
        values
            .into_iter()
            .fold(false, |changed, value| self.list.remove(value) | changed)
    }

    /// Keeps only the values that also appear in `values`.
    pub fn retain_values(&mut self, values: impl IntoIterator<Item = i64>) -> bool {
        self.retain_all(&RangeSet::of_discrete(values))
    }

    /// Iterates over the values in ascending order.
    pub fn values(&self) -> Values<'_> {
        Values::new(self.list.runs(), Some(Run::FULL))
    }

    /// Calls `f` for every value in ascending order.
    pub fn for_each(&self, f: impl FnMut(i64)) {
        self.values().for_each(f)
    }

    /// Iterates over the values with the ability to remove the current one.
    pub fn cursor(&mut self) -> Cursor<'_> {
        Cursor::new(&mut self.list)
    }

    /// Returns a recursively splittable cursor over the values.
    pub fn spliterator(&self) -> Spliterator<'_> {
        Spliterator::new(self.values())
    }

    /// Materializes the values into a vector.
    ///
    /// Fails with `CapacityOverflow` if the set holds more values than a
    /// `Vec<i64>` can.
    pub fn to_vec(&self) -> Result<Vec<i64>> {
        collect_values(self.exact_size(), self.values())
    }

    /// A read-only view of the whole set.
    pub fn view(&self) -> RangeSetView<&RangeSet> {
        RangeSetView::with_window(self, Some(Run::FULL))
    }

    /// A read-only view of the values in `bounds`.
    pub fn sub_set(&self, bounds: impl RangeBounds<i64>) -> RangeSetView<&RangeSet> {
        RangeSetView::new(self, bounds)
    }

    /// A read-only view of the values below `to` (exclusive; `i64::MIN`
    /// denotes the whole domain).
    pub fn head_set(&self, to: i64) -> RangeSetView<&RangeSet> {
        RangeSetView::new(self, ..to)
    }

    /// A read-only view of the values `<= to`.
    pub fn head_set_inclusive(&self, to: i64) -> RangeSetView<&RangeSet> {
        RangeSetView::new(self, ..=to)
    }

    /// A read-only view of the values `>= from`.
    pub fn tail_set(&self, from: i64) -> RangeSetView<&RangeSet> {
        RangeSetView::new(self, from..)
    }

    /// A mutable view of the whole set.
    pub fn view_mut(&mut self) -> RangeSetView<&mut RangeSet> {
        RangeSetView::with_window(self, Some(Run::FULL))
    }

    /// A mutable view of the values in `bounds`.
    pub fn sub_set_mut(&mut self, bounds: impl RangeBounds<i64>) -> RangeSetView<&mut RangeSet> {
        RangeSetView::new(self, bounds)
    }

    /// A mutable view of the values below `to` (exclusive; `i64::MIN`
    /// denotes the whole domain).
    pub fn head_set_mut(&mut self, to: i64) -> RangeSetView<&mut RangeSet> {
        RangeSetView::new(self, ..to)
    }

    /// A mutable view of the values `>= from`.
    pub fn tail_set_mut(&mut self, from: i64) -> RangeSetView<&mut RangeSet> {
        RangeSetView::new(self, from..)
    }

    /// Asserts the run-list invariants; panics on violation.
    pub fn check_invariants(&self) {
        self.list.check_invariants();
    }
}

/// Collects `count` values into a vector, failing fast when the count does
/// not fit the allocation.
pub(crate) fn collect_values(count: u128, values: Values<'_>) -> Result<Vec<i64>> {
    let capacity = usize::try_from(count).map_err(|_| Error::capacity_overflow(count))?;
    let mut vec = Vec::new();
    if vec.try_reserve_exact(capacity).is_err() {
        log::debug!("cannot materialize {count} values into a Vec");
        return Err(Error::capacity_overflow(count));
    }
    vec.extend(values);
    Ok(vec)
}

impl From<RangeList> for RangeSet {
    fn from(list: RangeList) -> Self {
        RangeSet { list }
    }
}

impl From<Run> for RangeSet {
    fn from(run: Run) -> Self {
        RangeSet::from_runs([run])
    }
}

impl<'a> IntoIterator for &'a RangeSet {
    type Item = i64;
    type IntoIter = Values<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}

impl fmt::Display for RangeSet {
    /// Formats the set as `[[lo, hi], ...]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, run) in self.list.runs().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{run}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.list.runs().iter().map(Run::as_range))
            .finish()
    }
}
