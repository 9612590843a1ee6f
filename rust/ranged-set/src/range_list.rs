//! A mutable, sorted, maximally coalesced list of inclusive runs.
//!
//! `RangeList` is the sole storage behind [`RangeSet`](crate::RangeSet). It
//! keeps its runs in a `Vec<Run>` and re-establishes the following invariants
//! after every mutation:
//!
//! 1. Runs are sorted ascending by `first`.
//! 2. Runs are pairwise disjoint: `a.last < b.first`.
//! 3. Runs are maximally coalesced: no two consecutive runs are adjacent
//!    (`a.last + 1 == b.first` never holds).
//!
//! All lookups are binary searches (`partition_point`), and every mutation
//! touches only the contiguous window of runs it affects, so the cost of an
//! operation is `O(log n + k)` in the number of runs `n` and the number of
//! runs absorbed or split `k`, independent of the magnitude of the values.
//! Boundary arithmetic never overflows: comparisons against `last + 1` use
//! saturating or checked arithmetic and treat `i64::MAX` as the domain edge.

use crate::range::Run;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RangeList {
    runs: Vec<Run>,
}

impl RangeList {
    pub fn new() -> RangeList {
        RangeList { runs: Vec::new() }
    }

    pub fn full() -> RangeList {
        RangeList {
            runs: vec![Run::FULL],
        }
    }

    /// Builds a list from runs in any order, overlapping or not.
    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> RangeList {
        use itertools::Itertools;

        let mut runs = runs.into_iter().collect::<Vec<_>>();
        runs.sort_unstable_by_key(|run| run.first);
        let runs = runs
            .into_iter()
            .coalesce(|prev, next| prev.coalesce(next))
            .collect();
        let list = RangeList { runs };
        #[cfg(debug_assertions)]
        list.check_invariants();
        list
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.runs.len() == 1 && self.runs[0] == Run::FULL
    }

    #[inline]
    pub fn first(&self) -> Option<Run> {
        self.runs.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Run> {
        self.runs.last().copied()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }

    /// Total number of values covered by all runs, up to 2^64.
    pub fn count_values(&self) -> u128 {
        self.runs.iter().map(Run::size).sum()
    }

    /// Searches for the run containing `value`.
    ///
    /// Returns `Ok(index)` of the containing run, or `Err(index)` of the
    /// position where a run containing `value` would be inserted.
    #[inline]
    pub fn search(&self, value: i64) -> Result<usize, usize> {
        let idx = self.runs.partition_point(|run| run.last < value);
        match self.runs.get(idx) {
            Some(run) if run.first <= value => Ok(idx),
            _ => Err(idx),
        }
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.search(value).is_ok()
    }

    /// Returns `true` if a single run covers the whole of `run`.
    pub fn contains_run(&self, run: Run) -> bool {
        match self.search(run.first) {
            Ok(idx) => self.runs[idx].last >= run.last,
            Err(_) => false,
        }
    }

    /// Returns `true` if any stored run overlaps `run`.
    pub fn overlaps(&self, run: Run) -> bool {
        let idx = self.runs.partition_point(|r| r.last < run.first);
        self.runs.get(idx).is_some_and(|r| r.first <= run.last)
    }

    /// Index range `[start, end)` of the runs that overlap `run`.
    #[inline]
    pub fn overlapping(&self, run: Run) -> std::ops::Range<usize> {
        let start = self.runs.partition_point(|r| r.last < run.first);
        let end = start + self.runs[start..].partition_point(|r| r.first <= run.last);
        start..end
    }

    /// Index range `[start, end)` of the runs that overlap `run` or are
    /// adjacent to it on either side.
    #[inline]
    fn touching(&self, run: Run) -> std::ops::Range<usize> {
        let start = self
            .runs
            .partition_point(|r| r.last.saturating_add(1) < run.first);
        let limit = run.last.saturating_add(1);
        let end = start + self.runs[start..].partition_point(|r| r.first <= limit);
        start..end
    }

    /// Smallest stored value `>= value`.
    pub fn ceiling(&self, value: i64) -> Option<i64> {
        match self.search(value) {
            Ok(_) => Some(value),
            Err(idx) => self.runs.get(idx).map(|r| r.first),
        }
    }

    /// Largest stored value `<= value`.
    pub fn floor(&self, value: i64) -> Option<i64> {
        match self.search(value) {
            Ok(_) => Some(value),
            Err(idx) => idx.checked_sub(1).map(|i| self.runs[i].last),
        }
    }

    /// Inserts a single value, extending or merging neighbouring runs.
    ///
    /// Returns `true` if the list changed.
    pub fn insert(&mut self, value: i64) -> bool {
        let idx = match self.search(value) {
            Ok(_) => return false,
            Err(idx) => idx,
        };

        // `value` lies strictly between runs[idx - 1] and runs[idx].
        let joins_prev = idx > 0 && self.runs[idx - 1].last.checked_add(1) == Some(value);
        let joins_next =
            idx < self.runs.len() && value.checked_add(1) == Some(self.runs[idx].first);
        match (joins_prev, joins_next) {
            (true, true) => {
                self.runs[idx - 1].last = self.runs[idx].last;
                self.runs.remove(idx);
            }
            (true, false) => self.runs[idx - 1].last = value,
            (false, true) => self.runs[idx].first = value,
            (false, false) => self.runs.insert(idx, Run::point(value)),
        }
        true
    }

    /// Inserts all values of `run`, absorbing every overlapping or adjacent run.
    ///
    /// Returns `true` if the list changed.
    pub fn insert_run(&mut self, run: Run) -> bool {
        let touching = self.touching(run);
        if touching.is_empty() {
            self.runs.insert(touching.start, run);
            return true;
        }

        let lo = self.runs[touching.start];
        let hi = self.runs[touching.end - 1];
        if touching.len() == 1 && lo.contains_run(run) {
            return false;
        }

        let merged = Run::new(lo.first.min(run.first), hi.last.max(run.last));
        self.runs[touching.start] = merged;
        self.runs.drain(touching.start + 1..touching.end);
        true
    }

    /// Removes a single value, splitting or shrinking its run.
    ///
    /// Returns `true` if the list changed.
    pub fn remove(&mut self, value: i64) -> bool {
        let idx = match self.search(value) {
            Ok(idx) => idx,
            Err(_) => return false,
        };

        let run = self.runs[idx];
        if run.first == run.last {
            self.runs.remove(idx);
        } else if value == run.first {
            self.runs[idx].first = value + 1;
        } else if value == run.last {
            self.runs[idx].last = value - 1;
        } else {
            self.runs[idx].last = value - 1;
            self.runs.insert(idx + 1, Run::new(value + 1, run.last));
        }
        true
    }

    /// Removes all values of `run`, trimming, splitting or deleting the
    /// overlapping runs.
    ///
    /// Returns `true` if the list changed.
    pub fn remove_run(&mut self, run: Run) -> bool {
        let overlapping = self.overlapping(run);
        if overlapping.is_empty() {
            return false;
        }

        let lo = self.runs[overlapping.start];
        let hi = self.runs[overlapping.end - 1];
        // `run.first > lo.first >= MIN` and `run.last < hi.last <= MAX`, so
        // neither remainder computation can overflow.
        let left = (lo.first < run.first).then(|| Run::new(lo.first, run.first - 1));
        let right = (hi.last > run.last).then(|| Run::new(run.last + 1, hi.last));
        let _ = self.runs.splice(overlapping, left.into_iter().chain(right));
        true
    }

    /// Removes every value outside of `run`.
    ///
    /// Returns `true` if the list changed.
    pub fn retain_run(&mut self, run: Run) -> bool {
        let overlapping = self.overlapping(run);
        if overlapping.is_empty() {
            let changed = !self.runs.is_empty();
            self.runs.clear();
            return changed;
        }

        let mut changed = overlapping.start > 0 || overlapping.end < self.runs.len();
        self.runs.truncate(overlapping.end);
        self.runs.drain(..overlapping.start);

        let first = &mut self.runs[0];
        if first.first < run.first {
            first.first = run.first;
            changed = true;
        }
        let last_idx = self.runs.len() - 1;
        let last = &mut self.runs[last_idx];
        if last.last > run.last {
            last.last = run.last;
            changed = true;
        }
        changed
    }

    /// Replaces the runs with their complement across the whole `i64` domain.
    pub fn invert(&mut self) {
        if self.runs.is_empty() {
            self.runs.push(Run::FULL);
            return;
        }
        if self.is_full() {
            self.runs.clear();
            return;
        }
        self.runs = complement_within(&self.runs, Run::FULL);
    }

    /// Removes and returns the smallest value.
    pub fn pop_first(&mut self) -> Option<i64> {
        let value = self.runs.first()?.first;
        self.remove(value);
        Some(value)
    }

    /// Removes and returns the largest value.
    pub fn pop_last(&mut self) -> Option<i64> {
        let value = self.runs.last()?.last;
        self.remove(value);
        Some(value)
    }

    /// Asserts that the list is sorted, disjoint and maximally coalesced.
    ///
    /// Panics on the first violation.
    pub fn check_invariants(&self) {
        for run in &self.runs {
            assert!(run.first <= run.last, "Empty run {run:?}");
        }
        for pair in self.runs.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            assert!(
                prev.last < next.first,
                "Runs must be sorted and disjoint: prev={prev:?}, next={next:?}"
            );
            assert!(
                !prev.is_adjacent(next),
                "Runs must be coalesced: prev={prev:?}, next={next:?}"
            );
        }
    }
}

/// Computes the gaps between `runs` that fall inside `window`.
///
/// `runs` must be sorted and disjoint. The "next uncovered value" cursor is an
/// `Option<i64>`, where `None` marks that the cursor moved past `i64::MAX`.
pub(crate) fn complement_within(runs: &[Run], window: Run) -> Vec<Run> {
    let mut gaps = Vec::with_capacity(runs.len() + 1);
    let mut next_uncovered = Some(window.first);
    for run in runs {
        let Some(cursor) = next_uncovered else {
            break;
        };
        if run.last < cursor {
            continue;
        }
        if run.first > window.last {
            break;
        }
        if cursor < run.first {
            // `run.first > cursor >= MIN`, so `run.first - 1` cannot overflow.
            gaps.push(Run::new(cursor, run.first - 1));
        }
        next_uncovered = run.last.checked_add(1);
    }
    if let Some(cursor) = next_uncovered {
        if cursor <= window.last {
            gaps.push(Run::new(cursor, window.last));
        }
    }
    gaps
}
