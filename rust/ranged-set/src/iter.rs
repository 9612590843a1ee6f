//! Iterators over the runs and values of a range list.

use std::{convert::identity, iter::FusedIterator};

use ranged_common::{Result, error::Error};

use crate::{range::Run, range_list::RangeList};

/// Returns the sub-slice of `runs` overlapping `window` (empty for `None`).
#[inline]
pub(crate) fn runs_within(runs: &[Run], window: Option<Run>) -> &[Run] {
    let Some(window) = window else {
        return &[];
    };
    let start = runs.partition_point(|r| r.last < window.first);
    let end = start + runs[start..].partition_point(|r| r.first <= window.last);
    &runs[start..end]
}

/// Iterator over the runs of a set, clipped to a window.
///
/// For a plain [`RangeSet`](crate::RangeSet) the window is the whole domain
/// and the runs are yielded unchanged; for a view the first and last runs may
/// be trimmed to the view's bounds.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    runs: &'a [Run],
    window: Run,
}

impl<'a> Runs<'a> {
    /// Runs of `runs` inside `window`; `None` is the empty window.
    pub(crate) fn new(runs: &'a [Run], window: Option<Run>) -> Runs<'a> {
        Runs {
            runs: runs_within(runs, window),
            window: window.unwrap_or(Run::FULL),
        }
    }

    #[inline]
    fn clip(&self, run: Run) -> Run {
        Run::new(
            run.first.max(self.window.first),
            run.last.min(self.window.last),
        )
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    #[inline]
    fn next(&mut self) -> Option<Run> {
        let (&run, rest) = self.runs.split_first()?;
        self.runs = rest;
        Some(self.clip(run))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.runs.len(), Some(self.runs.len()))
    }
}

impl DoubleEndedIterator for Runs<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Run> {
        let (&run, rest) = self.runs.split_last()?;
        self.runs = rest;
        Some(self.clip(run))
    }
}

impl ExactSizeIterator for Runs<'_> {}

impl FusedIterator for Runs<'_> {}

/// Lazy iterator over the values of a set in ascending order.
///
/// The iterator holds the slice of runs that still have values to yield,
/// and the bounds `[lo, hi]` those runs are clipped to. Consuming a value
/// from the front raises `lo`; consuming from the back lowers `hi`. A run is
/// dropped from the slice once its last clipped value has been yielded, so
/// `lo` and `hi` never step past the domain edges.
#[derive(Debug, Clone)]
pub struct Values<'a> {
    pub(crate) runs: &'a [Run],
    pub(crate) lo: i64,
    pub(crate) hi: i64,
}

impl<'a> Values<'a> {
    /// Values of `runs` inside `window`; `None` is the empty window.
    pub(crate) fn new(runs: &'a [Run], window: Option<Run>) -> Values<'a> {
        let Some(window) = window else {
            return Values::empty();
        };
        Values {
            runs: runs_within(runs, Some(window)),
            lo: window.first,
            hi: window.last,
        }
    }

    pub(crate) fn empty() -> Values<'a> {
        Values {
            runs: &[],
            lo: 0,
            hi: 0,
        }
    }

    #[inline]
    pub(crate) fn clip(&self, run: Run) -> Run {
        Run::new(run.first.max(self.lo), run.last.min(self.hi))
    }

    /// Number of values not yet yielded, up to 2^64.
    pub fn remaining(&self) -> u128 {
        self.runs.iter().map(|&r| self.clip(r).size()).sum()
    }
}

impl Iterator for Values<'_> {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<i64> {
        let run = self.clip(*self.runs.first()?);
        let value = run.first;
        if value == run.last {
            self.runs = &self.runs[1..];
        } else {
            self.lo = value + 1;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for Values<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<i64> {
        let run = self.clip(*self.runs.last()?);
        let value = run.last;
        if value == run.first {
            self.runs = &self.runs[..self.runs.len() - 1];
        } else {
            self.hi = value - 1;
        }
        Some(value)
    }
}

impl FusedIterator for Values<'_> {}

/// A forward iterator over a set's values that can remove the value it
/// returned last.
///
/// Created by [`RangeSet::cursor`](crate::RangeSet::cursor).
pub struct Cursor<'a> {
    list: &'a mut RangeList,
    /// Index of the run holding `next`.
    index: usize,
    next: Option<i64>,
    last_returned: Option<i64>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(list: &'a mut RangeList) -> Cursor<'a> {
        let next = list.first().map(|r| r.first);
        Cursor {
            list,
            index: 0,
            next,
            last_returned: None,
        }
    }

    /// Removes the value most recently returned by `next()` from the set.
    ///
    /// Fails with `IllegalState` if `next()` has not returned a value since
    /// the cursor was created or since the previous `remove()`.
    pub fn remove(&mut self) -> Result<()> {
        let value = self
            .last_returned
            .take()
            .ok_or_else(|| Error::illegal_state("remove() without a preceding next()"))?;
        self.list.remove(value);

        // Removal may have split, shrunk or deleted the run before `next`.
        self.index = match self.next {
            Some(next) => self.list.search(next).unwrap_or_else(identity),
            None => self.list.len(),
        };
        log::trace!("cursor removed {value}, next run index {}", self.index);
        Ok(())
    }
}

impl Iterator for Cursor<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let value = self.next?;
        let run = self.list.runs()[self.index];
        if value < run.last {
            self.next = Some(value + 1);
        } else {
            self.index += 1;
            self.next = self.list.runs().get(self.index).map(|r| r.first);
        }
        self.last_returned = Some(value);
        Some(value)
    }
}

impl FusedIterator for Cursor<'_> {}
