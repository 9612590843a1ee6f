//! Inclusive runs of `i64` values, and the single conversion path from Rust
//! range syntax into them.

use std::{
    fmt,
    ops::{Bound, RangeBounds, RangeInclusive},
};

use ranged_common::{Result, verify_arg};

/// A range of values `[first, last]` (both inclusive).
///
/// A `Run` is never empty: `first <= last` always holds. Operations that may
/// produce an empty interval return `Option<Run>` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Run {
    /// First value of the run
    pub first: i64,
    /// Inclusive last value of the run
    pub last: i64,
}

impl Run {
    /// The run spanning the whole `i64` domain.
    pub const FULL: Run = Run {
        first: i64::MIN,
        last: i64::MAX,
    };

    #[inline]
    pub fn new(first: i64, last: i64) -> Run {
        debug_assert!(first <= last, "empty run [{first}, {last}]");
        Run { first, last }
    }

    /// Returns `None` when `first > last`.
    #[inline]
    pub fn checked(first: i64, last: i64) -> Option<Run> {
        (first <= last).then_some(Run { first, last })
    }

    #[inline]
    pub fn point(value: i64) -> Run {
        Run {
            first: value,
            last: value,
        }
    }

    /// Normalizes any Rust range into an inclusive run.
    ///
    /// - An excluded start `s` becomes `s + 1`; `Excluded(i64::MAX)` is empty.
    /// - An excluded end `e` becomes `e - 1`, except `Excluded(i64::MIN)`, which
    ///   denotes "through `i64::MAX`" (so `5..i64::MIN` is `[5, MAX]`).
    /// - Unbounded ends map to the domain edges.
    ///
    /// Returns `None` if the normalized interval is empty.
    pub fn from_bounds(bounds: impl RangeBounds<i64>) -> Option<Run> {
        let first = match bounds.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.checked_add(1)?,
            Bound::Unbounded => i64::MIN,
        };
        let last = match bounds.end_bound() {
            Bound::Included(&end) => end,
            Bound::Excluded(&i64::MIN) => i64::MAX,
            Bound::Excluded(&end) => end - 1,
            Bound::Unbounded => i64::MAX,
        };
        Run::checked(first, last)
    }

    /// Parses a two-element endpoint slice `[lo, hi]`.
    ///
    /// Any other arity is rejected with `InvalidArgument`. A well-formed pair
    /// with `lo > hi` is the empty range and yields `Ok(None)`.
    pub fn try_from_pair(pair: &[i64]) -> Result<Option<Run>> {
        verify_arg!(pair, pair.len() == 2);
        Ok(Run::checked(pair[0], pair[1]))
    }

    /// Number of values in the run, between 1 and 2^64.
    #[inline]
    pub fn size(&self) -> u128 {
        (self.last as i128 - self.first as i128) as u128 + 1
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        value >= self.first && value <= self.last
    }

    #[inline]
    pub fn contains_run(&self, other: Run) -> bool {
        self.first <= other.first && other.last <= self.last
    }

    #[inline]
    pub fn is_disjoint(&self, other: Run) -> bool {
        self.last < other.first || self.first > other.last
    }

    /// `next` starts right after this run ends.
    #[inline]
    pub fn is_adjacent(&self, next: Run) -> bool {
        self.last < next.first && self.last.checked_add(1) == Some(next.first)
    }

    /// `next` overlaps this run or starts right after it.
    ///
    /// Requires `self.first <= next.first`.
    #[inline]
    pub fn is_adjacent_or_overlaps(&self, next: Run) -> bool {
        next.first <= self.last.saturating_add(1)
    }

    #[inline]
    pub fn intersect(&self, other: Run) -> Option<Run> {
        Run::checked(self.first.max(other.first), self.last.min(other.last))
    }

    /// Merges `next` into this run when they touch, for use with
    /// `Itertools::coalesce` over runs sorted by `first`.
    #[inline]
    pub fn coalesce(self, next: Run) -> std::result::Result<Run, (Run, Run)> {
        if self.first <= next.first && self.is_adjacent_or_overlaps(next) {
            Ok(Run {
                first: self.first,
                last: self.last.max(next.last),
            })
        } else {
            Err((self, next))
        }
    }

    /// Value splitting the run into `[first, mid]` and `[mid + 1, last]`
    /// halves of (nearly) equal size. Only meaningful when `first < last`.
    #[inline]
    pub fn midpoint(&self) -> i64 {
        let span = self.last.wrapping_sub(self.first) as u64;
        self.first.wrapping_add((span / 2) as i64)
    }

    #[inline]
    pub fn as_range(&self) -> RangeInclusive<i64> {
        self.first..=self.last
    }
}

impl From<Run> for RangeInclusive<i64> {
    #[inline]
    fn from(run: Run) -> Self {
        run.as_range()
    }
}

impl From<i64> for Run {
    #[inline]
    fn from(value: i64) -> Self {
        Run::point(value)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.last)
    }
}
