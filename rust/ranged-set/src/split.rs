//! Recursively splittable traversal for parallel consumption.
//!
//! A [`Spliterator`] covers the values of a slice of runs clipped to
//! `[lo, hi]`. Splitting hands the lower half of the remaining values to a
//! new spliterator and keeps the upper half:
//! - With two or more runs left, the run slice is divided at its midpoint.
//! - With a single run left, the run itself is divided at
//!   `lo + (hi - lo) / 2`, computed in `u64` so spans close to 2^64 do not
//!   overflow.
//!
//! Spliterators borrow the runs immutably, so the backing set cannot be
//! mutated while any of them is alive; disjoint halves may be traversed on
//! different threads. With the `rayon` feature, a spliterator is a rayon
//! `UnindexedProducer`, and [`ParValues`] exposes it as a `ParallelIterator`.

use bitflags::bitflags;

use crate::iter::Values;

bitflags! {
    /// Properties of the traversal order reported by a [`Spliterator`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Characteristics: u32 {
        /// Values are encountered in a defined order.
        const ORDERED = 0x0010;
        /// No value is encountered twice.
        const DISTINCT = 0x0001;
        /// The encounter order is ascending.
        const SORTED = 0x0004;
        /// Every encountered item is a value.
        const NONNULL = 0x0100;
    }
}

/// A splittable cursor over the values of a set or view.
#[derive(Debug, Clone)]
pub struct Spliterator<'a> {
    values: Values<'a>,
}

impl<'a> Spliterator<'a> {
    pub(crate) fn new(values: Values<'a>) -> Spliterator<'a> {
        Spliterator { values }
    }

    /// Splits off the lower half of the remaining values.
    ///
    /// Returns `None` once a single value (or nothing) is left.
    pub fn try_split(&mut self) -> Option<Spliterator<'a>> {
        let values = &mut self.values;
        match values.runs.len() {
            0 => None,
            1 => {
                let run = values.clip(values.runs[0]);
                if run.first == run.last {
                    return None;
                }
                let mid = run.midpoint();
                let prefix = Values {
                    runs: values.runs,
                    lo: run.first,
                    hi: mid,
                };
                values.lo = mid + 1;
                Some(Spliterator::new(prefix))
            }
            len => {
                let (left, right) = values.runs.split_at(len / 2);
                let prefix = Values {
                    runs: left,
                    lo: values.lo,
                    hi: values.hi,
                };
                values.runs = right;
                Some(Spliterator::new(prefix))
            }
        }
    }

    /// Number of values left, or `None` when the count does not fit a `u64`.
    pub fn estimate_size(&self) -> Option<u64> {
        u64::try_from(self.values.remaining()).ok()
    }

    /// Always `ORDERED | DISTINCT | SORTED | NONNULL`: runs are traversed low
    /// to high.
    pub fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
            | Characteristics::DISTINCT
            | Characteristics::SORTED
            | Characteristics::NONNULL
    }

    /// Feeds the next value to `f`, returning `false` when exhausted.
    pub fn try_advance(&mut self, f: impl FnOnce(i64)) -> bool {
        match self.values.next() {
            Some(value) => {
                f(value);
                true
            }
            None => false,
        }
    }

    /// Feeds every remaining value to `f`.
    pub fn for_each_remaining(self, f: impl FnMut(i64)) {
        self.values.for_each(f);
    }
}

impl Iterator for Spliterator<'_> {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<i64> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

#[cfg(feature = "rayon")]
pub use par::ParValues;

#[cfg(feature = "rayon")]
mod par {
    use rayon::iter::{
        IntoParallelIterator, ParallelIterator,
        plumbing::{Folder, UnindexedConsumer, UnindexedProducer, bridge_unindexed},
    };

    use super::Spliterator;
    use crate::RangeSet;

    impl UnindexedProducer for Spliterator<'_> {
        type Item = i64;

        fn split(mut self) -> (Self, Option<Self>) {
            match self.try_split() {
                Some(prefix) => (prefix, Some(self)),
                None => (self, None),
            }
        }

        fn fold_with<F>(self, folder: F) -> F
        where
            F: Folder<Self::Item>,
        {
            folder.consume_iter(self)
        }
    }

    /// Parallel iterator over the values of a set or view.
    ///
    /// Created by [`RangeSet::par_values`].
    #[derive(Debug, Clone)]
    pub struct ParValues<'a> {
        spliterator: Spliterator<'a>,
    }

    impl ParallelIterator for ParValues<'_> {
        type Item = i64;

        fn drive_unindexed<C>(self, consumer: C) -> C::Result
        where
            C: UnindexedConsumer<Self::Item>,
        {
            bridge_unindexed(self.spliterator, consumer)
        }
    }

    impl<'a> From<Spliterator<'a>> for ParValues<'a> {
        fn from(spliterator: Spliterator<'a>) -> Self {
            ParValues { spliterator }
        }
    }

    impl RangeSet {
        /// Parallel iterator over the values.
        pub fn par_values(&self) -> ParValues<'_> {
            ParValues::from(self.spliterator())
        }
    }

    impl<'a> IntoParallelIterator for &'a RangeSet {
        type Item = i64;
        type Iter = ParValues<'a>;

        fn into_par_iter(self) -> Self::Iter {
            self.par_values()
        }
    }
}
