//! Streaming reducers that fold batches of inclusive ranges into a set.
//!
//! A [`RangeCollector`] is the supplier/accumulator/combiner/finisher quartet
//! of a parallel fold:
//!
//! - [`UnionCollector`] starts from the empty set and adds every range.
//! - [`IntersectionCollector`] starts from the full domain and retains every
//!   range.
//!
//! Both combiners merge the partial set with fewer runs into the one with
//! more, and both finishers are the identity, so the reductions are safe for
//! unordered parallel folds.
//!
//! The `FromIterator`, `Extend` and (with the `rayon` feature)
//! `FromParallelIterator` / `ParallelExtend` impls of [`RangeSet`] are built
//! on [`UnionCollector`].

use std::ops::RangeInclusive;

use bitflags::bitflags;

use crate::{RangeSet, range::Run};

bitflags! {
    /// Properties of a [`RangeCollector`] reduction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollectorFlags: u8 {
        /// The result does not depend on the order ranges are accumulated in.
        const UNORDERED = 0x01;
        /// `finish` returns the accumulator unchanged.
        const IDENTITY_FINISH = 0x02;
    }
}

/// Folds inclusive `(lo, hi)` ranges into a [`RangeSet`].
pub trait RangeCollector {
    /// Creates a fresh accumulator.
    fn supply(&self) -> RangeSet;

    /// Folds `[lo, hi]` into `acc`; `lo > hi` is the empty range.
    fn accumulate(&self, acc: &mut RangeSet, lo: i64, hi: i64);

    /// Merges two partial accumulators.
    fn combine(&self, left: RangeSet, right: RangeSet) -> RangeSet;

    fn finish(&self, acc: RangeSet) -> RangeSet {
        acc
    }

    fn characteristics(&self) -> CollectorFlags {
        CollectorFlags::UNORDERED | CollectorFlags::IDENTITY_FINISH
    }

    /// Sequentially reduces `ranges`.
    fn collect<I>(&self, ranges: I) -> RangeSet
    where
        I: IntoIterator<Item = (i64, i64)>,
        Self: Sized,
    {
        let mut acc = self.supply();
        for (lo, hi) in ranges {
            self.accumulate(&mut acc, lo, hi);
        }
        self.finish(acc)
    }

    /// Reduces `ranges` with a rayon fold/reduce.
    #[cfg(feature = "rayon")]
    fn collect_par<I>(&self, ranges: I) -> RangeSet
    where
        I: rayon::iter::IntoParallelIterator<Item = (i64, i64)>,
        Self: Sync + Sized,
    {
        use rayon::iter::ParallelIterator;

        let acc = ranges
            .into_par_iter()
            .fold(
                || self.supply(),
                |mut acc, (lo, hi)| {
                    self.accumulate(&mut acc, lo, hi);
                    acc
                },
            )
            .reduce(|| self.supply(), |left, right| self.combine(left, right));
        self.finish(acc)
    }
}

/// Orders two partial sets as `(larger, smaller)` by run count.
#[inline]
fn by_run_count(left: RangeSet, right: RangeSet) -> (RangeSet, RangeSet) {
    if left.range_count() >= right.range_count() {
        (left, right)
    } else {
        (right, left)
    }
}

/// Reduces ranges under union.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionCollector;

impl RangeCollector for UnionCollector {
    fn supply(&self) -> RangeSet {
        RangeSet::none()
    }

    fn accumulate(&self, acc: &mut RangeSet, lo: i64, hi: i64) {
        acc.add_inclusive_range(lo, hi);
    }

    fn combine(&self, left: RangeSet, right: RangeSet) -> RangeSet {
        let (mut larger, smaller) = by_run_count(left, right);
        log::trace!(
            "union combine: {} runs into {} runs",
            smaller.range_count(),
            larger.range_count()
        );
        larger.add_all(&smaller);
        larger
    }
}

/// Reduces ranges under intersection.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntersectionCollector;

impl RangeCollector for IntersectionCollector {
    fn supply(&self) -> RangeSet {
        RangeSet::all()
    }

    fn accumulate(&self, acc: &mut RangeSet, lo: i64, hi: i64) {
        acc.retain_inclusive_range(lo, hi);
    }

    fn combine(&self, left: RangeSet, right: RangeSet) -> RangeSet {
        let (mut larger, smaller) = by_run_count(left, right);
        log::trace!(
            "intersection combine: {} runs into {} runs",
            smaller.range_count(),
            larger.range_count()
        );
        larger.retain_all(&smaller);
        larger
    }
}

impl FromIterator<i64> for RangeSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        RangeSet::of_discrete(iter)
    }
}

impl FromIterator<Run> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        RangeSet::from_runs(iter)
    }
}

impl FromIterator<RangeInclusive<i64>> for RangeSet {
    fn from_iter<I: IntoIterator<Item = RangeInclusive<i64>>>(iter: I) -> Self {
        UnionCollector.collect(iter.into_iter().map(|r| (*r.start(), *r.end())))
    }
}

impl Extend<i64> for RangeSet {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        self.add_values(iter);
    }
}

impl Extend<Run> for RangeSet {
    fn extend<I: IntoIterator<Item = Run>>(&mut self, iter: I) {
        self.add_runs(iter);
    }
}

impl Extend<RangeInclusive<i64>> for RangeSet {
    fn extend<I: IntoIterator<Item = RangeInclusive<i64>>>(&mut self, iter: I) {
        for range in iter {
            self.add_inclusive_range(*range.start(), *range.end());
        }
    }
}

#[cfg(feature = "rayon")]
mod par {
    use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelExtend, ParallelIterator};

    use super::{RangeCollector, UnionCollector};
    use crate::{RangeSet, range::Run};

    impl FromParallelIterator<Run> for RangeSet {
        fn from_par_iter<I>(par_iter: I) -> Self
        where
            I: IntoParallelIterator<Item = Run>,
        {
            UnionCollector.collect_par(par_iter.into_par_iter().map(|r| (r.first, r.last)))
        }
    }

    impl FromParallelIterator<i64> for RangeSet {
        fn from_par_iter<I>(par_iter: I) -> Self
        where
            I: IntoParallelIterator<Item = i64>,
        {
            UnionCollector.collect_par(par_iter.into_par_iter().map(|v| (v, v)))
        }
    }

    impl ParallelExtend<Run> for RangeSet {
        fn par_extend<I>(&mut self, par_iter: I)
        where
            I: IntoParallelIterator<Item = Run>,
        {
            let other: RangeSet = par_iter.into_par_iter().collect();
            self.add_all(&other);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_collector() {
        let set = UnionCollector.collect([(10, 20), (0, 4), (5, 9), (30, 29), (40, 50)]);
        assert_eq!(set.ranges(), vec![0..=20, 40..=50]);
        assert_eq!(
            UnionCollector.characteristics(),
            CollectorFlags::UNORDERED | CollectorFlags::IDENTITY_FINISH
        );
    }

    #[test]
    fn test_intersection_collector() {
        let set = IntersectionCollector.collect([(0, 100), (50, 200), (-10, 75)]);
        assert_eq!(set.ranges(), vec![50..=75]);
        assert!(IntersectionCollector.collect(Vec::new()).is_full());
        assert!(IntersectionCollector.collect([(0, 10), (5, 4)]).is_empty());
    }

    #[test]
    fn test_combiners_merge_either_way() {
        let a = RangeSet::from_inclusive_ranges([(0, 1), (4, 5), (8, 9)]);
        let b = RangeSet::all_between_inclusive(1, 4);

        let u = UnionCollector.combine(a.clone(), b.clone());
        assert_eq!(u, UnionCollector.combine(b.clone(), a.clone()));
        assert_eq!(u.ranges(), vec![0..=5, 8..=9]);

        let i = IntersectionCollector.combine(a.clone(), b.clone());
        assert_eq!(i, IntersectionCollector.combine(b, a));
        assert_eq!(i.ranges(), vec![1..=1, 4..=4]);
    }

    #[test]
    fn test_from_iterator_and_extend() {
        let set: RangeSet = [5i64, 1, 2, 3, 9].into_iter().collect();
        assert_eq!(set.ranges(), vec![1..=3, 5..=5, 9..=9]);

        let mut set: RangeSet = [0..=4, 10..=14, 5..=5].into_iter().collect();
        assert_eq!(set.ranges(), vec![0..=5, 10..=14]);
        set.extend([6i64, 7]);
        set.extend([Run::new(8, 9)]);
        assert_eq!(set.ranges(), vec![0..=14]);
        set.extend([i64::MAX..=i64::MAX]);
        assert_eq!(set.range_count(), 2);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_collectors() {
        use rayon::prelude::*;

        let ranges = (0..10_000i64).map(|i| (i * 10, i * 10 + 4)).collect::<Vec<_>>();
        let par = UnionCollector.collect_par(ranges.clone());
        let seq = UnionCollector.collect(ranges.iter().copied());
        assert_eq!(par, seq);
        assert_eq!(par.range_count(), 10_000);

        let windows = (0..1_000i64).map(|i| (i, 2_000 - i)).collect::<Vec<_>>();
        let par = IntersectionCollector.collect_par(windows);
        assert_eq!(par.ranges(), vec![999..=1001]);

        let set: RangeSet = (0..1_000i64).into_par_iter().map(|v| v * 2).collect();
        assert_eq!(set.range_count(), 1_000);
        let mut set: RangeSet = (0..1_000i64)
            .into_par_iter()
            .map(|v| Run::new(v * 3, v * 3 + 1))
            .collect();
        set.par_extend((0..1_000i64).into_par_iter().map(|v| Run::point(v * 3 + 2)));
        assert_eq!(set.ranges(), vec![0..=2999]);
    }
}
