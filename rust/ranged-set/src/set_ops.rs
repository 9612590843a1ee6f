//! Set algebra over whole [`RangeSet`]s: N-ary union, intersection and
//! difference, plus the `|`, `&`, `-`, `^` and `!` operators on references.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not, Sub, SubAssign};

use crate::RangeSet;

impl RangeSet {
    /// Union of all `sets`; the empty set when there are none.
    pub fn union<'a>(sets: impl IntoIterator<Item = &'a RangeSet>) -> RangeSet {
        let mut result = RangeSet::none();
        for set in sets {
            result.add_all(set);
        }
        result
    }

    /// Intersection of all `sets`; the full domain when there are none.
    pub fn intersection<'a>(sets: impl IntoIterator<Item = &'a RangeSet>) -> RangeSet {
        let mut result = RangeSet::all();
        for set in sets {
            if result.is_empty() {
                break;
            }
            result.retain_all(set);
        }
        result
    }

    /// Values of `first` that are in none of `others`.
    pub fn difference<'a>(
        first: &RangeSet,
        others: impl IntoIterator<Item = &'a RangeSet>,
    ) -> RangeSet {
        let mut result = first.clone();
        for set in others {
            if result.is_empty() {
                break;
            }
            result.remove_all(set);
        }
        result
    }
}

impl BitOr<&RangeSet> for &RangeSet {
    type Output = RangeSet;

    fn bitor(self, rhs: &RangeSet) -> RangeSet {
        let (mut larger, smaller) = if self.range_count() >= rhs.range_count() {
            (self.clone(), rhs)
        } else {
            (rhs.clone(), self)
        };
        larger.add_all(smaller);
        larger
    }
}

impl BitAnd<&RangeSet> for &RangeSet {
    type Output = RangeSet;

    fn bitand(self, rhs: &RangeSet) -> RangeSet {
        let mut result = self.clone();
        result.retain_all(rhs);
        result
    }
}

impl Sub<&RangeSet> for &RangeSet {
    type Output = RangeSet;

    fn sub(self, rhs: &RangeSet) -> RangeSet {
        let mut result = self.clone();
        result.remove_all(rhs);
        result
    }
}

/// Symmetric difference.
impl BitXor<&RangeSet> for &RangeSet {
    type Output = RangeSet;

    fn bitxor(self, rhs: &RangeSet) -> RangeSet {
        let mut result = self | rhs;
        result.remove_all(&(self & rhs));
        result
    }
}

/// Complement across the whole `i64` domain.
impl Not for &RangeSet {
    type Output = RangeSet;

    fn not(self) -> RangeSet {
        self.complement()
    }
}

impl BitOrAssign<&RangeSet> for RangeSet {
    fn bitor_assign(&mut self, rhs: &RangeSet) {
        self.add_all(rhs);
    }
}

impl BitAndAssign<&RangeSet> for RangeSet {
    fn bitand_assign(&mut self, rhs: &RangeSet) {
        self.retain_all(rhs);
    }
}

impl SubAssign<&RangeSet> for RangeSet {
    fn sub_assign(&mut self, rhs: &RangeSet) {
        self.remove_all(rhs);
    }
}

#[cfg(test)]
mod tests {
    use crate::RangeSet;

    fn set(pairs: &[(i64, i64)]) -> RangeSet {
        RangeSet::from_inclusive_ranges(pairs.iter().copied())
    }

    #[test]
    fn test_n_ary_operations() {
        let a = set(&[(0, 10), (20, 30)]);
        let b = set(&[(5, 25)]);
        let c = set(&[(8, 22), (100, 200)]);

        assert_eq!(
            RangeSet::union([&a, &b, &c]).ranges(),
            vec![0..=30, 100..=200]
        );
        assert_eq!(
            RangeSet::intersection([&a, &b, &c]).ranges(),
            vec![8..=10, 20..=22]
        );
        assert_eq!(
            RangeSet::difference(&a, [&b, &c]).ranges(),
            vec![0..=4, 26..=30]
        );

        let nothing: [&RangeSet; 0] = [];
        assert!(RangeSet::union(nothing).is_empty());
        assert!(RangeSet::intersection(nothing).is_full());
        assert_eq!(RangeSet::difference(&a, nothing), a);
    }

    #[test]
    fn test_operators() {
        let a = set(&[(0, 10)]);
        let b = set(&[(5, 15)]);

        assert_eq!((&a | &b).ranges(), vec![0..=15]);
        assert_eq!((&a & &b).ranges(), vec![5..=10]);
        assert_eq!((&a - &b).ranges(), vec![0..=4]);
        assert_eq!((&a ^ &b).ranges(), vec![0..=4, 11..=15]);
        assert_eq!((!&a).ranges(), vec![i64::MIN..=-1, 11..=i64::MAX]);
        assert!((&a ^ &a).is_empty());
        assert!((&a | &!&a).is_full());
    }

    #[test]
    fn test_assign_operators() {
        let mut s = set(&[(0, 10)]);
        s |= &set(&[(11, 20)]);
        assert_eq!(s.ranges(), vec![0..=20]);
        s &= &set(&[(5, 100)]);
        assert_eq!(s.ranges(), vec![5..=20]);
        s -= &set(&[(10, 12)]);
        assert_eq!(s.ranges(), vec![5..=9, 13..=20]);
        s -= &RangeSet::all();
        assert!(s.is_empty());
    }

    #[test]
    fn test_de_morgan() {
        let a = set(&[(i64::MIN, -100), (0, 0), (50, 60)]);
        let b = set(&[(-200, 55), (i64::MAX, i64::MAX)]);
        assert_eq!(!&(&a | &b), &!&a & &!&b);
        assert_eq!(!&(&a & &b), &!&a | &!&b);
    }
}
