use std::collections::BTreeSet;

use crate::{ErrorKind, RangeSet, Run};

fn ranges_of(set: &RangeSet) -> Vec<(i64, i64)> {
    set.runs().map(|r| (r.first, r.last)).collect()
}

#[test]
fn test_remove_splits_run() {
    let mut set = RangeSet::all_between_inclusive(1, 10);
    assert!(set.remove_inclusive_range(3, 5));
    assert_eq!(ranges_of(&set), vec![(1, 2), (6, 10)]);
    assert_eq!(set.range_count(), 2);
    assert_eq!(set.len(), 7);
    assert_eq!(set.to_string(), "[[1, 2], [6, 10]]");
}

#[test]
fn test_invert_empty_is_full_domain() {
    let mut set = RangeSet::none();
    set.invert();
    assert_eq!(ranges_of(&set), vec![(i64::MIN, i64::MAX)]);
    assert!(set.is_full());
    assert_eq!(set.len(), u64::MAX);
    assert_eq!(set.exact_size(), 1u128 << 64);

    set.invert();
    assert!(set.is_empty());
    assert_eq!(set.exact_size(), 0);
}

#[test]
fn test_all_except() {
    let set = RangeSet::all_except(5);
    assert!(!set.contains(5));
    assert!(set.contains(4));
    assert!(set.contains(6));
    assert!(set.contains(i64::MIN));
    assert!(set.contains(i64::MAX));
    assert_eq!(set.exact_size(), (1u128 << 64) - 1);

    let edge = RangeSet::all_except(i64::MAX);
    assert_eq!(ranges_of(&edge), vec![(i64::MIN, i64::MAX - 1)]);
    let edge = RangeSet::all_except(i64::MIN);
    assert_eq!(ranges_of(&edge), vec![(i64::MIN + 1, i64::MAX)]);
}

#[test]
fn test_union_coalesces_adjacent() {
    let a = RangeSet::all_between_inclusive(0, 4);
    let b = RangeSet::all_between_inclusive(5, 9);
    let u = RangeSet::union([&a, &b]);
    assert_eq!(ranges_of(&u), vec![(0, 9)]);
    assert_eq!(u.range_count(), 1);
}

#[test]
fn test_construction() {
    assert!(RangeSet::default().is_empty());
    assert_eq!(RangeSet::of(7).ranges(), vec![7..=7]);
    assert_eq!(
        RangeSet::of_discrete([4, 2, 3, 3, 9, i64::MAX]).ranges(),
        vec![2..=4, 9..=9, i64::MAX..=i64::MAX]
    );
    assert!(RangeSet::all_between_inclusive(5, 4).is_empty());
    assert_eq!(RangeSet::all_between(0..10).ranges(), vec![0..=9]);
    assert!(RangeSet::all_between(3..3).is_empty());
    assert_eq!(
        RangeSet::from_ranges([0..5, 5..7, 20..21]).ranges(),
        vec![0..=6, 20..=20]
    );
    assert_eq!(
        RangeSet::from_inclusive_ranges([(10, 20), (0, 9), (30, 25)]).ranges(),
        vec![0..=20]
    );
}

#[test]
fn test_exclusive_end_sentinel() {
    // An exclusive end of MIN reaches through MAX.
    let set = RangeSet::all_between(100..i64::MIN);
    assert_eq!(ranges_of(&set), vec![(100, i64::MAX)]);
    assert!(RangeSet::all().head_set(i64::MIN).contains(i64::MAX));
    assert_eq!(RangeSet::all().head_set(i64::MIN).exact_size(), 1u128 << 64);

    let mut set = RangeSet::all();
    assert!(set.remove_range(0..i64::MIN));
    assert_eq!(ranges_of(&set), vec![(i64::MIN, -1)]);
    assert!(set.add_range(i64::MAX..));
    assert_eq!(set.last(), Some(i64::MAX));
}

#[test]
fn test_try_from_pairs() {
    let set = RangeSet::try_from_pairs([&[1, 3][..], &[5, 4][..], &[4, 4][..]]).unwrap();
    assert_eq!(set.ranges(), vec![1..=4]);

    let err = RangeSet::try_from_pairs([&[1, 3][..], &[7][..]]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    let err = RangeSet::try_from_pairs([&[1, 2, 3][..]]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
}

#[test]
fn test_contains_family() {
    let set = RangeSet::from_inclusive_ranges([(0, 10), (20, 30)]);
    assert!(set.contains_inclusive_range(2, 8));
    assert!(!set.contains_inclusive_range(5, 25));
    assert!(set.contains_inclusive_range(9, 3));
    assert!(set.contains_range(20..31));
    assert!(!set.contains_range(20..=31));

    assert!(set.contains_any_inclusive(5, 25));
    assert!(!set.contains_any_inclusive(11, 19));
    assert!(!set.contains_any_inclusive(9, 3));
    assert!(!set.contains_any(..0));
    assert!(set.contains_any(..=0));
    assert!(!set.contains_any(31..));

    for v in -5..40 {
        assert_eq!(set.contains(v), set.contains_inclusive_range(v, v), "{v}");
    }
}

#[test]
fn test_add_merges_neighbours() {
    let mut set = RangeSet::from_inclusive_ranges([(0, 4), (6, 10)]);
    assert!(!set.add(3));
    assert!(set.add(5));
    assert_eq!(ranges_of(&set), vec![(0, 10)]);
    assert!(set.add(i64::MAX));
    assert!(set.add(i64::MAX - 1));
    assert!(set.add(i64::MIN));
    assert_eq!(
        ranges_of(&set),
        vec![(i64::MIN, i64::MIN), (0, 10), (i64::MAX - 1, i64::MAX)]
    );
    set.check_invariants();
}

#[test]
fn test_add_range_absorbs_window() {
    let mut set = RangeSet::from_inclusive_ranges([(0, 1), (3, 4), (6, 7), (20, 30)]);
    assert!(set.add_inclusive_range(2, 8));
    assert_eq!(ranges_of(&set), vec![(0, 8), (20, 30)]);
    assert!(!set.add_inclusive_range(21, 29));
    assert!(!set.add_inclusive_range(50, 40));
    assert!(set.add_inclusive_range(9, 19));
    assert_eq!(ranges_of(&set), vec![(0, 30)]);
}

#[test]
fn test_retain() {
    let mut set = RangeSet::from_inclusive_ranges([(0, 10), (20, 30), (40, 50)]);
    assert!(set.retain_inclusive_range(5, 45));
    assert_eq!(ranges_of(&set), vec![(5, 10), (20, 30), (40, 45)]);
    assert!(!set.retain_inclusive_range(5, 45));
    assert!(set.retain_range(25..));
    assert_eq!(ranges_of(&set), vec![(25, 30), (40, 45)]);
    assert!(set.retain_inclusive_range(1, 0));
    assert!(set.is_empty());
}

#[test]
fn test_add_then_remove_restores() {
    let original = RangeSet::from_inclusive_ranges([(0, 10), (20, 30)]);
    let mut set = original.clone();
    assert!(set.add_inclusive_range(12, 18));
    assert!(set.remove_inclusive_range(12, 18));
    assert_eq!(set, original);
}

#[test]
fn test_complement_properties() {
    let sets = [
        RangeSet::none(),
        RangeSet::all(),
        RangeSet::of(0),
        RangeSet::of(i64::MIN),
        RangeSet::of(i64::MAX),
        RangeSet::from_inclusive_ranges([(i64::MIN, -10), (0, 0), (10, i64::MAX)]),
        RangeSet::from_inclusive_ranges([(-100, -50), (7, 9), (1000, 2000)]),
    ];
    for set in &sets {
        let complement = set.complement();
        complement.check_invariants();
        assert_eq!(complement.complement(), *set);
        assert_eq!(set.exact_size() + complement.exact_size(), 1u128 << 64);
        assert!(set.is_disjoint(&complement));
        assert!((set | &complement).is_full());
    }
}

#[test]
fn test_navigation() {
    let set = RangeSet::from_inclusive_ranges([(0, 4), (10, 14)]);
    assert_eq!(set.first(), Some(0));
    assert_eq!(set.last(), Some(14));
    assert_eq!(set.ceiling(5), Some(10));
    assert_eq!(set.ceiling(3), Some(3));
    assert_eq!(set.ceiling(15), None);
    assert_eq!(set.floor(9), Some(4));
    assert_eq!(set.floor(-1), None);
    assert_eq!(set.higher(4), Some(10));
    assert_eq!(set.lower(10), Some(4));

    let edge = RangeSet::of_discrete([i64::MIN, i64::MAX]);
    assert_eq!(edge.higher(i64::MAX), None);
    assert_eq!(edge.lower(i64::MIN), None);
    assert_eq!(edge.higher(i64::MIN), Some(i64::MAX));
    assert_eq!(edge.lower(i64::MAX), Some(i64::MIN));

    let mut set = set;
    assert_eq!(set.pop_first(), Some(0));
    assert_eq!(set.pop_last(), Some(14));
    assert_eq!(ranges_of(&set), vec![(1, 4), (10, 13)]);
    let mut empty = RangeSet::none();
    assert_eq!(empty.pop_first(), None);
    assert_eq!(empty.pop_last(), None);
}

#[test]
fn test_subset_and_disjoint() {
    let a = RangeSet::from_inclusive_ranges([(0, 10), (20, 30)]);
    let b = RangeSet::from_inclusive_ranges([(2, 5), (25, 25)]);
    let c = RangeSet::from_inclusive_ranges([(11, 19), (31, 40)]);
    assert!(b.is_subset(&a));
    assert!(a.is_superset(&b));
    assert!(!a.is_subset(&b));
    assert!(a.is_disjoint(&c));
    assert!(!a.is_disjoint(&b));
    assert!(RangeSet::none().is_subset(&c));
    assert!(a.is_subset(&RangeSet::all()));
}

#[test]
fn test_bulk_value_operations() {
    let mut set = RangeSet::all_between_inclusive(0, 9);
    assert!(set.remove_values([2, 3, 100]));
    assert!(!set.remove_values([100]));
    assert!(set.add_values([2, 20]));
    assert_eq!(ranges_of(&set), vec![(0, 2), (4, 9), (20, 20)]);
    assert!(set.retain_values([0, 1, 5, 20, 21]));
    assert_eq!(ranges_of(&set), vec![(0, 1), (5, 5), (20, 20)]);

    let mut other = RangeSet::all_between_inclusive(1, 5);
    assert!(other.retain_all(&set));
    assert_eq!(ranges_of(&other), vec![(1, 1), (5, 5)]);
    assert!(other.retain_all(&RangeSet::none()));
    assert!(other.is_empty());
}

#[test]
fn test_bulk_run_operations() {
    let mut set = RangeSet::all_between_inclusive(0, 30);
    assert!(set.remove_runs([Run::new(5, 9), Run::new(20, 24)]));
    assert!(!set.remove_runs([Run::new(6, 8)]));
    assert_eq!(ranges_of(&set), vec![(0, 4), (10, 19), (25, 30)]);

    assert!(set.retain_runs([Run::new(3, 12), Run::new(28, 40)]));
    assert_eq!(ranges_of(&set), vec![(3, 4), (10, 12), (28, 30)]);
    assert!(!set.retain_runs([Run::new(0, 12), Run::new(28, 30)]));

    assert!(set.add_runs([Run::new(5, 9), Run::new(13, 27)]));
    assert_eq!(ranges_of(&set), vec![(3, 30)]);
    assert!(set.retain_runs(Vec::new()));
    assert!(set.is_empty());
}

#[test]
fn test_iteration() {
    let set = RangeSet::from_inclusive_ranges([(0, 2), (10, 11)]);
    assert_eq!(set.values().collect::<Vec<_>>(), vec![0, 1, 2, 10, 11]);
    assert_eq!((&set).into_iter().rev().next(), Some(11));
    let mut seen = Vec::new();
    set.for_each(|v| seen.push(v));
    assert_eq!(seen, set.to_vec().unwrap());
    assert_eq!(
        set.runs().collect::<Vec<_>>(),
        vec![Run::new(0, 2), Run::new(10, 11)]
    );
}

#[test]
fn test_to_vec_capacity_overflow() {
    let err = RangeSet::all().to_vec().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::CapacityOverflow { .. }));
    let err = RangeSet::all_between(0..).to_vec().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::CapacityOverflow { .. }));
}

#[test]
fn test_cursor_removes_filtered_values() {
    let mut set = RangeSet::all_between_inclusive(0, 20);
    let mut cursor = set.cursor();
    assert!(matches!(
        cursor.remove().unwrap_err().kind(),
        ErrorKind::IllegalState { .. }
    ));
    while let Some(v) = cursor.next() {
        if v % 3 == 0 {
            cursor.remove().unwrap();
        }
    }
    assert_eq!(
        set.values().collect::<Vec<_>>(),
        (0..=20).filter(|v| v % 3 != 0).collect::<Vec<_>>()
    );
    set.check_invariants();
}

/// Applies the same random operations to a `RangeSet` and a `BTreeSet` model
/// over a 200-value universe anchored at `base`.
fn run_differential(base: i64, seed: u64, steps: usize) {
    const UNIVERSE: i64 = 200;
    let top = base + (UNIVERSE - 1);
    fastrand::seed(seed);
    let mut set = RangeSet::none();
    let mut model = BTreeSet::new();

    let value = || base + fastrand::i64(0..UNIVERSE);
    for step in 0..steps {
        let (lo, hi) = (value(), value());
        match fastrand::u8(0..7) {
            0 => assert_eq!(set.add(lo), model.insert(lo), "step {step}"),
            1 => assert_eq!(set.remove(lo), model.remove(&lo), "step {step}"),
            2 => {
                let mut grew = false;
                for v in lo..=hi {
                    grew |= model.insert(v);
                }
                assert_eq!(set.add_inclusive_range(lo, hi), grew, "step {step}");
            }
            3 => {
                let mut shrank = false;
                for v in lo..=hi {
                    shrank |= model.remove(&v);
                }
                assert_eq!(set.remove_inclusive_range(lo, hi), shrank, "step {step}");
            }
            4 => {
                let before = model.len();
                model.retain(|&v| v >= lo && v <= hi);
                assert_eq!(
                    set.retain_inclusive_range(lo, hi),
                    model.len() != before,
                    "step {step}"
                );
            }
            5 => {
                set.sub_set_mut(base..=top).invert();
                model = (base..=top)
                    .filter(|v| !model.contains(v))
                    .collect();
            }
            _ => {
                let present = set.contains(lo);
                assert_eq!(present, model.contains(&lo), "step {step}");
                assert_eq!(
                    set.contains_any_inclusive(lo, hi),
                    model.range(lo..=hi.max(lo)).next().is_some() && lo <= hi,
                    "step {step}"
                );
                let covered = set.contains_inclusive_range(lo, hi);
                assert_eq!(
                    covered,
                    (lo..=hi).all(|v| model.contains(&v)),
                    "step {step}"
                );
                if covered && lo <= hi {
                    assert!(set.contains_any_inclusive(lo, hi), "step {step}");
                }
                assert_eq!(set.ceiling(lo), model.range(lo..).next().copied());
                assert_eq!(set.floor(lo), model.range(..=lo).next_back().copied());
            }
        }

        set.check_invariants();
        assert_eq!(set.exact_size(), model.len() as u128, "step {step}");
        assert_eq!(set.first(), model.first().copied());
        assert_eq!(set.last(), model.last().copied());
        if step % 16 == 0 {
            assert!(set.values().eq(model.iter().copied()), "step {step}");
            assert!(set.values().rev().eq(model.iter().rev().copied()));
        }
    }
    assert!(set.values().eq(model.iter().copied()));
}

#[test]
fn test_differential_around_zero() {
    run_differential(-100, 81726354, 4000);
}

#[test]
fn test_differential_at_min() {
    run_differential(i64::MIN, 5510923, 4000);
}

#[test]
fn test_differential_at_max() {
    run_differential(i64::MAX - 199, 99120034, 4000);
}
