use cursor_bst::Bst;
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of adds
/// and removes we have the same set of elements in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Bst<T>, set: &mut HashSet<T>)
where
    T: std::hash::Hash + Eq + Clone + Ord,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                let len = bst.len();
                let added = bst.add(x.clone());
                assert_eq!(added, set.insert(x.clone()));
                assert_eq!(bst.len(), if added { len + 1 } else { len });
            }
            Op::Remove(x) => {
                let len = bst.len();
                let removed = bst.remove(x);
                assert_eq!(removed.is_some(), set.remove(x));
                assert_eq!(bst.len(), if removed.is_some() { len - 1 } else { len });
                assert!(!bst.contains(x));
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut bst = Bst::new();
    let mut set = HashSet::new();

    do_ops(&ops, &mut bst, &mut set);
    bst.len() == set.len() && set.iter().all(|x| bst.contains(x))
}

#[quickcheck]
fn balanced_build_contains_exactly_its_input(xs: Vec<i8>) -> bool {
    let mut sorted = xs;
    sorted.sort_unstable();
    sorted.dedup();
    let present: HashSet<_> = sorted.iter().copied().collect();
    let bst = Bst::from_sorted(sorted);

    bst.len() == present.len()
        && (i8::MIN..=i8::MAX).all(|x| bst.contains(&x) == present.contains(&x))
}

#[quickcheck]
fn balanced_build_is_as_short_as_possible(len: u16) -> bool {
    let len = usize::from(len % 2048);
    let bst = Bst::from_sorted((0..len).collect());

    // ceil(log2(len + 1))
    bst.height() == (usize::BITS - len.leading_zeros()) as usize
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removals: Vec<i8>) -> bool {
    let mut bst: Bst<_> = xs.iter().copied().collect();
    for x in &removals {
        bst.remove(x);
    }

    let removed: HashSet<_> = removals.iter().collect();
    let still_present: HashSet<_> = xs.iter().filter(|x| !removed.contains(x)).collect();

    removals.iter().all(|x| !bst.contains(x))
        && still_present.iter().all(|x| bst.get(x) == Ok(*x))
        && bst.len() == still_present.len()
}

#[quickcheck]
fn interval_search_matches_a_scan(xs: Vec<i16>, min: i16, max: i16) -> bool {
    let mut sorted = xs;
    sorted.sort_unstable();
    sorted.dedup();
    let bst = Bst::from_sorted(sorted.clone());

    let mut found: Vec<i16> = bst.interval_search(&min, &max).into_iter().copied().collect();
    found.sort_unstable();

    let expected: Vec<i16> = sorted
        .into_iter()
        .filter(|x| min <= *x && *x <= max)
        .collect();
    found == expected
}

#[quickcheck]
fn pred_succ_on_an_incrementally_built_tree(xs: Vec<i8>, target: i8) -> bool {
    let bst: Bst<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();
    sorted.dedup();

    let found = bst.pred_succ(&target);
    let pred = sorted.iter().filter(|x| **x < target).last();
    let element = sorted.iter().find(|x| **x == target);
    let succ = sorted.iter().find(|x| **x > target);

    found.pred == pred && found.element == element && found.succ == succ
}

#[quickcheck]
fn rebalance_keeps_order(xs: Vec<i8>) -> bool {
    let mut bst: Bst<_> = xs.iter().copied().collect();
    bst.rebalance();

    let mut sorted = xs;
    sorted.sort_unstable();
    sorted.dedup();

    bst.iter().eq(sorted.iter())
        && bst.first() == sorted.first()
        && bst.last() == sorted.last()
        && bst.len() == sorted.len()
}

#[test]
fn pred_succ_over_a_contiguous_range() {
    let n: i32 = 500;
    let bst = Bst::from_sorted((0..n).collect());

    for k in -3..n + 3 {
        let found = bst.pred_succ(&k);
        let expected = match k {
            k if k < 0 => (None, None, Some(0)),
            k if k >= n => (Some(n - 1), None, None),
            0 => (None, Some(0), Some(1)),
            k if k == n - 1 => (Some(k - 1), Some(k), None),
            k => (Some(k - 1), Some(k), Some(k + 1)),
        };
        assert_eq!(
            (
                found.pred.copied(),
                found.element.copied(),
                found.succ.copied()
            ),
            expected,
            "{}",
            k
        );
    }
    assert_eq!(bst.interval_search(&(n / 2), &(n / 2)), vec![&(n / 2)]);
    assert!(bst.interval_search(&(n + 1), &(n + 10)).is_empty());
}
