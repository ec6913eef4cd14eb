use lazy_segtree::{
    AFFINE_MOD, Affine, LazySegmentTree, MapMonoid, RangeAffineRangeSum, RangeMinRangeAssign,
    RangeSumRangeAdd, Value,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op<F> {
    Apply(usize, usize, F),
    Query(usize, usize),
}

fn interval(n: usize) -> impl Strategy<Value = (usize, usize)> {
    (0..=n).prop_flat_map(move |l| (Just(l), l..=n))
}

fn affine() -> impl Strategy<Value = Affine> {
    (0..AFFINE_MOD, 0..AFFINE_MOD).prop_map(|(a, b)| Affine::new(a, b))
}

fn ops<F: Clone + std::fmt::Debug>(
    n: usize,
    map: impl Strategy<Value = F>,
) -> impl Strategy<Value = Vec<Op<F>>> {
    let op = prop_oneof![
        (interval(n), map).prop_map(|((l, r), f)| Op::Apply(l, r, f)),
        interval(n).prop_map(|(l, r)| Op::Query(l, r)),
    ];
    prop::collection::vec(op, 0..64)
}

fn affine_case() -> impl Strategy<Value = (Vec<u64>, Vec<Op<Affine>>)> {
    (0usize..40).prop_flat_map(|n| {
        (prop::collection::vec(0..AFFINE_MOD, n), ops(n, affine()))
    })
}

fn naive_apply<A: MapMonoid>(values: &mut [Value<A>], l: usize, r: usize, f: &A::Map) {
    for v in &mut values[l..r] {
        *v = A::mapping(v, &A::aggregate(f, 1));
    }
}

fn naive_fold<A: MapMonoid>(values: &[Value<A>], l: usize, r: usize) -> Value<A> {
    values[l..r]
        .iter()
        .fold(A::identity_element(), |acc, v| A::binary_operation(&acc, v))
}

mod oracle {
    use super::*;

    proptest! {
        #[test]
        fn affine_sum_matches_plain_array((init, ops) in affine_case()) {
            let n = init.len();
            let mut naive = init.clone();
            let mut seg = LazySegmentTree::<RangeAffineRangeSum>::from_vec(init).unwrap();

            for op in ops {
                match op {
                    Op::Apply(l, r, f) => {
                        naive_apply::<RangeAffineRangeSum>(&mut naive, l, r, &f);
                        seg.apply(l..r, f).unwrap();
                    }
                    Op::Query(l, r) => {
                        prop_assert_eq!(
                            seg.query(l..r).unwrap(),
                            naive_fold::<RangeAffineRangeSum>(&naive, l, r)
                        );
                    }
                }
                prop_assert_eq!(
                    seg.query(0..n).unwrap(),
                    naive_fold::<RangeAffineRangeSum>(&naive, 0, n)
                );
            }
            prop_assert_eq!(seg.to_vec(), naive);
        }

        #[test]
        fn min_assign_matches_plain_array(
            (init, ops) in (0usize..40).prop_flat_map(|n| (
                prop::collection::vec(-1_000i64..1_000, n),
                ops(n, prop::option::weighted(0.8, -1_000i64..1_000)),
            ))
        ) {
            let mut naive = init.clone();
            let mut seg = LazySegmentTree::<RangeMinRangeAssign>::from_vec(init).unwrap();

            for op in ops {
                match op {
                    Op::Apply(l, r, f) => {
                        naive_apply::<RangeMinRangeAssign>(&mut naive, l, r, &f);
                        seg.apply(l..r, f).unwrap();
                    }
                    Op::Query(l, r) => {
                        prop_assert_eq!(
                            seg.query(l..r).unwrap(),
                            naive_fold::<RangeMinRangeAssign>(&naive, l, r)
                        );
                    }
                }
            }
            prop_assert_eq!(seg.to_vec(), naive);
        }
    }
}

mod laws {
    use super::*;

    type History = (Vec<u64>, Vec<Op<Affine>>, (usize, usize));

    fn affine_tree_with_history() -> impl Strategy<Value = History> {
        affine_case().prop_flat_map(|(init, ops)| {
            let n = init.len();
            (Just(init), Just(ops), interval(n))
        })
    }

    fn build(init: Vec<u64>, ops: Vec<Op<Affine>>) -> LazySegmentTree<RangeAffineRangeSum> {
        let mut seg = LazySegmentTree::<RangeAffineRangeSum>::from_vec(init).unwrap();
        for op in ops {
            match op {
                Op::Apply(l, r, f) => seg.apply(l..r, f).unwrap(),
                Op::Query(l, r) => {
                    seg.query(l..r).unwrap();
                }
            }
        }
        seg
    }

    proptest! {
        #[test]
        fn repeated_query_is_stable((init, ops, (l, r)) in affine_tree_with_history()) {
            let mut seg = build(init, ops);
            let first = seg.query(l..r).unwrap();
            let second = seg.query(l..r).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn identity_operator_changes_nothing(
            (init, ops, (l, r)) in affine_tree_with_history()
        ) {
            let mut seg = build(init, ops);
            let before = seg.clone().to_vec();
            seg.apply(l..r, Affine::IDENTITY).unwrap();
            prop_assert_eq!(seg.to_vec(), before);
        }

        #[test]
        fn sequential_applies_equal_composed_apply(
            (init, ops, (l, r)) in affine_tree_with_history(),
            f in affine(),
            g in affine(),
        ) {
            let mut twice = build(init.clone(), ops.clone());
            twice.apply(l..r, f).unwrap();
            twice.apply(l..r, g).unwrap();

            let mut once = build(init, ops);
            once.apply(l..r, RangeAffineRangeSum::compose(&f, &g)).unwrap();

            prop_assert_eq!(twice.to_vec(), once.to_vec());
        }

        #[test]
        fn disjoint_apply_leaves_query_alone(
            (init, ops, (a, b)) in affine_tree_with_history(),
            split in any::<prop::sample::Index>(),
            f in affine(),
        ) {
            let mut seg = build(init, ops);
            // [a, mid) is queried, [mid, b) is updated
            let mid = a + split.index(b - a + 1);
            let before = seg.query(a..mid).unwrap();
            seg.apply(mid..b, f).unwrap();
            prop_assert_eq!(seg.query(a..mid).unwrap(), before);
        }

        #[test]
        fn empty_interval_queries_identity(
            (init, ops, (l, _)) in affine_tree_with_history(),
        ) {
            let mut seg = build(init, ops);
            prop_assert_eq!(seg.query(l..l).unwrap(), 0);
        }

        #[test]
        fn out_of_range_end_is_rejected(n in 0usize..64, extra in 1usize..8, add in -5i64..5) {
            let mut seg = LazySegmentTree::<RangeSumRangeAdd>::new(n).unwrap();
            prop_assert!(seg.apply(0..n + extra, add).is_err());
            prop_assert!(seg.query(..n + extra).is_err());
            prop_assert!(seg.get(n).is_err());
            prop_assert_eq!(seg.query(..).unwrap(), 0);
        }
    }
}
