use std::fmt;
use std::ops::RangeBounds;

use crate::algebra::{MapMonoid, Monoid};
use crate::error::{Error, Result};
use crate::util::{floor_log2_nonzero, leaf_capacity, normalize_range};

pub type Value<A> = <<A as MapMonoid>::Monoid as Monoid>::Value;

/// Segment tree with lazy propagation over the operator policy `A`.
///
/// Nodes are stored heap-style from index 1: node `i` covers a power-of-two
/// width interval and has children `2i` and `2i + 1`. Leaves occupy
/// `capacity..2 * capacity`; leaves past `len` are padding holding the
/// identity and are never reachable through the public API.
///
/// `pending[i]` is an operator owed to node `i` and everything below it.
/// Every method that walks a path resolves the debts along it first, so all
/// methods take `&mut self`, including the read-only ones.
pub struct LazySegmentTree<A: MapMonoid> {
    len: usize,
    capacity: usize,
    values: Vec<Value<A>>,
    pending: Vec<A::Map>,
}

impl<A: MapMonoid> LazySegmentTree<A> {
    /// Build a tree of `len` identity elements.
    pub fn new(len: usize) -> Result<Self> {
        let capacity = leaf_capacity(len).ok_or(Error::CapacityOverflow { requested: len })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(len, capacity, "built lazy segment tree");

        Ok(Self {
            len,
            capacity,
            values: vec![A::identity_element(); capacity << 1],
            pending: vec![A::identity_map(); capacity << 1],
        })
    }

    /// Build a tree of `len` elements seeded from `values`.
    ///
    /// Fails with [`Error::InvalidSize`] unless `values.len() == len`.
    pub fn with_values(len: usize, values: Vec<Value<A>>) -> Result<Self> {
        if values.len() != len {
            return Err(Error::InvalidSize {
                expected: len,
                actual: values.len(),
            });
        }

        let mut tree = Self::new(len)?;
        let capacity = tree.capacity;
        for (slot, value) in tree.values[capacity..].iter_mut().zip(values) {
            *slot = value;
        }
        for i in (1..capacity).rev() {
            tree.values[i] = A::binary_operation(&tree.values[2 * i], &tree.values[2 * i + 1]);
        }
        Ok(tree)
    }

    /// Build a tree holding exactly `values`.
    pub fn from_vec(values: Vec<Value<A>>) -> Result<Self> {
        Self::with_values(values.len(), values)
    }

    /// Number of logical elements, excluding padding.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resolve the debt of node `idx`, which covers `width` leaves.
    ///
    /// The node's own value absorbs the operator; internal nodes forward it to
    /// their children's debts without touching the children's values.
    #[inline]
    fn push_down(&mut self, idx: usize, width: usize) {
        if self.pending[idx] == A::identity_map() {
            return;
        }
        let f = std::mem::replace(&mut self.pending[idx], A::identity_map());
        if idx < self.capacity {
            for child in [2 * idx, 2 * idx + 1] {
                self.pending[child] = A::compose(&self.pending[child], &f);
            }
        }
        self.values[idx] = A::mapping(&self.values[idx], &A::aggregate(&f, width));
    }

    fn bounds<R: RangeBounds<usize>>(&self, range: &R) -> Result<(usize, usize)> {
        let bounds = normalize_range(range, self.len);
        #[cfg(feature = "tracing")]
        if let Err(err) = &bounds {
            tracing::debug!(%err, len = self.len, "rejected range");
        }
        bounds
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!(index, len = self.len, "rejected index");
            Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Apply `f` to every element in `range`.
    ///
    /// An empty range (`end <= start`) is a no-op and leaves the tree
    /// untouched. Fails with [`Error::IndexOutOfRange`] if the range ends past
    /// `len`.
    pub fn apply<R: RangeBounds<usize>>(&mut self, range: R, f: A::Map) -> Result<()> {
        let (start, end) = self.bounds(&range)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("apply", start, end).entered();

        if start < end {
            self.apply_inner(start, end, &f, 0, self.capacity, 1);
        }
        Ok(())
    }

    fn apply_inner(
        &mut self,
        left: usize,
        right: usize,
        f: &A::Map,
        begin: usize,
        end: usize,
        idx: usize,
    ) {
        self.push_down(idx, end - begin);
        if left <= begin && end <= right {
            self.pending[idx] = A::compose(&self.pending[idx], f);
            self.push_down(idx, end - begin);
        } else if left < end && begin < right {
            let mid = (begin + end) / 2;
            self.apply_inner(left, right, f, begin, mid, 2 * idx);
            self.apply_inner(left, right, f, mid, end, 2 * idx + 1);
            self.values[idx] =
                A::binary_operation(&self.values[2 * idx], &self.values[2 * idx + 1]);
        }
    }

    /// Fold `range` left to right. An empty range yields the identity.
    pub fn query<R: RangeBounds<usize>>(&mut self, range: R) -> Result<Value<A>> {
        let (start, end) = self.bounds(&range)?;

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("query", start, end).entered();

        if start >= end {
            return Ok(A::identity_element());
        }
        Ok(self.query_inner(start, end, 0, self.capacity, 1))
    }

    fn query_inner(
        &mut self,
        left: usize,
        right: usize,
        begin: usize,
        end: usize,
        idx: usize,
    ) -> Value<A> {
        self.push_down(idx, end - begin);
        if end <= left || right <= begin {
            A::identity_element()
        } else if left <= begin && end <= right {
            self.values[idx].clone()
        } else {
            let mid = (begin + end) / 2;
            let l_val = self.query_inner(left, right, begin, mid, 2 * idx);
            let r_val = self.query_inner(left, right, mid, end, 2 * idx + 1);
            A::binary_operation(&l_val, &r_val)
        }
    }

    /// Resolve every debt on the root-to-leaf path of `index`.
    fn push_path(&mut self, index: usize) -> usize {
        let leaf = self.capacity + index;
        let height = self.capacity.trailing_zeros();
        for k in (0..=height).rev() {
            self.push_down(leaf >> k, 1 << k);
        }
        leaf
    }

    pub fn get(&mut self, index: usize) -> Result<Value<A>> {
        self.check_index(index)?;
        let leaf = self.push_path(index);
        Ok(self.values[leaf].clone())
    }

    /// Overwrite the element at `index`, discarding anything applied to it.
    pub fn set(&mut self, index: usize, value: Value<A>) -> Result<()> {
        self.check_index(index)?;
        let leaf = self.push_path(index);
        self.values[leaf] = value;

        let height = self.capacity.trailing_zeros();
        for k in 1..=height {
            // the sibling may still owe what its parent forwarded on the way down
            let sibling = (leaf >> (k - 1)) ^ 1;
            self.push_down(sibling, 1 << (k - 1));
            let node = leaf >> k;
            self.values[node] =
                A::binary_operation(&self.values[2 * node], &self.values[2 * node + 1]);
        }
        Ok(())
    }

    /// Largest `r` such that `pred(query(start..r))` holds, together with
    /// that fold.
    ///
    /// `pred` must be monotone (true on a prefix of the extensions) and true
    /// on the identity. Returns `len` when the whole suffix satisfies it.
    pub fn max_right<P>(&mut self, start: usize, pred: P) -> Result<(Value<A>, usize)>
    where
        P: Fn(&Value<A>) -> bool,
    {
        if start > self.len {
            return Err(Error::IndexOutOfRange {
                index: start,
                len: self.len,
            });
        }
        debug_assert!(pred(&A::identity_element()));

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("max_right", start).entered();

        if start == self.len {
            return Ok((A::identity_element(), self.len));
        }
        let mut acc = A::identity_element();
        let r = self.max_right_inner(1, 0, self.capacity, start, &pred, &mut acc);
        Ok((acc, r.min(self.len)))
    }

    fn max_right_inner<P>(
        &mut self,
        idx: usize,
        begin: usize,
        end: usize,
        start: usize,
        pred: &P,
        acc: &mut Value<A>,
    ) -> usize
    where
        P: Fn(&Value<A>) -> bool,
    {
        if end <= start {
            return end;
        }
        self.push_down(idx, end - begin);

        if start <= begin {
            let merged = A::binary_operation(acc, &self.values[idx]);
            if pred(&merged) {
                *acc = merged;
                return end;
            }
        }
        if end - begin == 1 {
            return begin;
        }

        let mid = (begin + end) / 2;
        let r = self.max_right_inner(2 * idx, begin, mid, start, pred, acc);
        if r != mid {
            return r;
        }
        self.max_right_inner(2 * idx + 1, mid, end, start, pred, acc)
    }

    /// Smallest `l` such that `pred(query(l..end))` holds, together with
    /// that fold.
    ///
    /// Same contract as [`Self::max_right`], mirrored.
    pub fn min_left<P>(&mut self, end: usize, pred: P) -> Result<(Value<A>, usize)>
    where
        P: Fn(&Value<A>) -> bool,
    {
        if end > self.len {
            return Err(Error::IndexOutOfRange {
                index: end,
                len: self.len,
            });
        }
        debug_assert!(pred(&A::identity_element()));

        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("min_left", end).entered();

        if end == 0 {
            return Ok((A::identity_element(), 0));
        }
        let mut acc = A::identity_element();
        let l = self.min_left_inner(1, 0, self.capacity, end, &pred, &mut acc);
        Ok((acc, l))
    }

    fn min_left_inner<P>(
        &mut self,
        idx: usize,
        begin: usize,
        end: usize,
        stop: usize,
        pred: &P,
        acc: &mut Value<A>,
    ) -> usize
    where
        P: Fn(&Value<A>) -> bool,
    {
        if stop <= begin {
            return begin;
        }
        self.push_down(idx, end - begin);

        if end <= stop {
            let merged = A::binary_operation(&self.values[idx], acc);
            if pred(&merged) {
                *acc = merged;
                return begin;
            }
        }
        if end - begin == 1 {
            return end;
        }

        let mid = (begin + end) / 2;
        let l = self.min_left_inner(2 * idx + 1, mid, end, stop, pred, acc);
        if l != mid {
            return l;
        }
        self.min_left_inner(2 * idx, begin, mid, stop, pred, acc)
    }

    /// Every element in order. Resolves all outstanding debts.
    pub fn to_vec(&mut self) -> Vec<Value<A>> {
        for idx in 1..(self.capacity << 1) {
            let width = self.capacity >> floor_log2_nonzero(idx);
            self.push_down(idx, width);
        }
        self.values[self.capacity..self.capacity + self.len].to_vec()
    }
}

impl<A: MapMonoid> Clone for LazySegmentTree<A> {
    fn clone(&self) -> Self {
        Self {
            len: self.len,
            capacity: self.capacity,
            values: self.values.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<A> fmt::Debug for LazySegmentTree<A>
where
    A: MapMonoid,
    Value<A>: fmt::Debug,
    A::Map: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySegmentTree")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("values", &self.values)
            .field("pending", &self.pending)
            .finish()
    }
}
