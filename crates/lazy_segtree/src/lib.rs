//! Segment tree with lazy propagation.
//!
//! [`LazySegmentTree`] answers range folds and applies range updates in
//! `O(log n)` given a value [`Monoid`] and a [`MapMonoid`] of operators acting
//! on it. Ranges are half-open and accept any `RangeBounds<usize>`.
//!
//! ```
//! use lazy_segtree::{LazySegmentTree, RangeSumRangeAdd};
//!
//! let mut seg = LazySegmentTree::<RangeSumRangeAdd>::new(10)?;
//! seg.apply(0..4, 2)?;
//! seg.apply(4.., 5)?;
//! assert_eq!(seg.query(..)?, 38);
//! assert_eq!(seg.query(3..8)?, 22);
//! # Ok::<(), lazy_segtree::Error>(())
//! ```

pub mod algebra;
pub mod policy;

mod error;
mod tree;
mod util;

pub use algebra::{MapMonoid, Monoid};
pub use error::{Error, Result};
pub use policy::{
    AFFINE_MOD, Affine, Min, ModSum, RangeAffineRangeSum, RangeMinRangeAdd, RangeMinRangeAssign,
    RangeSumRangeAdd, RangeSumRangeAssign, Sum,
};
pub use tree::{LazySegmentTree, Value};
