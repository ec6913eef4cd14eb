use std::ops::{Bound, RangeBounds};

use crate::error::{Error, Result};

/// Resolve `range` against a sequence of length `len` into `[start, end)`.
///
/// `end > len` is an error; `start >= end` is returned as is and means an
/// empty range.
pub(crate) fn normalize_range<R: RangeBounds<usize>>(
    range: &R,
    len: usize,
) -> Result<(usize, usize)> {
    let overflow = Error::IndexOutOfRange {
        index: usize::MAX,
        len,
    };
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.checked_add(1).ok_or(overflow)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.checked_add(1).ok_or(overflow)?,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };

    if end > len {
        return Err(Error::IndexOutOfRange { index: end, len });
    }

    Ok((start, end))
}

/// Leaf count backing `len` elements: the least power of two `>= len`, at
/// least 1. `None` if the `2 * capacity` node arrays cannot be indexed.
#[inline]
pub(crate) fn leaf_capacity(len: usize) -> Option<usize> {
    let capacity = len.max(1).checked_next_power_of_two()?;
    capacity.checked_mul(2)?;
    Some(capacity)
}

#[inline(always)]
pub(crate) fn floor_log2_nonzero(x: usize) -> u32 {
    debug_assert!(x > 0);
    usize::BITS - 1 - x.leading_zeros()
}
