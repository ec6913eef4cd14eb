//! Ready-made monoids and operator policies.

use crate::algebra::{MapMonoid, Monoid};

pub const AFFINE_MOD: u64 = 998_244_353;

#[derive(Clone, Copy, Debug)]
pub enum Sum {}

impl Monoid for Sum {
    type Value = i64;

    #[inline(always)]
    fn identity() -> Self::Value {
        0
    }

    #[inline(always)]
    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        left.wrapping_add(*right)
    }
}

/// Minimum over `i64`, with `i64::MAX` standing in for +infinity.
///
/// The sentinel is not a separate value: an element equal to `i64::MAX` is
/// indistinguishable from an empty slot.
#[derive(Clone, Copy, Debug)]
pub enum Min {}

impl Monoid for Min {
    type Value = i64;

    #[inline(always)]
    fn identity() -> Self::Value {
        i64::MAX
    }

    #[inline(always)]
    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        *left.min(right)
    }
}

/// Sum modulo [`AFFINE_MOD`]. Values need not be reduced.
#[derive(Clone, Copy, Debug)]
pub enum ModSum {}

impl Monoid for ModSum {
    type Value = u64;

    #[inline(always)]
    fn identity() -> Self::Value {
        0
    }

    #[inline(always)]
    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value {
        (left % AFFINE_MOD + right % AFFINE_MOD) % AFFINE_MOD
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeSumRangeAdd {}

impl MapMonoid for RangeSumRangeAdd {
    type Monoid = Sum;
    type Map = i64;

    #[inline(always)]
    fn identity_map() -> Self::Map {
        0
    }

    #[inline(always)]
    fn compose(first: &Self::Map, second: &Self::Map) -> Self::Map {
        first.wrapping_add(*second)
    }

    #[inline(always)]
    fn aggregate(f: &Self::Map, len: usize) -> Self::Map {
        f.wrapping_mul(len as i64)
    }

    #[inline(always)]
    fn mapping(x: &i64, f: &Self::Map) -> i64 {
        x.wrapping_add(*f)
    }
}

/// Range assignment over sums. `None` is the identity; `Some(v)` overwrites
/// every covered element with `v`.
#[derive(Clone, Copy, Debug)]
pub enum RangeSumRangeAssign {}

impl MapMonoid for RangeSumRangeAssign {
    type Monoid = Sum;
    type Map = Option<i64>;

    #[inline(always)]
    fn identity_map() -> Self::Map {
        None
    }

    #[inline(always)]
    fn compose(first: &Self::Map, second: &Self::Map) -> Self::Map {
        second.or(*first)
    }

    #[inline(always)]
    fn aggregate(f: &Self::Map, len: usize) -> Self::Map {
        f.map(|v| v.wrapping_mul(len as i64))
    }

    #[inline(always)]
    fn mapping(x: &i64, f: &Self::Map) -> i64 {
        f.unwrap_or(*x)
    }
}

/// Range add over [`Min`]. Elements equal to `i64::MAX` are treated as
/// +infinity and absorb every addition, so seed values must stay below it.
#[derive(Clone, Copy, Debug)]
pub enum RangeMinRangeAdd {}

impl MapMonoid for RangeMinRangeAdd {
    type Monoid = Min;
    type Map = i64;

    #[inline(always)]
    fn identity_map() -> Self::Map {
        0
    }

    #[inline(always)]
    fn compose(first: &Self::Map, second: &Self::Map) -> Self::Map {
        first.wrapping_add(*second)
    }

    #[inline(always)]
    fn aggregate(f: &Self::Map, _len: usize) -> Self::Map {
        *f
    }

    #[inline(always)]
    fn mapping(x: &i64, f: &Self::Map) -> i64 {
        // +infinity absorbs additions
        if *x == i64::MAX {
            *x
        } else {
            x.wrapping_add(*f)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeMinRangeAssign {}

impl MapMonoid for RangeMinRangeAssign {
    type Monoid = Min;
    type Map = Option<i64>;

    #[inline(always)]
    fn identity_map() -> Self::Map {
        None
    }

    #[inline(always)]
    fn compose(first: &Self::Map, second: &Self::Map) -> Self::Map {
        second.or(*first)
    }

    #[inline(always)]
    fn aggregate(f: &Self::Map, _len: usize) -> Self::Map {
        *f
    }

    #[inline(always)]
    fn mapping(x: &i64, f: &Self::Map) -> i64 {
        f.unwrap_or(*x)
    }
}

/// `x -> a * x + b` modulo [`AFFINE_MOD`]. Coefficients and inputs are
/// reduced before use, so unreduced `u64`s are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affine {
    pub a: u64,
    pub b: u64,
}

impl Affine {
    pub const IDENTITY: Self = Self { a: 1, b: 0 };

    pub fn new(a: u64, b: u64) -> Self {
        Self {
            a: a % AFFINE_MOD,
            b: b % AFFINE_MOD,
        }
    }

    #[inline(always)]
    pub fn eval(&self, x: u64) -> u64 {
        (self.a % AFFINE_MOD * (x % AFFINE_MOD) + self.b % AFFINE_MOD) % AFFINE_MOD
    }
}

#[derive(Clone, Copy, Debug)]
pub enum RangeAffineRangeSum {}

impl MapMonoid for RangeAffineRangeSum {
    type Monoid = ModSum;
    type Map = Affine;

    #[inline(always)]
    fn identity_map() -> Self::Map {
        Affine::IDENTITY
    }

    #[inline(always)]
    fn compose(first: &Self::Map, second: &Self::Map) -> Self::Map {
        Affine {
            a: second.a % AFFINE_MOD * (first.a % AFFINE_MOD) % AFFINE_MOD,
            b: second.eval(first.b),
        }
    }

    #[inline(always)]
    fn aggregate(f: &Self::Map, len: usize) -> Self::Map {
        Affine {
            a: f.a,
            b: f.b % AFFINE_MOD * (len as u64 % AFFINE_MOD) % AFFINE_MOD,
        }
    }

    #[inline(always)]
    fn mapping(x: &u64, f: &Self::Map) -> u64 {
        f.eval(*x)
    }
}
