//! Algebraic contracts the tree is generic over.

/// An associative binary operation with a neutral element.
///
/// Implementations must satisfy, for all `a`, `b`, `c`:
/// - `op(a, op(b, c)) == op(op(a, b), c)`
/// - `op(a, identity()) == op(identity(), a) == a`
///
/// `op` need not be commutative; the tree always passes the left
/// sub-interval first.
pub trait Monoid {
    type Value: Clone;

    fn identity() -> Self::Value;
    fn op(left: &Self::Value, right: &Self::Value) -> Self::Value;
}

/// A monoid of deferred operators acting on [`MapMonoid::Monoid`].
///
/// Required laws, with `len` the number of elements an aggregate covers:
/// - `mapping(x, identity_map()) == x`
/// - `mapping(mapping(x, f), g) == mapping(x, compose(f, g))`
/// - `mapping(op(a, b), aggregate(f, la + lb))
///    == op(mapping(a, aggregate(f, la)), mapping(b, aggregate(f, lb)))`
pub trait MapMonoid {
    type Monoid: Monoid;
    type Map: Clone + PartialEq;

    fn identity_map() -> Self::Map;

    /// Compose `second` after `first` (apply `first`, then `second`).
    fn compose(first: &Self::Map, second: &Self::Map) -> Self::Map;

    /// Expand a single-element operator to one acting on `len` elements.
    fn aggregate(f: &Self::Map, len: usize) -> Self::Map;

    fn mapping(
        x: &<Self::Monoid as Monoid>::Value,
        f: &Self::Map,
    ) -> <Self::Monoid as Monoid>::Value;

    #[inline(always)]
    fn identity_element() -> <Self::Monoid as Monoid>::Value {
        <Self::Monoid as Monoid>::identity()
    }

    #[inline(always)]
    fn binary_operation(
        left: &<Self::Monoid as Monoid>::Value,
        right: &<Self::Monoid as Monoid>::Value,
    ) -> <Self::Monoid as Monoid>::Value {
        <Self::Monoid as Monoid>::op(left, right)
    }
}
