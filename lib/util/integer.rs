use std::iter::Map;
use std::mem::transmute_copy;
use std::ops::RangeInclusive;

/// Trait for types that can be represented by a contiguous range of primitive integers.
///
/// # Safety
///
/// Must only be implemented for types that can be safely transmuted to and from
/// [`Integer::Repr`].
pub unsafe trait Integer: Copy {
    /// The equivalent primitive integer type.
    type Repr: Copy + Ord;

    /// The minimum repr.
    const MIN: Self::Repr;

    /// The maximum repr.
    const MAX: Self::Repr;

    /// Casts from [`Integer::Repr`].
    #[inline(always)]
    fn new(i: Self::Repr) -> Self {
        debug_assert!(Self::in_range(i));
        unsafe { transmute_copy(&i) }
    }

    /// Casts to [`Integer::Repr`].
    #[inline(always)]
    fn get(self) -> Self::Repr {
        unsafe { transmute_copy(&self) }
    }

    /// Whether a value is in the range `(Self::MIN..=Self::MAX)`.
    #[inline(always)]
    fn in_range(i: Self::Repr) -> bool {
        Self::MIN <= i && i <= Self::MAX
    }

    /// An iterator over all values in the range [`Integer::MIN`]..=[`Integer::MAX`].
    #[inline(always)]
    #[allow(clippy::type_complexity)]
    fn iter() -> Map<RangeInclusive<Self::Repr>, fn(Self::Repr) -> Self>
    where
        RangeInclusive<Self::Repr>: Iterator<Item = Self::Repr>,
    {
        (Self::MIN..=Self::MAX).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::{proptest, Arbitrary};

    #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Arbitrary)]
    #[repr(u16)]
    enum Digit {
        One = 1,
        Two,
        Three,
        Four,
        Five,
        Six,
        Seven,
        Eight,
        Nine,
    }

    unsafe impl Integer for Digit {
        type Repr = u16;
        const MIN: Self::Repr = Digit::One as _;
        const MAX: Self::Repr = Digit::Nine as _;
    }

    #[proptest]
    fn integer_can_be_cast_from_repr(#[strategy(1u16..10)] i: u16) {
        assert_eq!(Digit::new(i).get(), i);
    }

    #[proptest]
    #[should_panic]
    fn integer_construction_panics_if_repr_smaller_than_min(#[strategy(..1u16)] i: u16) {
        Digit::new(i);
    }

    #[proptest]
    #[should_panic]
    fn integer_construction_panics_if_repr_greater_than_max(#[strategy(10u16..)] i: u16) {
        Digit::new(i);
    }

    #[proptest]
    fn integer_can_be_cast_to_repr(d: Digit) {
        assert_eq!(Digit::new(d.get()), d);
    }

    #[proptest]
    fn integer_is_always_in_range(d: Digit) {
        assert!(Digit::in_range(d.get()));
    }

    #[proptest]
    fn integer_can_be_iterated_in_order() {
        assert_eq!(
            Vec::from_iter(Digit::iter()),
            vec![
                Digit::One,
                Digit::Two,
                Digit::Three,
                Digit::Four,
                Digit::Five,
                Digit::Six,
                Digit::Seven,
                Digit::Eight,
                Digit::Nine,
            ],
        );
    }

    #[proptest]
    fn integer_is_eq_by_repr(a: Digit, b: Digit) {
        assert_eq!(a == b, a.get() == b.get());
    }

    #[proptest]
    fn integer_is_ord_by_repr(a: Digit, b: Digit) {
        assert_eq!(a < b, a.get() < b.get());
    }
}
