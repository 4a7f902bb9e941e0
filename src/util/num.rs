//! Numeric traits for kernel weights and wide accumulators.
//!
//! Integer weights accumulate in `i64` and float weights in `f64`, whatever the
//! bit width of the input samples. Laplacian-style kernels produce negative
//! sums, so the accumulator is always signed. Integer sums saturate at the
//! `i64` bounds instead of wrapping; only `i64` samples can get there.

use std::fmt::Debug;
use std::ops::{Add, Mul};

/// Signed wide type holding weighted sums.
pub trait Accumulator:
    Copy
    + Debug
    + Default
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Additive identity; also the value written to border cells.
    const ZERO: Self;

    /// `self + weight * sample`, saturating for integers.
    fn add_product(self, weight: Self, sample: Self) -> Self;

    /// Absolute value, saturating for integers.
    fn magnitude(self) -> Self;

    /// Lossy conversion used for display scaling.
    fn to_f64(self) -> f64;
}

impl Accumulator for i64 {
    const ZERO: Self = 0;

    #[inline]
    fn add_product(self, weight: Self, sample: Self) -> Self {
        self.saturating_add(weight.saturating_mul(sample))
    }

    #[inline]
    fn magnitude(self) -> Self {
        self.saturating_abs()
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Accumulator for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn add_product(self, weight: Self, sample: Self) -> Self {
        self + weight * sample
    }

    #[inline]
    fn magnitude(self) -> Self {
        self.abs()
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Kernel weight element type.
pub trait Weight: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Accumulator the weighted sum is computed in.
    type Acc: Accumulator;

    /// Promotes the weight into the accumulator type.
    fn widen(self) -> Self::Acc;
}

macro_rules! impl_weight {
    ($acc:ty => $($t:ty),+) => {
        $(
            impl Weight for $t {
                type Acc = $acc;

                #[inline]
                fn widen(self) -> $acc {
                    <$acc>::from(self)
                }
            }
        )+
    };
}

impl_weight!(i64 => i8, i16, i32, i64);
impl_weight!(f64 => f32, f64);

#[cfg(test)]
mod tests {
    use super::{Accumulator, Weight};

    #[test]
    fn integer_weights_widen_to_i64() {
        let w: i64 = (-4i32).widen();
        assert_eq!(w, -4);
        assert_eq!(i8::MIN.widen(), -128i64);
    }

    #[test]
    fn float_weights_widen_to_f64() {
        let w: f64 = 0.5f32.widen();
        assert!((w - 0.5).abs() < 1e-12);
    }

    #[test]
    fn magnitude_saturates_at_min() {
        assert_eq!(i64::MIN.magnitude(), i64::MAX);
        assert_eq!((-15i64).magnitude(), 15);
        assert_eq!((-2.5f64).magnitude(), 2.5);
    }

    #[test]
    fn integer_sums_saturate() {
        assert_eq!(0i64.add_product(2, i64::MAX), i64::MAX);
        assert_eq!(i64::MAX.add_product(1, 1), i64::MAX);
        assert_eq!((-1i64).add_product(-4, i64::MIN), i64::MAX - 1);
        assert_eq!(3i64.add_product(-4, 5), -17);
        assert_eq!(1.0f64.add_product(0.5, 4.0), 3.0);
    }
}
