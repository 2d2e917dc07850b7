//! Numeric types the solver can pivot over.
//!
//! The pivoting only needs field operations, ordering, and the constants
//! 0, 1 and -1, so any ordered field works. Floating point is fast but may
//! misclassify near-zero pivots in degenerate configurations; `BigRational`
//! (feature `rational`) is exact at the cost of coefficient growth.

use std::ops::Neg;

use nalgebra::Scalar;
use num_traits::Num;

/// Scalar type accepted by the LCP solver.
pub trait LcpReal: Num + Neg<Output = Self> + PartialOrd + Scalar {
    /// Whether the value is usable as problem data (rejects NaN and infinities).
    fn is_finite_value(&self) -> bool;

    /// Size of the in-memory representation, in bits.
    ///
    /// Constant for machine floats; grows with numerator and denominator for
    /// arbitrary-precision rationals.
    fn repr_bits(&self) -> usize;

    /// Convert from `f64`. Exact for rationals; `None` for non-finite input.
    fn from_f64(value: f64) -> Option<Self>;

    /// Nearest `f64`, used for reporting and cross-checks.
    fn to_f64(&self) -> f64;
}

impl LcpReal for f64 {
    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }

    #[inline]
    fn repr_bits(&self) -> usize {
        64
    }

    #[inline]
    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        *self
    }
}

impl LcpReal for f32 {
    #[inline]
    fn is_finite_value(&self) -> bool {
        self.is_finite()
    }

    #[inline]
    fn repr_bits(&self) -> usize {
        32
    }

    fn from_f64(value: f64) -> Option<Self> {
        let v = value as f32;
        v.is_finite().then_some(v)
    }

    #[inline]
    fn to_f64(&self) -> f64 {
        f64::from(*self)
    }
}

#[cfg(feature = "rational")]
mod rational {
    use num_rational::BigRational;
    use num_traits::ToPrimitive;

    use super::LcpReal;

    impl LcpReal for BigRational {
        #[inline]
        fn is_finite_value(&self) -> bool {
            true
        }

        fn repr_bits(&self) -> usize {
            (self.numer().bits() + self.denom().bits()) as usize
        }

        fn from_f64(value: f64) -> Option<Self> {
            BigRational::from_float(value)
        }

        fn to_f64(&self) -> f64 {
            match (self.numer().to_f64(), self.denom().to_f64()) {
                (Some(n), Some(d)) => n / d,
                _ => f64::NAN,
            }
        }
    }
}

/// Absolute value for any [`LcpReal`].
#[inline]
pub fn abs_value<R: LcpReal>(x: &R) -> R {
    if *x < R::zero() {
        -x.clone()
    } else {
        x.clone()
    }
}
