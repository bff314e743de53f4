//! Core numeric trait for ta-smooth.
//!
//! Every indicator is generic over [`SeriesElement`], which abstracts over
//! `f32` and `f64`. TA-Lib itself computes in `f64`; `f32` inputs go through
//! the same recurrences at single precision.
//!
//! # Example
//!
//! ```
//! use ta_smooth::error::RawResult;
//! use ta_smooth::traits::SeriesElement;
//!
//! fn mean<T: SeriesElement>(data: &[T]) -> RawResult<T> {
//!     let n = T::from_usize(data.len())?;
//!     Ok(data.iter().fold(T::zero(), |acc, &x| acc + x) / n)
//! }
//!
//! let m = mean(&[1.0_f64, 2.0, 3.0, 4.0]).unwrap();
//! assert!((m - 2.5).abs() < 1e-12);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{RawResult, RetCode};

/// Tolerance below which a denominator is treated as zero.
const ZERO_TOLERANCE: f64 = 1e-8;

/// A floating-point type usable as an element of a price series.
///
/// Blanket-implemented for every type meeting the bounds, so `f32` and
/// `f64` both qualify.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Converts a `usize` (typically a period) to this type.
    ///
    /// # Errors
    ///
    /// Returns `RetCode::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_usize(value: usize) -> RawResult<Self> {
        <Self as NumCast>::from(value).ok_or(RetCode::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Converts an `f64` constant or parameter to this type.
    ///
    /// # Errors
    ///
    /// Returns `RetCode::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_f64(value: f64) -> RawResult<Self> {
        <Self as NumCast>::from(value).ok_or(RetCode::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2, used by every `2 / (period + 1)` smoothing constant.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 100, the percentage scale of the oscillators.
    #[inline]
    #[must_use]
    fn hundred() -> Self {
        <Self as NumCast>::from(100_u8).unwrap_or_else(Self::nan)
    }

    /// True when `|self| < 1e-8`, the zero test used for denominators.
    #[inline]
    #[must_use]
    fn is_near_zero(self) -> bool {
        let tolerance = <Self as NumCast>::from(ZERO_TOLERANCE).unwrap_or_else(Self::epsilon);
        self.abs() < tolerance
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_usize() {
        let val: f64 = SeriesElement::from_usize(42).unwrap();
        assert!((val - 42.0).abs() < 1e-10);

        let val_f32: f32 = SeriesElement::from_usize(100).unwrap();
        assert!((val_f32 - 100.0).abs() < 1e-5);
    }

    #[test]
    fn test_from_f64() {
        let val: f64 = SeriesElement::from_f64(std::f64::consts::PI).unwrap();
        assert!((val - std::f64::consts::PI).abs() < 1e-15);

        let val_f32: f32 = SeriesElement::from_f64(std::f64::consts::PI).unwrap();
        assert!((val_f32 - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_constants() {
        assert_eq!(<f64 as SeriesElement>::two(), 2.0);
        assert_eq!(<f32 as SeriesElement>::two(), 2.0);
        assert_eq!(<f64 as SeriesElement>::hundred(), 100.0);
        assert_eq!(<f32 as SeriesElement>::hundred(), 100.0);
    }

    #[test]
    fn test_is_near_zero() {
        assert!(0.0_f64.is_near_zero());
        assert!((-0.0_f64).is_near_zero());
        assert!(5e-9_f64.is_near_zero());
        assert!((-5e-9_f64).is_near_zero());
        assert!(!1e-8_f64.is_near_zero());
        assert!(!(-2e-8_f64).is_near_zero());
        assert!(!f64::NAN.is_near_zero());
        assert!(1e-9_f32.is_near_zero());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<f64>();
        assert_send_sync::<f32>();
    }
}
