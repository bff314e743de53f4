//! Array, index and parameter utilities shared by every indicator.
//!
//! Two groups of helpers live here:
//!
//! - Whole-array bookkeeping for the high-level functions: locating the
//!   begin index (first non-NaN sample), aligning a compacted low-level result
//!   back into a NaN-prefixed output ([`Window`]).
//! - Checks used by the low-level `*_raw` functions: index ranges, parameter
//!   ranges and output buffer capacity. Parameter range checks compile to
//!   nothing with the `no-range-check` feature.
//!
//! Floating-point comparison helpers used by the tests are also exported.
//!
//! # Example
//!
//! ```
//! use ta_smooth::utils::{aligned_offsets, begin_index};
//!
//! let data = [f64::NAN, f64::NAN, 1.0, 2.0, 3.0, 4.0];
//! let begin = begin_index(&data).unwrap();
//! assert_eq!(begin, 2);
//!
//! // SMA(3) has a lookback of 2
//! let (last_input, first_output) = aligned_offsets(data.len(), begin, 2);
//! assert_eq!(last_input, 3);
//! assert_eq!(first_output, 4);
//! ```

use crate::error::{Error, RawResult, Result, RetCode};
use crate::traits::SeriesElement;

/// Standard epsilon for high-precision floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons after long recurrences.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Largest accepted period of any indicator.
pub const MAX_PERIOD: usize = 100_000;

// =============================================================================
// Output ranges
// =============================================================================

/// Where the values written by a low-level call sit in the input.
///
/// `begin` is the absolute input index the first output corresponds to and
/// `len` the number of values written at the start of the output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputRange {
    /// Input index of the first output value.
    pub begin: usize,
    /// Number of output values written.
    pub len: usize,
}

impl OutputRange {
    /// The result of a call that had too little data to produce anything.
    pub const EMPTY: Self = Self { begin: 0, len: 0 };

    /// Creates a range of `len` values starting at input index `begin`.
    #[inline]
    #[must_use]
    pub const fn new(begin: usize, len: usize) -> Self {
        Self { begin, len }
    }

    /// Returns true if nothing was written.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// =============================================================================
// Begin index and alignment
// =============================================================================

/// Returns the index of the first non-NaN element.
///
/// # Errors
///
/// Returns `Error::AllNaN` if every element is NaN (including empty input).
pub fn begin_index<T: SeriesElement>(data: &[T]) -> Result<usize> {
    data.iter().position(|x| !x.is_nan()).ok_or(Error::AllNaN)
}

/// Returns `(last usable input offset, first output offset)` for an input
/// of length `len` whose valid data starts at `begin`.
///
/// The first value is relative to `begin` (`len - begin - 1`), the second
/// absolute (`begin + lookback`, which may lie past the end of the input).
#[inline]
#[must_use]
pub const fn aligned_offsets(len: usize, begin: usize, lookback: usize) -> (usize, usize) {
    (len - begin - 1, begin.saturating_add(lookback))
}

/// Checks that every parallel input has the length of the first one.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` naming the first offending length.
pub fn validate_same_len<T>(inputs: &[&[T]]) -> Result<()> {
    let Some(first) = inputs.first() else {
        return Ok(());
    };
    let expected = first.len();
    match inputs.iter().find(|s| s.len() != expected) {
        Some(other) => Err(Error::LengthMismatch {
            expected,
            actual: other.len(),
        }),
        None => Ok(()),
    }
}

/// Placement of a high-level call inside its NaN-prefixed output.
///
/// Built by [`Window::prepare`]; the low-level function is then called as
/// `raw(0, window.end_idx, &input[window.begin..], ..., &mut out[window.offset..])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First index where every input is non-NaN.
    pub begin: usize,
    /// Last input index relative to `begin`.
    pub end_idx: usize,
    /// First output index that receives a value, clamped to the input length.
    pub offset: usize,
    /// Lookback the caller expects the low-level call to honor.
    pub lookback: usize,
}

impl Window {
    /// Validates parallel inputs and computes where the output goes.
    ///
    /// Returns `Ok(None)` for empty input, which the caller turns into empty
    /// output vectors.
    ///
    /// # Errors
    ///
    /// - `Error::LengthMismatch` if the inputs differ in length
    /// - `Error::AllNaN` if any input has no non-NaN element
    pub fn prepare<T: SeriesElement>(
        indicator: &'static str,
        inputs: &[&[T]],
        lookback: usize,
    ) -> Result<Option<Self>> {
        validate_same_len(inputs)?;
        let len = inputs.first().map_or(0, |s| s.len());
        if len == 0 {
            return Ok(None);
        }

        let mut begin = 0;
        for input in inputs {
            begin = begin.max(begin_index(input)?);
        }

        let (end_idx, offset) = aligned_offsets(len, begin, lookback);
        if offset >= len {
            log::debug!(
                "{indicator}: {} valid bars do not cover lookback {lookback}, output is all NaN",
                len - begin
            );
        }

        Ok(Some(Self {
            begin,
            end_idx,
            offset: offset.min(len),
            lookback,
        }))
    }

    /// Checks that the low-level call started where the lookback said it would.
    ///
    /// # Errors
    ///
    /// Returns `RetCode::Internal` on a lookback/computation disagreement.
    pub fn finish(&self, range: OutputRange) -> Result<()> {
        if !range.is_empty() && range.begin != self.lookback {
            return Err(RetCode::Internal {
                context: "lookback disagrees with computed output range",
            }
            .into());
        }
        Ok(())
    }
}

// =============================================================================
// Low-level checks
// =============================================================================

/// Validates `[start_idx, end_idx]` against the lengths of every input.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` if `start_idx` is past the shortest input
/// - `RetCode::OutOfRangeEndIndex` if `end_idx < start_idx` or `end_idx` is past
///   the shortest input
pub fn check_range(start_idx: usize, end_idx: usize, lens: &[usize]) -> RawResult<()> {
    let len = lens.iter().copied().min().unwrap_or(0);
    if start_idx >= len {
        return Err(RetCode::OutOfRangeStartIndex { start_idx, len });
    }
    if end_idx < start_idx || end_idx >= len {
        return Err(RetCode::OutOfRangeEndIndex {
            start_idx,
            end_idx,
            len,
        });
    }
    Ok(())
}

/// Validates an integer parameter against `min..=MAX_PERIOD`.
///
/// # Errors
///
/// Returns `RetCode::BadParam` when out of range, unless the
/// `no-range-check` feature is enabled.
#[inline]
pub const fn check_period(param: &'static str, value: usize, min: usize) -> RawResult<()> {
    if cfg!(feature = "no-range-check") || (value >= min && value <= MAX_PERIOD) {
        return Ok(());
    }
    let reason = match min {
        1 => "must be in 1..=100000",
        2 => "must be in 2..=100000",
        _ => "below the minimum period",
    };
    Err(RetCode::BadParam { param, reason })
}

/// Validates a real parameter against `min..=max`.
///
/// # Errors
///
/// Returns `RetCode::BadParam` when out of range or NaN, unless the
/// `no-range-check` feature is enabled.
#[inline]
pub fn check_real(
    param: &'static str,
    value: f64,
    min: f64,
    max: f64,
    reason: &'static str,
) -> RawResult<()> {
    if cfg!(feature = "no-range-check") || (value >= min && value <= max) {
        Ok(())
    } else {
        Err(RetCode::BadParam { param, reason })
    }
}

/// Validates that an output buffer can hold `required` values.
///
/// # Errors
///
/// Returns `RetCode::BufferTooSmall` if it cannot.
#[inline]
pub const fn check_output(actual: usize, required: usize) -> RawResult<()> {
    if actual < required {
        Err(RetCode::BufferTooSmall { required, actual })
    } else {
        Ok(())
    }
}

// =============================================================================
// Floating-point helpers
// =============================================================================

/// Approximate equality check for floating-point values.
///
/// Returns `true` if `a` and `b` are within `tolerance` of each other,
/// or if both are NaN.
///
/// ```
/// use ta_smooth::utils::{approx_eq, EPSILON};
///
/// assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
/// assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
/// assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < tolerance
}

/// Relative approximate equality, for values of varying magnitude.
#[inline]
#[must_use]
pub fn approx_eq_relative<T: SeriesElement>(a: T, b: T, rel_tolerance: T) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }

    let diff = (a - b).abs();
    let max_abs = a.abs().max(b.abs());

    if max_abs == T::zero() {
        return diff == T::zero();
    }

    diff / max_abs < rel_tolerance
}

/// Counts the NaN values at the beginning of a slice.
///
/// For a high-level output this is `begin index + lookback`.
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}
