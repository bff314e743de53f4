//! Simple Moving Average (SMA) indicator.
//!
//! The arithmetic mean of the last `period` values.
//!
//! # Algorithm
//!
//! A rolling sum over a window of width `period`: each step adds the
//! incoming sample, emits `sum / period` and subtracts the trailing sample,
//! giving O(1) work per output.
//!
//! # Formula
//!
//! ```text
//! SMA = (P1 + P2 + ... + Pn) / n
//! ```
//!
//! # Lookback
//!
//! `period - 1`. A period of 1 is the identity.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::sma::sma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10); // (1+2+3)/3
//! assert!((result[3] - 3.0).abs() < 1e-10); // (2+3+4)/3
//! assert!((result[4] - 4.0).abs() < 1e-10); // (3+4+5)/3
//! ```

use crate::error::{RawResult, Result};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Returns the lookback period for SMA.
///
/// For SMA this is `period - 1`; a period of 1 has no lookback.
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::sma::sma_lookback;
///
/// assert_eq!(sma_lookback(1), 0);
/// assert_eq!(sma_lookback(20), 19);
/// ```
#[inline]
#[must_use]
pub const fn sma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length that produces one SMA value.
#[inline]
#[must_use]
pub const fn sma_min_len(period: usize) -> usize {
    sma_lookback(period) + 1
}

/// Computes SMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Arguments
///
/// * `start_idx`, `end_idx` - The inclusive window of `input` to compute
/// * `input` - The input series
/// * `period` - The window width, at least 1
/// * `output` - Receives the values from index 0, never aliasing `input`
///
/// # Returns
///
/// The absolute input index of `output[0]` and the number of values
/// written. An empty range means the window does not cover the lookback.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn sma_raw<T: SeriesElement>(
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 1)?;
    sma_core(start_idx, end_idx, input, period, output)
}

/// Rolling-sum SMA without argument checks other than the output capacity.
pub(crate) fn sma_core<T: SeriesElement>(
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    let lookback = sma_lookback(period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let period_t = T::from_usize(period)?;
    let mut trailing_idx = start_idx - lookback;
    let mut total = T::zero();
    let mut i = trailing_idx;
    while i < start_idx {
        total = total + input[i];
        i += 1;
    }

    let mut out_idx = 0;
    while i <= end_idx {
        total = total + input[i];
        i += 1;
        let window_total = total;
        total = total - input[trailing_idx];
        trailing_idx += 1;
        output[out_idx] = window_total / period_t;
        out_idx += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Computes the Simple Moving Average of a data series.
///
/// Returns a vector of the input's length whose first `begin + period - 1`
/// values are NaN, where `begin` is the index of the first non-NaN input.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
///
/// Input too short for the period is not an error: the result is all NaN.
///
/// # Performance
///
/// One running sum: O(n) time whatever the period.
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::sma::sma;
///
/// let short = sma(&[1.0_f64, 2.0], 5).unwrap();
/// assert!(short.iter().all(|v| v.is_nan()));
///
/// let empty: Vec<f64> = sma(&[], 5).unwrap();
/// assert!(empty.is_empty());
/// ```
pub fn sma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let Some(window) = Window::prepare("sma", &[data], sma_lookback(period))? else {
        return Ok(output);
    };

    let range = sma_raw(
        0,
        window.end_idx,
        &data[window.begin..],
        period,
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}
