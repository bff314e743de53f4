//! Weighted Moving Average (WMA) indicator.
//!
//! The Weighted Moving Average assigns linearly decreasing weights to older
//! prices: the newest sample weighs `period`, the oldest weighs 1.
//!
//! # Algorithm
//!
//! Two running quantities avoid recomputing the dot product per bar:
//! `period_sum` (the weighted sum) and `period_sub` (the plain sum of the
//! window). Moving one bar forward adds the new sample with weight `period`,
//! then subtracting `period_sub` lowers every other weight by one and drops
//! the oldest sample.
//!
//! # Formula
//!
//! ```text
//! WMA = (P1 * n + P2 * (n-1) + ... + Pn * 1) / (n * (n+1) / 2)
//! ```
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::wma::wma;
//!
//! let data = vec![1.0_f64, 2.0, 3.0];
//! let result = wma(&data, 3).unwrap();
//!
//! // (1*1 + 2*2 + 3*3) / 6
//! assert!((result[2] - 14.0 / 6.0).abs() < 1e-10);
//! ```

use crate::error::{RawResult, Result};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Returns the lookback period for WMA.
///
/// ```
/// use ta_smooth::indicators::wma::wma_lookback;
///
/// assert_eq!(wma_lookback(5), 4);
/// assert_eq!(wma_lookback(1), 0);
/// ```
#[inline]
#[must_use]
pub const fn wma_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Computes WMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn wma_raw<T: SeriesElement>(
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 1)?;

    let lookback = wma_lookback(period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    if period == 1 {
        output[..count].copy_from_slice(&input[start_idx..=end_idx]);
        return Ok(OutputRange::new(start_idx, count));
    }

    let period_t = T::from_usize(period)?;
    let divider = T::from_usize(period * (period + 1) / 2)?;

    let mut trailing_idx = start_idx - lookback;
    let mut in_idx = trailing_idx;
    let mut period_sub = T::zero();
    let mut period_sum = T::zero();
    let mut weight = T::one();
    while in_idx < start_idx {
        let value = input[in_idx];
        in_idx += 1;
        period_sub = period_sub + value;
        period_sum = period_sum + value * weight;
        weight = weight + T::one();
    }

    let mut trailing_value = T::zero();
    let mut out_idx = 0;
    while in_idx <= end_idx {
        let value = input[in_idx];
        in_idx += 1;
        period_sub = period_sub + value - trailing_value;
        period_sum = period_sum + value * period_t;
        trailing_value = input[trailing_idx];
        trailing_idx += 1;
        output[out_idx] = period_sum / divider;
        out_idx += 1;
        period_sum = period_sum - period_sub;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Computes the Weighted Moving Average of a data series.
///
/// The newest sample in each window has weight `period` and the oldest has
/// weight 1; the divisor is `period * (period + 1) / 2`.
///
/// # Arguments
///
/// * `data` - The input series; leading NaNs are skipped
/// * `period` - The window width, at least 1
///
/// # Returns
///
/// A vector the length of `data` with the first `begin + period - 1` values
/// NaN. A period of 1 returns the input unchanged.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::wma::wma;
///
/// let result = wma(&[1.0_f64, 2.0, 3.0, 4.0], 3).unwrap();
/// assert!((result[2] - 14.0 / 6.0).abs() < 1e-10);
/// assert!((result[3] - 20.0 / 6.0).abs() < 1e-10); // (2 + 6 + 12) / 6
/// ```
pub fn wma<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let Some(window) = Window::prepare("wma", &[data], wma_lookback(period))? else {
        return Ok(output);
    };

    let range = wma_raw(
        0,
        window.end_idx,
        &data[window.begin..],
        period,
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]

    use super::*;
    use crate::utils::{approx_eq, count_nan_prefix};

    const EPSILON: f64 = 1e-10;

    fn direct_wma(window: &[f64]) -> f64 {
        let n = window.len();
        let weighted: f64 = window
            .iter()
            .enumerate()
            .map(|(i, &x)| x * (i + 1) as f64)
            .sum();
        weighted / (n * (n + 1) / 2) as f64
    }

    #[test]
    fn test_wma_single_window() {
        let data = vec![1.0_f64, 2.0, 3.0];
        let result = wma(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        assert!(approx_eq(result[2], 14.0 / 6.0, EPSILON));
    }

    #[test]
    fn test_wma_matches_dot_product() {
        let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64 * 0.37).cos() * 9.0).collect();
        for period in [2, 3, 5, 8, 13] {
            let result = wma(&data, period).unwrap();
            for i in (period - 1)..data.len() {
                let expected = direct_wma(&data[i + 1 - period..=i]);
                assert!(
                    approx_eq(result[i], expected, 1e-9),
                    "period {period} index {i}: {} vs {expected}",
                    result[i]
                );
            }
        }
    }

    #[test]
    fn test_wma_period_one_is_identity() {
        let data = vec![5.0_f64, 4.0, 9.0, -2.0];
        assert_eq!(wma(&data, 1).unwrap(), data);
    }

    #[test]
    fn test_wma_constant() {
        let data = vec![7.5_f64; 12];
        let result = wma(&data, 4).unwrap();
        for &v in &result[3..] {
            assert!(approx_eq(v, 7.5, EPSILON));
        }
    }

    #[test]
    fn test_wma_insufficient_data() {
        let data = vec![1.0_f64, 2.0];
        assert!(wma(&data, 3).unwrap().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_wma_raw_sub_range() {
        let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
        let mut out = vec![0.0; 5];
        let range = wma_raw(3, 4, &data, 3, &mut out).unwrap();
        assert_eq!(range, OutputRange::new(3, 2));
        assert!(approx_eq(out[0], direct_wma(&[2.0, 3.0, 4.0]), EPSILON));
        assert!(approx_eq(out[1], direct_wma(&[3.0, 4.0, 5.0]), EPSILON));
    }
}
