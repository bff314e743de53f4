//! Triangular Moving Average (TRIMA) indicator.
//!
//! TRIMA weights the middle of the window most heavily, with weights rising
//! linearly from both ends. It equals an SMA of an SMA, but is computed in
//! one pass.
//!
//! # Formula
//!
//! ```text
//! odd n = 2m+1:  weights 1, 2, ..., m+1, ..., 2, 1   divisor (m+1)^2
//! even n = 2m:   weights 1, 2, ..., m, m, ..., 2, 1  divisor m(m+1)
//! ```
//!
//! # Algorithm
//!
//! The weighted sum (`numerator`) is maintained from two plain sums: the
//! trailing half of the window whose weights are about to shrink
//! (`numerator_sub`) and the leading half whose weights are about to grow
//! (`numerator_add`). Each step is O(1).
//!
//! # Lookback
//!
//! The lookback period is `period - 1`.

use crate::error::{RawResult, Result};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Computes the lookback period for TRIMA.
///
/// The two stacked averages overlap by one bar, so this is `period - 1`
/// for odd and even periods alike.
///
/// ```
/// use ta_smooth::indicators::trima::trima_lookback;
///
/// assert_eq!(trima_lookback(9), 8);
/// assert_eq!(trima_lookback(10), 9);
/// ```
#[inline]
#[must_use]
pub const fn trima_lookback(period: usize) -> usize {
    period.saturating_sub(1)
}

/// Returns the minimum input length required for one TRIMA value.
#[inline]
#[must_use]
pub const fn trima_min_len(period: usize) -> usize {
    trima_lookback(period) + 1
}

/// Computes TRIMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn trima_raw<T: SeriesElement>(
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 1)?;

    let lookback = trima_lookback(period);
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

    let half = period >> 1;
    let odd = period % 2 == 1;
    let (divisor, middle_offset) = if odd {
        ((half + 1) * (half + 1), half)
    } else {
        (half * (half + 1), half - 1)
    };
    let factor = T::one() / T::from_usize(divisor)?;

    let mut trailing_idx = start_idx - lookback;
    let mut middle_idx = trailing_idx + middle_offset;
    let mut today_idx = middle_idx + half;

    let mut numerator = T::zero();
    let mut numerator_sub = T::zero();
    for &value in input[trailing_idx..=middle_idx].iter().rev() {
        numerator_sub = numerator_sub + value;
        numerator = numerator + numerator_sub;
    }
    let mut numerator_add = T::zero();
    middle_idx += 1;
    for &value in &input[middle_idx..=today_idx] {
        numerator_add = numerator_add + value;
        numerator = numerator + numerator_add;
    }

    let mut temp = input[trailing_idx];
    trailing_idx += 1;
    output[0] = numerator * factor;
    let mut out_idx = 1;
    today_idx += 1;

    while today_idx <= end_idx {
        numerator = numerator - numerator_sub;
        numerator_sub = numerator_sub - temp;
        temp = input[middle_idx];
        middle_idx += 1;
        numerator_sub = numerator_sub + temp;

        // The centre bar moves from the leading to the trailing half; with an
        // odd period it still carries the peak weight for this step.
        if odd {
            numerator = numerator + numerator_add;
            numerator_add = numerator_add - temp;
        } else {
            numerator_add = numerator_add - temp;
            numerator = numerator + numerator_add;
        }
        temp = input[today_idx];
        today_idx += 1;
        numerator_add = numerator_add + temp;
        numerator = numerator + temp;

        temp = input[trailing_idx];
        trailing_idx += 1;
        output[out_idx] = numerator * factor;
        out_idx += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Computes the Triangular Moving Average of a data series.
///
/// Weights rise linearly to the middle of the window and fall back. An odd
/// period has a single peak bar; an even period shares the peak between the
/// two central bars.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::trima::trima;
///
/// // Weights 1, 2, 1
/// let result = trima(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
/// assert!(result[1].is_nan());
/// assert!((result[2] - 2.0).abs() < 1e-10);
/// assert!((result[4] - 4.0).abs() < 1e-10);
/// ```
pub fn trima<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let Some(window) = Window::prepare("trima", &[data], trima_lookback(period))? else {
        return Ok(output);
    };

    let range = trima_raw(
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
    use crate::indicators::sma::sma;
    use crate::utils::{approx_eq, count_nan_prefix};

    const EPSILON: f64 = 1e-9;

    fn triangular_weights(period: usize) -> Vec<f64> {
        (0..period)
            .map(|i| (i + 1).min(period - i) as f64)
            .collect()
    }

    fn direct_trima(window: &[f64]) -> f64 {
        let weights = triangular_weights(window.len());
        let total: f64 = weights.iter().sum();
        window.iter().zip(&weights).map(|(x, w)| x * w).sum::<f64>() / total
    }

    fn sample() -> Vec<f64> {
        (0..60)
            .map(|i| 20.0 + (i as f64 * 0.45).sin() * 4.0 + (i % 5) as f64)
            .collect()
    }

    #[test]
    fn test_trima_lookback() {
        assert_eq!(trima_lookback(1), 0);
        assert_eq!(trima_lookback(10), 9);
        assert_eq!(trima_min_len(10), 10);
    }

    #[test]
    fn test_trima_period_three_weights() {
        let data = vec![1.0_f64, 2.0, 4.0, 8.0];
        let result = trima(&data, 3).unwrap();
        assert_eq!(count_nan_prefix(&result), 2);
        // (1*1 + 2*2 + 4*1) / 4, then (2 + 8 + 8) / 4
        assert!(approx_eq(result[2], 9.0 / 4.0, EPSILON));
        assert!(approx_eq(result[3], 18.0 / 4.0, EPSILON));
    }

    #[test]
    fn test_trima_period_four_weights() {
        let data = vec![1.0_f64, 2.0, 4.0, 8.0, 16.0];
        let result = trima(&data, 4).unwrap();
        // (1 + 4 + 8 + 8) / 6, then (2 + 8 + 16 + 16) / 6
        assert!(approx_eq(result[3], 21.0 / 6.0, EPSILON));
        assert!(approx_eq(result[4], 42.0 / 6.0, EPSILON));
    }

    #[test]
    fn test_trima_matches_direct_weights_odd_and_even() {
        let data = sample();
        for period in [2, 3, 4, 5, 6, 7, 10, 11] {
            let result = trima(&data, period).unwrap();
            for i in (period - 1)..data.len() {
                let expected = direct_trima(&data[i + 1 - period..=i]);
                assert!(
                    approx_eq(result[i], expected, EPSILON),
                    "period {period} index {i}: {} vs {expected}",
                    result[i]
                );
            }
        }
    }

    #[test]
    fn test_trima_is_sma_of_sma() {
        let data = sample();
        // Odd 7: SMA(4) of SMA(4). Even 8: SMA(4) of SMA(5).
        let cases = [(7, 4, 4), (8, 5, 4)];
        for (period, first, second) in cases {
            let inner = sma(&data, first).unwrap();
            let outer = sma(&inner, second).unwrap();
            let result = trima(&data, period).unwrap();
            for i in (period - 1)..data.len() {
                assert!(approx_eq(result[i], outer[i], EPSILON));
            }
        }
    }

    #[test]
    fn test_trima_period_one_is_identity() {
        let data = vec![4.0_f64, 1.0, 3.0];
        assert_eq!(trima(&data, 1).unwrap(), data);
    }

    #[test]
    fn test_trima_constant() {
        let data = vec![3.0_f64; 15];
        for period in [2, 5, 6] {
            let result = trima(&data, period).unwrap();
            for &v in &result[period - 1..] {
                assert!(approx_eq(v, 3.0, EPSILON));
            }
        }
    }

    #[test]
    fn test_trima_f32() {
        let data: Vec<f32> = vec![1.0, 2.0, 4.0, 8.0];
        let result = trima(&data, 3).unwrap();
        assert!((result[2] - 2.25).abs() < 1e-5);
    }

    #[test]
    fn test_trima_raw_sub_range() {
        let data = sample();
        let mut out = vec![0.0; data.len()];
        let range = trima_raw(20, 30, &data, 6, &mut out).unwrap();
        assert_eq!(range, OutputRange::new(20, 11));
        for j in 0..11 {
            let i = 20 + j;
            assert!(approx_eq(out[j], direct_trima(&data[i - 5..=i]), EPSILON));
        }
    }
}
