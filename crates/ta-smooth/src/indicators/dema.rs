//! DEMA (Double Exponential Moving Average) indicator.
//!
//! DEMA reduces the lag of a plain EMA by subtracting the EMA of the EMA.
//!
//! # Formula
//!
//! ```text
//! EMA1 = EMA(Price, period)
//! EMA2 = EMA(EMA1, period)
//! DEMA = 2 * EMA1 - EMA2
//! ```
//!
//! # Lookback
//!
//! `2 * ema_lookback(period)`, so unstable(EMA) counts twice.

use crate::error::{RawResult, Result};
use crate::indicators::ema::{ema_core, ema_k, ema_lookback_with};
use crate::settings::Settings;
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Computes the lookback period for DEMA under default settings.
#[inline]
#[must_use]
pub const fn dema_lookback(period: usize) -> usize {
    dema_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the lookback period for DEMA under `settings`.
///
/// Twice the EMA lookback: the second EMA starts where the first one's
/// output does.
#[inline]
#[must_use]
pub const fn dema_lookback_with(settings: &Settings, period: usize) -> usize {
    2 * ema_lookback_with(settings, period)
}

/// Computes DEMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn dema_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 2)?;

    let ema_lb = ema_lookback_with(settings, period);
    let start_idx = start_idx.max(2 * ema_lb);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let k = ema_k(period)?;
    let mut first = vec![T::zero(); ema_lb + end_idx - start_idx + 1];
    let first_range = ema_core(settings, start_idx - ema_lb, end_idx, input, period, k, &mut first)?;
    if first_range.is_empty() {
        return Ok(OutputRange::EMPTY);
    }

    let mut second = vec![T::zero(); first_range.len];
    let second_range = ema_core(settings, 0, first_range.len - 1, &first, period, k, &mut second)?;
    if second_range.is_empty() {
        return Ok(OutputRange::EMPTY);
    }
    log::trace!(
        "dema: first stage {first_range:?}, second stage {second_range:?}"
    );

    let two = T::two();
    for (i, out) in output[..second_range.len].iter_mut().enumerate() {
        *out = two * first[second_range.begin + i] - second[i];
    }

    Ok(OutputRange::new(
        first_range.begin + second_range.begin,
        second_range.len,
    ))
}

/// Computes the Double Exponential Moving Average under default settings.
///
/// `DEMA = 2 * EMA(x) - EMA(EMA(x))`. The second term cancels the lag of the
/// first, so a straight line is reproduced exactly once both stages are
/// seeded.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `2..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::dema::{dema, dema_lookback};
///
/// let data: Vec<f64> = (1..=10).map(f64::from).collect();
/// let result = dema(&data, 3).unwrap();
///
/// assert_eq!(dema_lookback(3), 4);
/// for i in 4..data.len() {
///     assert!((result[i] - data[i]).abs() < 1e-10);
/// }
/// ```
pub fn dema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    dema_with(&Settings::DEFAULT, data, period)
}

/// Computes the Double Exponential Moving Average under `settings`.
///
/// # Errors
///
/// See [`dema`].
pub fn dema_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let lookback = dema_lookback_with(settings, period);
    let Some(window) = Window::prepare("dema", &[data], lookback)? else {
        return Ok(output);
    };

    let range = dema_raw(
        settings,
        0,
        window.end_idx,
        &data[window.begin..],
        period,
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}
