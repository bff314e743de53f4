//! TEMA (Triple Exponential Moving Average) indicator.
//!
//! # Formula
//!
//! ```text
//! EMA1 = EMA(Price, period)
//! EMA2 = EMA(EMA1, period)
//! EMA3 = EMA(EMA2, period)
//! TEMA = 3 * EMA1 - 3 * EMA2 + EMA3
//! ```
//!
//! # Lookback
//!
//! `3 * ema_lookback(period)`.

use crate::error::{RawResult, Result};
use crate::indicators::ema::{ema_core, ema_k, ema_lookback_with};
use crate::settings::Settings;
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Computes the lookback period for TEMA under default settings.
#[inline]
#[must_use]
pub const fn tema_lookback(period: usize) -> usize {
    tema_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the lookback period for TEMA under `settings`.
#[inline]
#[must_use]
pub const fn tema_lookback_with(settings: &Settings, period: usize) -> usize {
    3 * ema_lookback_with(settings, period)
}

/// Computes TEMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn tema_raw<T: SeriesElement>(
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
    let start_idx = start_idx.max(3 * ema_lb);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let k = ema_k(period)?;
    let mut first = vec![T::zero(); 2 * ema_lb + end_idx - start_idx + 1];
    let first_range = ema_core(
        settings,
        start_idx - 2 * ema_lb,
        end_idx,
        input,
        period,
        k,
        &mut first,
    )?;
    if first_range.is_empty() {
        return Ok(OutputRange::EMPTY);
    }

    let mut second = vec![T::zero(); first_range.len];
    let second_range = ema_core(settings, 0, first_range.len - 1, &first, period, k, &mut second)?;
    if second_range.is_empty() {
        return Ok(OutputRange::EMPTY);
    }

    let third_range = ema_core(settings, 0, second_range.len - 1, &second, period, k, output)?;
    if third_range.is_empty() {
        return Ok(OutputRange::EMPTY);
    }
    log::trace!("tema: stages {first_range:?} {second_range:?} {third_range:?}");

    let first_offset = third_range.begin + second_range.begin;
    let second_offset = third_range.begin;
    let three = T::from_f64(3.0)?;
    for (i, out) in output[..third_range.len].iter_mut().enumerate() {
        *out = *out + (three * first[first_offset + i] - three * second[second_offset + i]);
    }

    Ok(OutputRange::new(
        first_range.begin + first_offset,
        third_range.len,
    ))
}

/// Computes the Triple Exponential Moving Average under default settings.
///
/// `TEMA = 3 * e1 - 3 * e2 + e3` with `e1 = EMA(x)`, `e2 = EMA(e1)` and
/// `e3 = EMA(e2)`. The lookback is three EMA lookbacks.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `2..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::tema::tema;
///
/// let data: Vec<f64> = (1..=12).map(f64::from).collect();
/// let result = tema(&data, 3).unwrap();
///
/// assert!(result[5].is_nan());
/// assert!((result[6] - 7.0).abs() < 1e-10);
/// assert!((result[11] - 12.0).abs() < 1e-10);
/// ```
pub fn tema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    tema_with(&Settings::DEFAULT, data, period)
}

/// Computes the Triple Exponential Moving Average under `settings`.
///
/// # Errors
///
/// See [`tema`].
pub fn tema_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let lookback = tema_lookback_with(settings, period);
    let Some(window) = Window::prepare("tema", &[data], lookback)? else {
        return Ok(output);
    };

    let range = tema_raw(
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
