//! TRIX (Triple Exponential Average Rate of Change) indicator.
//!
//! TRIX is the one-bar percentage rate of change of a triple-smoothed EMA.
//! The triple smoothing filters out cycles shorter than the period.
//!
//! # Formula
//!
//! ```text
//! EMA3 = EMA(EMA(EMA(Price, period), period), period)
//! TRIX = (EMA3[t] / EMA3[t-1] - 1) * 100      (0 when EMA3[t-1] == 0)
//! ```
//!
//! # Lookback
//!
//! `3 * ema_lookback(period) + 1`.

use crate::error::{RawResult, Result};
use crate::indicators::ema::{ema_core, ema_k, ema_lookback_with};
use crate::settings::Settings;
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Computes the lookback period for TRIX under default settings.
#[inline]
#[must_use]
pub const fn trix_lookback(period: usize) -> usize {
    trix_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the lookback period for TRIX under `settings`.
#[inline]
#[must_use]
pub const fn trix_lookback_with(settings: &Settings, period: usize) -> usize {
    3 * ema_lookback_with(settings, period) + 1
}

/// Computes TRIX over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn trix_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 1)?;

    let ema_lb = ema_lookback_with(settings, period);
    let lookback = trix_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let k = ema_k(period)?;
    // The first stage emits from here on; two more EMAs and the ROC consume the rest.
    let first_begin = start_idx - 2 * ema_lb - 1;
    let mut smoothed = vec![T::zero(); end_idx - first_begin + 1];
    let mut stage = ema_core(
        settings,
        first_begin,
        end_idx,
        input,
        period,
        k,
        &mut smoothed,
    )?;
    for _ in 0..2 {
        if stage.is_empty() {
            return Ok(OutputRange::EMPTY);
        }
        let mut next = vec![T::zero(); stage.len];
        let next_stage = ema_core(settings, 0, stage.len - 1, &smoothed, period, k, &mut next)?;
        debug_assert_eq!(next_stage.begin, ema_lb);
        smoothed = next;
        stage = next_stage;
    }
    if stage.len < 2 {
        return Ok(OutputRange::EMPTY);
    }

    let hundred = T::hundred();
    for (out, pair) in output.iter_mut().zip(smoothed[..stage.len].windows(2)) {
        *out = if pair[0] == T::zero() {
            T::zero()
        } else {
            (pair[1] / pair[0] - T::one()) * hundred
        };
    }

    Ok(OutputRange::new(start_idx, stage.len - 1))
}

/// Computes TRIX under default settings.
///
/// TRIX is the one-bar percentage rate of change of a triple-smoothed EMA:
/// `100 * (e3[i] - e3[i - 1]) / e3[i - 1]`. Its lookback is three EMA
/// lookbacks plus one.
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::trix::{trix, trix_lookback};
///
/// let data = vec![50.0_f64; 30];
/// let result = trix(&data, 5).unwrap();
///
/// assert_eq!(trix_lookback(5), 13);
/// assert!(result[12].is_nan());
/// assert!(result[13..].iter().all(|&v| v == 0.0));
/// ```
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
pub fn trix<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    trix_with(&Settings::DEFAULT, data, period)
}

/// Computes TRIX under `settings`.
///
/// # Errors
///
/// See [`trix`].
pub fn trix_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let lookback = trix_lookback_with(settings, period);
    let Some(window) = Window::prepare("trix", &[data], lookback)? else {
        return Ok(output);
    };

    let range = trix_raw(
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
