//! Exponential Moving Average (EMA) indicator.
//!
//! The EMA weights recent prices more heavily through a first-order
//! recurrence, so it reacts faster than an SMA of the same period.
//!
//! # Algorithm
//!
//! 1. Seed: the mean of the first `period` samples (or the very first sample
//!    under [`Compatibility::Metastock`](crate::settings::Compatibility)).
//! 2. Warm-up: run the recurrence over the unstable period without emitting.
//! 3. Emit one value per remaining bar.
//!
//! # Formula
//!
//! ```text
//! k = 2 / (period + 1)
//! EMA[t] = (Price[t] - EMA[t-1]) * k + EMA[t-1]
//! ```
//!
//! The recurrence is also exposed with a caller-chosen `k` for MACDFIX,
//! which uses the fixed constants 0.15 and 0.075.
//!
//! # Lookback
//!
//! `period - 1 + unstable(EMA)`.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::ema::ema;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = ema(&data, 3).unwrap();
//!
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10); // seed: mean(1, 2, 3)
//! assert!((result[3] - 3.0).abs() < 1e-10); // (4 - 2) * 0.5 + 2
//! ```

use crate::error::{RawResult, Result};
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Returns the lookback period for EMA under default settings.
///
/// This is the number of NaN values at the start of the output of
/// [`ema`] for a series with no leading NaNs: `period - 1`.
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::ema::ema_lookback;
///
/// assert_eq!(ema_lookback(5), 4);
/// assert_eq!(ema_lookback(30), 29);
/// ```
#[inline]
#[must_use]
pub const fn ema_lookback(period: usize) -> usize {
    ema_lookback_with(&Settings::DEFAULT, period)
}

/// Returns the lookback period for EMA under `settings`.
///
/// Adds the EMA unstable period to `period - 1`. Every EMA stage of DEMA,
/// TEMA, TRIX, T3 and MACD reads the same entry.
#[inline]
#[must_use]
pub const fn ema_lookback_with(settings: &Settings, period: usize) -> usize {
    period
        .saturating_sub(1)
        .saturating_add(settings.unstable_period(UnstableFunc::Ema))
}

/// Returns the smoothing constant `2 / (period + 1)`.
///
/// # Errors
///
/// Returns `RetCode::NumericConversion` if the period cannot be represented.
#[inline]
pub fn ema_k<T: SeriesElement>(period: usize) -> RawResult<T> {
    Ok(T::two() / (T::from_usize(period)? + T::one()))
}

/// Computes EMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// The seed is taken from `input[start_idx - lookback..]`, so a late
/// `start_idx` reseeds rather than continuing an earlier run. Starts before
/// the lookback are moved forward to it.
///
/// # Returns
///
/// The absolute index of the first value written to `output[0]` and the
/// number of values written. Both are zero when the window is shorter than
/// the lookback.
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::ema::ema_raw;
/// use ta_smooth::Settings;
///
/// let input = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
/// let mut out = [0.0_f64; 5];
/// let range = ema_raw(&Settings::DEFAULT, 0, 4, &input, 3, &mut out).unwrap();
///
/// assert_eq!((range.begin, range.len), (2, 3));
/// assert_eq!(&out[..3], &[2.0, 3.0, 4.0]);
/// ```
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn ema_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 2)?;
    ema_core(settings, start_idx, end_idx, input, period, ema_k(period)?, output)
}

/// EMA recurrence with an explicit smoothing constant `k`.
///
/// `period` only sizes the seed window and the lookback.
pub(crate) fn ema_core<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    k: T,
    output: &mut [T],
) -> RawResult<OutputRange> {
    let lookback = ema_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let (mut prev, mut today) = if settings.is_metastock() {
        (input[0], 1)
    } else {
        let first = start_idx - lookback;
        let seed_end = first + period;
        let total = input[first..seed_end]
            .iter()
            .fold(T::zero(), |acc, &x| acc + x);
        (total / T::from_usize(period)?, seed_end)
    };

    while today <= start_idx {
        prev = (input[today] - prev) * k + prev;
        today += 1;
    }

    output[0] = prev;
    let mut out_idx = 1;
    while today <= end_idx {
        prev = (input[today] - prev) * k + prev;
        today += 1;
        output[out_idx] = prev;
        out_idx += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Computes the Exponential Moving Average under default settings.
///
/// The smoothing constant is `k = 2 / (period + 1)`.
///
/// # Arguments
///
/// * `data` - The input series; leading NaNs are skipped
/// * `period` - The EMA period, at least 2
///
/// # Returns
///
/// A vector the length of `data`. Values before `begin + ema_lookback(period)`
/// are NaN, where `begin` is the index of the first non-NaN input. Inputs too
/// short for one value give an all-NaN vector, not an error.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `2..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::ema::ema;
///
/// let data = vec![f64::NAN, 10.0, 11.0, 12.0, 13.0];
/// let result = ema(&data, 3).unwrap();
///
/// // One leading NaN plus a lookback of 2
/// assert!(result[..3].iter().all(|v| v.is_nan()));
/// assert!((result[3] - 11.0).abs() < 1e-10);
/// assert!((result[4] - 12.0).abs() < 1e-10);
/// ```
pub fn ema<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    ema_with(&Settings::DEFAULT, data, period)
}

/// Computes the Exponential Moving Average under `settings`.
///
/// Reads the EMA unstable period and the compatibility mode. Under
/// Metastock the recurrence starts from the first sample.
///
/// # Errors
///
/// See [`ema`].
pub fn ema_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let lookback = ema_lookback_with(settings, period);
    let Some(window) = Window::prepare("ema", &[data], lookback)? else {
        return Ok(output);
    };

    let range = ema_raw(
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
