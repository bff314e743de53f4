//! KAMA (Kaufman Adaptive Moving Average) indicator.
//!
//! KAMA adapts its smoothing to market efficiency: it follows price closely
//! in a clean trend and barely moves in a choppy range.
//!
//! # Formula
//!
//! ```text
//! ER   = |Price - Price[n ago]| / Sum(|Price[i] - Price[i-1]|, n)
//! SC   = (ER * (fast - slow) + slow)^2     fast = 2/3, slow = 2/31
//! KAMA = KAMA[prev] + SC * (Price - KAMA[prev])
//! ```
//!
//! The fast and slow constants correspond to EMA periods 2 and 30 and are
//! fixed. ER is taken as 1 when the volatility sum is zero or does not
//! exceed the net change.
//!
//! # Lookback
//!
//! `period + unstable(KAMA)`.

use crate::error::{RawResult, Result};
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Computes the lookback period for KAMA under default settings.
///
/// KAMA needs `period` one-bar changes for its first efficiency ratio, so
/// the lookback is `period` rather than `period - 1`.
#[inline]
#[must_use]
pub const fn kama_lookback(period: usize) -> usize {
    kama_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the lookback period for KAMA under `settings`.
#[inline]
#[must_use]
pub const fn kama_lookback_with(settings: &Settings, period: usize) -> usize {
    period.saturating_add(settings.unstable_period(UnstableFunc::Kama))
}

/// Computes KAMA over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn kama_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 2)?;

    let lookback = kama_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let const_max = T::two() / T::from_f64(31.0)?;
    let const_diff = T::two() / T::from_f64(3.0)? - const_max;
    let smoothing = |period_roc: T, sum_roc1: T| {
        let er = if sum_roc1 <= period_roc || sum_roc1.is_near_zero() {
            T::one()
        } else {
            (period_roc / sum_roc1).abs()
        };
        let sc = er * const_diff + const_max;
        sc * sc
    };

    let mut today = start_idx - lookback;
    let mut trailing_idx = today;
    let mut sum_roc1 = T::zero();
    for _ in 0..period {
        sum_roc1 = sum_roc1 + (input[today] - input[today + 1]).abs();
        today += 1;
    }

    let mut prev_kama = input[today - 1];
    let mut trailing_value = input[trailing_idx];
    trailing_idx += 1;
    let sc = smoothing(input[today] - trailing_value, sum_roc1);
    prev_kama = (input[today] - prev_kama) * sc + prev_kama;
    today += 1;

    let mut step = |today: usize, prev_kama: T| {
        let value = input[today];
        let trailing = input[trailing_idx];
        trailing_idx += 1;
        sum_roc1 = sum_roc1 - (trailing_value - trailing).abs();
        sum_roc1 = sum_roc1 + (value - input[today - 1]).abs();
        trailing_value = trailing;
        let sc = smoothing(value - trailing, sum_roc1);
        (value - prev_kama) * sc + prev_kama
    };

    while today <= start_idx {
        prev_kama = step(today, prev_kama);
        today += 1;
    }

    output[0] = prev_kama;
    let mut out_idx = 1;
    while today <= end_idx {
        prev_kama = step(today, prev_kama);
        today += 1;
        output[out_idx] = prev_kama;
        out_idx += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Computes the Kaufman Adaptive Moving Average under default settings.
///
/// Each bar's smoothing constant moves between the 2-bar and the 30-bar
/// EMA constants according to the efficiency ratio of the last `period`
/// changes. Trending stretches follow price closely and choppy ones barely
/// move.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `2..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::kama::{kama, kama_lookback};
///
/// let data = vec![5.0_f64; 20];
/// let result = kama(&data, 10).unwrap();
///
/// assert_eq!(kama_lookback(10), 10);
/// assert!(result[..10].iter().all(|v| v.is_nan()));
/// assert!(result[10..].iter().all(|&v| v == 5.0));
/// ```
pub fn kama<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    kama_with(&Settings::DEFAULT, data, period)
}

/// Computes the Kaufman Adaptive Moving Average under `settings`.
///
/// # Errors
///
/// See [`kama`].
pub fn kama_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let lookback = kama_lookback_with(settings, period);
    let Some(window) = Window::prepare("kama", &[data], lookback)? else {
        return Ok(output);
    };

    let range = kama_raw(
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
