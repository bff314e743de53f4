//! True Range (TRANGE) and Average True Range (ATR) indicators.
//!
//! The Average True Range is a volatility indicator developed by J. Welles
//! Wilder Jr. It averages the true range, which extends the bar's high-low
//! range to cover a gap from the previous close.
//!
//! # Formula
//!
//! ```text
//! True Range[i] = max(
//!     High[i] - Low[i],                    // Current range
//!     |High[i] - Close[i-1]|,              // Gap up from previous close
//!     |Low[i] - Close[i-1]|                // Gap down from previous close
//! )
//!
//! First ATR = SMA(TR[1..=period])
//!
//! Subsequent:
//! ATR[i] = (ATR[i-1] * (period-1) + TR[i]) / period
//! ```
//!
//! # Lookback
//!
//! TRANGE: 1. ATR: `period + unstable(ATR)`; a period of 1 is TRANGE.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::atr::{atr, trange};
//!
//! let high = vec![48.70_f64, 48.72, 48.90, 48.87, 48.82, 49.05, 49.20, 49.35, 49.92, 50.19];
//! let low = vec![47.79_f64, 48.14, 48.39, 48.37, 48.24, 48.64, 48.94, 48.86, 49.50, 49.87];
//! let close = vec![48.16_f64, 48.61, 48.75, 48.63, 48.74, 49.03, 49.07, 49.32, 49.91, 50.13];
//!
//! let tr = trange(&high, &low, &close).unwrap();
//! assert!(tr[0].is_nan());
//!
//! let result = atr(&high, &low, &close, 5).unwrap();
//! assert!(result[4].is_nan());
//! let first: f64 = tr[1..=5].iter().sum::<f64>() / 5.0;
//! assert!((result[5] - first).abs() < 1e-12);
//! ```

use crate::error::{RawResult, Result};
use crate::indicators::directional::true_range;
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Default ATR period.
pub const DEFAULT_PERIOD: usize = 14;

/// Returns the lookback period for TRANGE.
#[inline]
#[must_use]
pub const fn trange_lookback() -> usize {
    1
}

/// Computes the ATR lookback under default settings.
#[inline]
#[must_use]
pub const fn atr_lookback(period: usize) -> usize {
    atr_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the ATR lookback under `settings`.
#[inline]
#[must_use]
pub const fn atr_lookback_with(settings: &Settings, period: usize) -> usize {
    if period <= 1 {
        trange_lookback()
    } else {
        period.saturating_add(settings.unstable_period(UnstableFunc::Atr))
    }
}

/// Computes the true range over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn trange_raw<T: SeriesElement>(
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    close: &[T],
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[high.len(), low.len(), close.len()])?;

    let start_idx = start_idx.max(trange_lookback());
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    for (out, today) in output[..count].iter_mut().zip(start_idx..=end_idx) {
        *out = true_range(high[today], low[today], close[today - 1]);
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes ATR over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
#[allow(clippy::too_many_arguments)]
pub fn atr_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[high.len(), low.len(), close.len()])?;
    check_period("period", period, 1)?;

    if period == 1 {
        return trange_raw(start_idx, end_idx, high, low, close, output);
    }

    let lookback = atr_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    let tr = |i: usize| true_range(high[i], low[i], close[i - 1]);
    let period_t = T::from_usize(period)?;
    let carried = T::from_usize(period - 1)?;

    // Seed with the mean of the first `period` true ranges
    let first = start_idx - lookback + 1;
    let mut today = first + period;
    let mut prev = (first..today).fold(T::zero(), |acc, i| acc + tr(i)) / period_t;

    for _ in 0..settings.unstable_period(UnstableFunc::Atr) {
        prev = (prev * carried + tr(today)) / period_t;
        today += 1;
    }

    output[0] = prev;
    for out in &mut output[1..count] {
        prev = (prev * carried + tr(today)) / period_t;
        today += 1;
        *out = prev;
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes the true range of every bar after the first.
///
/// The first bar has no previous close, so its output is NaN.
///
/// # Errors
///
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::AllNaN` if an input has no valid sample
pub fn trange<T: SeriesElement>(high: &[T], low: &[T], close: &[T]) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); high.len()];
    let Some(window) = Window::prepare("trange", &[high, low, close], trange_lookback())? else {
        return Ok(output);
    };

    let range = trange_raw(
        0,
        window.end_idx,
        &high[window.begin..],
        &low[window.begin..],
        &close[window.begin..],
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}

/// Computes ATR under `settings`.
///
/// ```text
/// TR[i]  = max(high[i] - low[i], |high[i] - close[i-1]|, |low[i] - close[i-1]|)
/// ATR    = mean(TR[1..=period]), then ATR = (ATR * (period - 1) + TR) / period
/// ```
///
/// The ATR unstable period delays the first emitted value without changing
/// the recurrence.
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::atr::atr_with;
/// use ta_smooth::{Settings, UnstableFunc};
///
/// let high = vec![11.0_f64; 20];
/// let low = vec![9.0_f64; 20];
/// let close = vec![10.0_f64; 20];
///
/// let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Atr, 2);
/// let result = atr_with(&settings, &high, &low, &close, 14).unwrap();
///
/// assert!(result[15].is_nan());
/// assert!(result[16..].iter().all(|v| (v - 2.0).abs() < 1e-10));
/// ```
///
/// # Errors
///
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::AllNaN` if an input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
pub fn atr_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); high.len()];
    let lookback = atr_lookback_with(settings, period);
    let Some(window) = Window::prepare("atr", &[high, low, close], lookback)? else {
        return Ok(output);
    };

    let range = atr_raw(
        settings,
        0,
        window.end_idx,
        &high[window.begin..],
        &low[window.begin..],
        &close[window.begin..],
        period,
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}

/// Computes ATR under default settings.
///
/// # Errors
///
/// See [`atr_with`].
pub fn atr<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    atr_with(&Settings::DEFAULT, high, low, close, period)
}
