//! Relative Strength Index (RSI) and Chande Momentum Oscillator (CMO).
//!
//! Both oscillators smooth the one-bar gains and losses of a series with
//! Wilder's recurrence and differ only in how the two averages are combined.
//!
//! # Formula
//!
//! ```text
//! Change[i] = Price[i] - Price[i-1]
//! Gain[i]   = max(Change[i], 0)
//! Loss[i]   = max(-Change[i], 0)
//!
//! First Avg  = mean of the first `period` gains (losses)
//! Avg[i]     = (Avg[i-1] * (period-1) + Gain[i]) / period
//!
//! RSI = 100 * AvgGain / (AvgGain + AvgLoss)
//! CMO = 100 * (AvgGain - AvgLoss) / (AvgGain + AvgLoss)
//! ```
//!
//! When both averages are zero the output is 0. A period of 1 passes the
//! input straight through.
//!
//! # Lookback
//!
//! `period + unstable(RSI)` and `period + unstable(CMO)` respectively.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::rsi::{cmo, rsi};
//!
//! let data = vec![44.0_f64, 44.25, 44.5, 43.75, 44.5, 44.25, 44.0, 43.5, 43.25, 43.0];
//! let result = rsi(&data, 5).unwrap();
//! assert!(result[4].is_nan());
//! assert!(result[5] > 0.0 && result[5] < 100.0);
//!
//! let momentum = cmo(&data, 5).unwrap();
//! assert!((result[5] - (momentum[5] + 100.0) / 2.0).abs() < 1e-9);
//! ```

use crate::error::{RawResult, Result};
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Default RSI and CMO period.
pub const DEFAULT_PERIOD: usize = 14;

/// Computes the RSI lookback under default settings.
#[inline]
#[must_use]
pub const fn rsi_lookback(period: usize) -> usize {
    rsi_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the RSI lookback under `settings`.
#[inline]
#[must_use]
pub const fn rsi_lookback_with(settings: &Settings, period: usize) -> usize {
    period.saturating_add(settings.unstable_period(UnstableFunc::Rsi))
}

/// Computes the CMO lookback under default settings.
#[inline]
#[must_use]
pub const fn cmo_lookback(period: usize) -> usize {
    cmo_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the CMO lookback under `settings`.
#[inline]
#[must_use]
pub const fn cmo_lookback_with(settings: &Settings, period: usize) -> usize {
    period.saturating_add(settings.unstable_period(UnstableFunc::Cmo))
}

/// Wilder-smoothed gain/loss averages over a sliding series position.
struct GainLoss<T> {
    gain: T,
    loss: T,
    prev: T,
}

impl<T: SeriesElement> GainLoss<T> {
    fn push(&mut self, value: T) {
        let change = value - self.prev;
        self.prev = value;
        if change < T::zero() {
            self.loss = self.loss - change;
        } else {
            self.gain = self.gain + change;
        }
    }

    fn smooth(&mut self, value: T, carried: T, period: T) {
        self.gain = self.gain * carried;
        self.loss = self.loss * carried;
        self.push(value);
        self.gain = self.gain / period;
        self.loss = self.loss / period;
    }
}

/// Shared RSI/CMO walk; `combine` maps `(avg_gain, avg_loss)` to the output.
#[allow(clippy::too_many_arguments)]
fn gain_loss_oscillator<T, F>(
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    lookback: usize,
    output: &mut [T],
    combine: F,
) -> RawResult<OutputRange>
where
    T: SeriesElement,
    F: Fn(T, T) -> T,
{
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 1)?;

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
    let carried = T::from_usize(period - 1)?;

    let mut today = start_idx - lookback;
    let mut avg = GainLoss {
        gain: T::zero(),
        loss: T::zero(),
        prev: input[today],
    };
    today += 1;
    for _ in 0..period {
        avg.push(input[today]);
        today += 1;
    }
    avg.gain = avg.gain / period_t;
    avg.loss = avg.loss / period_t;

    let mut out_idx = 0;
    if today > start_idx {
        output[out_idx] = combine(avg.gain, avg.loss);
        out_idx += 1;
    } else {
        // Unstable warm-up: computed, not emitted
        while today < start_idx {
            avg.smooth(input[today], carried, period_t);
            today += 1;
        }
    }

    while today <= end_idx {
        avg.smooth(input[today], carried, period_t);
        today += 1;
        output[out_idx] = combine(avg.gain, avg.loss);
        out_idx += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Computes RSI over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn rsi_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    let hundred = T::hundred();
    gain_loss_oscillator(
        start_idx,
        end_idx,
        input,
        period,
        rsi_lookback_with(settings, period),
        output,
        |gain, loss| {
            let total = gain + loss;
            if total.is_near_zero() {
                T::zero()
            } else {
                hundred * (gain / total)
            }
        },
    )
}

/// Computes CMO over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// See [`rsi_raw`].
pub fn cmo_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    let hundred = T::hundred();
    gain_loss_oscillator(
        start_idx,
        end_idx,
        input,
        period,
        cmo_lookback_with(settings, period),
        output,
        |gain, loss| {
            let total = gain + loss;
            if total.is_near_zero() {
                T::zero()
            } else {
                hundred * ((gain - loss) / total)
            }
        },
    )
}

type RawFn<T> = fn(&Settings, usize, usize, &[T], usize, &mut [T]) -> RawResult<OutputRange>;

fn run<T: SeriesElement>(
    name: &'static str,
    raw: RawFn<T>,
    settings: &Settings,
    data: &[T],
    period: usize,
    lookback: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let Some(window) = Window::prepare(name, &[data], lookback)? else {
        return Ok(output);
    };

    let range = raw(
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

/// Computes the Relative Strength Index under default settings.
///
/// ```text
/// RSI = 100 * avg_gain / (avg_gain + avg_loss)
/// ```
///
/// Both averages start as the mean of the first `period` one-bar moves and
/// then follow Wilder's recurrence. A window with no movement at all gives 0.
///
/// # Arguments
///
/// * `data` - The input series; leading NaNs are skipped
/// * `period` - The averaging period. 1 passes the input through after the
///   first bar
///
/// # Returns
///
/// Values in `[0, 100]` from index `begin + rsi_lookback(period)` on, NaN
/// before.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::rsi::rsi;
///
/// let rising: Vec<f64> = (1..=20).map(f64::from).collect();
/// let result = rsi(&rising, 14).unwrap();
///
/// assert!(result[13].is_nan());
/// assert!(result[14..].iter().all(|v| (v - 100.0).abs() < 1e-10));
/// ```
pub fn rsi<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    rsi_with(&Settings::DEFAULT, data, period)
}

/// Computes the Relative Strength Index under `settings`.
///
/// # Errors
///
/// See [`rsi`].
pub fn rsi_with<T: SeriesElement>(settings: &Settings, data: &[T], period: usize) -> Result<Vec<T>> {
    let lookback = rsi_lookback_with(settings, period);
    run("rsi", rsi_raw, settings, data, period, lookback)
}

/// Computes the Chande Momentum Oscillator under default settings.
///
/// `CMO = 100 * (avg_gain - avg_loss) / (avg_gain + avg_loss)`, over the
/// same Wilder averages as [`rsi`]. It is RSI rescaled to `[-100, 100]`.
///
/// # Errors
///
/// See [`rsi`].
pub fn cmo<T: SeriesElement>(data: &[T], period: usize) -> Result<Vec<T>> {
    cmo_with(&Settings::DEFAULT, data, period)
}

/// Computes the Chande Momentum Oscillator under `settings`.
///
/// # Errors
///
/// See [`rsi`].
pub fn cmo_with<T: SeriesElement>(settings: &Settings, data: &[T], period: usize) -> Result<Vec<T>> {
    let lookback = cmo_lookback_with(settings, period);
    run("cmo", cmo_raw, settings, data, period, lookback)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]

    use super::*;
    #[cfg(not(feature = "no-range-check"))]
    use crate::error::{Error, RetCode};
    use crate::utils::{approx_eq, count_nan_prefix};

    const EPSILON: f64 = 1e-10;

    fn wave(len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| 50.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect()
    }

    /// Plain Wilder averages, recomputed without the shared walk.
    fn reference_averages(data: &[f64], period: usize) -> Vec<(f64, f64)> {
        let p = period as f64;
        let mut out = vec![(f64::NAN, f64::NAN); data.len()];
        let (mut gain, mut loss) = (0.0, 0.0);
        for i in 1..=period {
            let change = data[i] - data[i - 1];
            if change < 0.0 {
                loss -= change;
            } else {
                gain += change;
            }
        }
        gain /= p;
        loss /= p;
        out[period] = (gain, loss);
        for i in period + 1..data.len() {
            let change = data[i] - data[i - 1];
            gain = (gain * (p - 1.0) + change.max(0.0)) / p;
            loss = (loss * (p - 1.0) + (-change).max(0.0)) / p;
            out[i] = (gain, loss);
        }
        out
    }

    // ==================== RSI Tests ====================

    #[test]
    fn test_rsi_lookback() {
        assert_eq!(rsi_lookback(14), 14);
        let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Rsi, 4);
        assert_eq!(rsi_lookback_with(&settings, 14), 18);
        assert_eq!(cmo_lookback_with(&settings, 14), 14);
    }

    #[test]
    fn test_rsi_matches_reference() {
        let data = wave(60);
        let period = 9;
        let result = rsi(&data, period).unwrap();
        let averages = reference_averages(&data, period);
        assert_eq!(count_nan_prefix(&result), period);
        for i in period..data.len() {
            let (gain, loss) = averages[i];
            let expected = 100.0 * gain / (gain + loss);
            assert!(approx_eq(result[i], expected, EPSILON), "index {i}");
        }
    }

    #[test]
    fn test_rsi_hand_computed() {
        // Changes: +1, -1 -> avg gain 0.5, avg loss 0.5
        let data = [10.0, 11.0, 10.0, 12.0];
        let result = rsi(&data, 2).unwrap();
        assert!(approx_eq(result[2], 50.0, EPSILON));
        // +2: gain (0.5 + 2) / 2 = 1.25, loss 0.25
        assert!(approx_eq(result[3], 100.0 * 1.25 / 1.5, EPSILON));
    }

    #[test]
    fn test_rsi_rising_and_falling() {
        let rising: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        for &v in &rsi(&rising, 5).unwrap()[5..] {
            assert!(approx_eq(v, 100.0, EPSILON));
        }
        for &v in &rsi(&falling, 5).unwrap()[5..] {
            assert!(approx_eq(v, 0.0, EPSILON));
        }
    }

    #[test]
    fn test_rsi_flat_input_is_zero() {
        let data = vec![7.0_f64; 20];
        for &v in &rsi(&data, 5).unwrap()[5..] {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_rsi_period_one_passes_through() {
        let data = wave(15);
        let result = rsi(&data, 1).unwrap();
        assert!(result[0].is_nan());
        assert_eq!(result[1..], data[1..]);
    }

    #[test]
    fn test_rsi_unstable_period_matches_tail() {
        let data = wave(80);
        let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Rsi, 6);
        let plain = rsi(&data, 10).unwrap();
        let delayed = rsi_with(&settings, &data, 10).unwrap();
        assert_eq!(count_nan_prefix(&delayed), 16);
        for i in 16..data.len() {
            assert!(approx_eq(delayed[i], plain[i], EPSILON));
        }
    }

    #[test]
    fn test_rsi_raw_late_start() {
        // A late start reseeds from `start - lookback`
        let data = wave(40);
        let full = rsi(&data[13..], 7).unwrap();
        let mut out = vec![0.0; 40];
        let range = rsi_raw(&Settings::DEFAULT, 20, 39, &data, 7, &mut out).unwrap();
        assert_eq!(range, OutputRange::new(20, 20));
        for k in 0..range.len {
            assert!(approx_eq(out[k], full[7 + k], EPSILON));
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let result = rsi(&[1.0_f64, 2.0, 3.0], 5).unwrap();
        assert!(result.iter().all(|v| v.is_nan()));
    }

    #[cfg(not(feature = "no-range-check"))]
    #[test]
    fn test_rsi_zero_period() {
        assert!(matches!(
            rsi(&wave(20), 0),
            Err(Error::Compute(RetCode::BadParam { .. }))
        ));
    }

    // ==================== CMO Tests ====================

    #[test]
    fn test_cmo_relates_to_rsi() {
        let data = wave(50);
        let r = rsi(&data, 8).unwrap();
        let c = cmo(&data, 8).unwrap();
        for i in 8..data.len() {
            assert!(approx_eq(r[i], (c[i] + 100.0) / 2.0, 1e-9));
        }
    }

    #[test]
    fn test_cmo_bounds() {
        let rising: Vec<f64> = (0..20).map(|i| i as f64 * 2.0).collect();
        let falling: Vec<f64> = rising.iter().rev().copied().collect();
        for &v in &cmo(&rising, 4).unwrap()[4..] {
            assert!(approx_eq(v, 100.0, EPSILON));
        }
        for &v in &cmo(&falling, 4).unwrap()[4..] {
            assert!(approx_eq(v, -100.0, EPSILON));
        }
    }

    #[test]
    fn test_cmo_period_one_passes_through() {
        let data = wave(12);
        assert_eq!(cmo(&data, 1).unwrap()[1..], data[1..]);
    }

    #[test]
    fn test_cmo_unstable_period_matches_tail() {
        let data = wave(60);
        let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Cmo, 3);
        let plain = cmo(&data, 6).unwrap();
        let delayed = cmo_with(&settings, &data, 6).unwrap();
        assert_eq!(count_nan_prefix(&delayed), 9);
        for i in 9..data.len() {
            assert!(approx_eq(delayed[i], plain[i], EPSILON));
        }
    }

    #[test]
    fn test_cmo_f32() {
        let data: Vec<f32> = (0..30).map(|i| 10.0 + (i % 4) as f32).collect();
        let result = cmo(&data, 5).unwrap();
        assert_eq!(count_nan_prefix(&result), 5);
        assert!(result[5..].iter().all(|v| (-100.0..=100.0).contains(v)));
    }
}
