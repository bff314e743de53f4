//! Absolute and Percentage Price Oscillators (APO, PPO).
//!
//! Both oscillators compare a fast and a slow moving average of the same
//! series, using any [`MaType`]:
//!
//! ```text
//! APO = MA(fast) - MA(slow)
//! PPO = (MA(fast) - MA(slow)) / MA(slow) * 100      (0 when MA(slow) is ~0)
//! ```
//!
//! The periods are swapped when `slow < fast`. The lookback is that of the
//! slower average.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::apo::PriceOscillator;
//! use ta_smooth::indicators::ma::MaType;
//!
//! let data: Vec<f64> = (1..=40).map(f64::from).collect();
//! let osc = PriceOscillator::new().fast_period(3).slow_period(5).ma_type(MaType::Sma);
//!
//! let apo = osc.apo(&data).unwrap();
//! // SMA(3) leads SMA(5) by one bar on a unit-slope line
//! assert!((apo[4] - 1.0).abs() < 1e-12);
//! ```

use crate::error::{RawResult, Result};
use crate::indicators::ma::{ma_lookback_with, ma_raw, MaType};
use crate::settings::Settings;
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Default fast period.
pub const DEFAULT_FAST_PERIOD: usize = 12;

/// Default slow period.
pub const DEFAULT_SLOW_PERIOD: usize = 26;

/// Computes the APO/PPO lookback under default settings.
#[inline]
#[must_use]
pub const fn apo_lookback(fast_period: usize, slow_period: usize, ma_type: MaType) -> usize {
    apo_lookback_with(&Settings::DEFAULT, fast_period, slow_period, ma_type)
}

/// Computes the APO/PPO lookback under `settings`.
#[inline]
#[must_use]
pub const fn apo_lookback_with(
    settings: &Settings,
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> usize {
    let slowest = if slow_period > fast_period {
        slow_period
    } else {
        fast_period
    };
    ma_lookback_with(settings, slowest, ma_type)
}

/// Shared body of APO and PPO.
#[allow(clippy::too_many_arguments)]
fn oscillator<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    percentage: bool,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("fast_period", fast_period, 2)?;
    check_period("slow_period", slow_period, 2)?;

    let (fast_period, slow_period) = if slow_period < fast_period {
        (slow_period, fast_period)
    } else {
        (fast_period, slow_period)
    };
    let lookback = apo_lookback_with(settings, fast_period, slow_period, ma_type);
    if start_idx.max(lookback) > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx.max(lookback) + 1)?;

    let mut fast = vec![T::zero(); end_idx - start_idx + 1];
    let fast_range = ma_raw(settings, start_idx, end_idx, input, fast_period, ma_type, &mut fast)?;
    let slow_range = ma_raw(settings, start_idx, end_idx, input, slow_period, ma_type, output)?;
    if slow_range.is_empty() {
        return Ok(OutputRange::EMPTY);
    }

    let shift = slow_range.begin - fast_range.begin;
    let hundred = T::hundred();
    for (out, &f) in output[..slow_range.len].iter_mut().zip(&fast[shift..]) {
        let slow = *out;
        *out = if !percentage {
            f - slow
        } else if slow.is_near_zero() {
            T::zero()
        } else {
            (f - slow) / slow * hundred
        };
    }

    Ok(slow_range)
}

/// Computes APO over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if either period is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
#[allow(clippy::too_many_arguments)]
pub fn apo_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> RawResult<OutputRange> {
    oscillator(
        settings,
        start_idx,
        end_idx,
        input,
        fast_period,
        slow_period,
        ma_type,
        false,
        output,
    )
}

/// Computes PPO over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// Same as [`apo_raw`].
#[allow(clippy::too_many_arguments)]
pub fn ppo_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> RawResult<OutputRange> {
    oscillator(
        settings,
        start_idx,
        end_idx,
        input,
        fast_period,
        slow_period,
        ma_type,
        true,
        output,
    )
}

/// Configuration shared by APO and PPO.
///
/// ```
/// use ta_smooth::indicators::apo::PriceOscillator;
/// use ta_smooth::indicators::ma::MaType;
///
/// let config = PriceOscillator::default();
/// assert_eq!(config.get_fast_period(), 12);
/// assert_eq!(config.get_slow_period(), 26);
/// assert_eq!(config.get_ma_type(), MaType::Sma);
/// assert_eq!(config.lookback(), 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceOscillator {
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
    settings: Settings,
}

impl Default for PriceOscillator {
    /// 12/26 simple moving averages.
    fn default() -> Self {
        Self::new()
    }
}

impl PriceOscillator {
    /// Creates a 12/26 SMA configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            ma_type: MaType::Sma,
            settings: Settings::DEFAULT,
        }
    }

    /// Sets the fast period.
    #[must_use]
    pub const fn fast_period(mut self, period: usize) -> Self {
        self.fast_period = period;
        self
    }

    /// Sets the slow period.
    #[must_use]
    pub const fn slow_period(mut self, period: usize) -> Self {
        self.slow_period = period;
        self
    }

    /// Sets the moving average kind of both lines.
    #[must_use]
    pub const fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    /// Sets the settings passed to both averages.
    #[must_use]
    pub const fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the fast period.
    #[must_use]
    pub const fn get_fast_period(&self) -> usize {
        self.fast_period
    }

    /// Returns the slow period.
    #[must_use]
    pub const fn get_slow_period(&self) -> usize {
        self.slow_period
    }

    /// Returns the moving average kind.
    #[must_use]
    pub const fn get_ma_type(&self) -> MaType {
        self.ma_type
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        apo_lookback_with(&self.settings, self.fast_period, self.slow_period, self.ma_type)
    }

    fn run<T: SeriesElement>(&self, data: &[T], percentage: bool) -> Result<Vec<T>> {
        let mut output = vec![T::nan(); data.len()];
        let name = if percentage { "ppo" } else { "apo" };
        let Some(window) = Window::prepare(name, &[data], self.lookback())? else {
            return Ok(output);
        };

        let range = oscillator(
            &self.settings,
            0,
            window.end_idx,
            &data[window.begin..],
            self.fast_period,
            self.slow_period,
            self.ma_type,
            percentage,
            &mut output[window.offset..],
        )?;
        window.finish(range)?;
        Ok(output)
    }

    /// Computes the Absolute Price Oscillator of `data`.
    ///
    /// # Errors
    ///
    /// - `Error::AllNaN` if the input has no valid sample
    /// - `Error::Compute(RetCode::BadParam)` if a period is outside `2..=100000`
    pub fn apo<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<T>> {
        self.run(data, false)
    }

    /// Computes the Percentage Price Oscillator of `data`.
    ///
    /// # Errors
    ///
    /// See [`PriceOscillator::apo`].
    pub fn ppo<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<T>> {
        self.run(data, true)
    }
}

/// Computes APO under default settings.
///
/// # Errors
///
/// See [`PriceOscillator::apo`].
pub fn apo<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    PriceOscillator::new()
        .fast_period(fast_period)
        .slow_period(slow_period)
        .ma_type(ma_type)
        .apo(data)
}

/// Computes PPO under default settings.
///
/// # Errors
///
/// See [`PriceOscillator::apo`].
pub fn ppo<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    PriceOscillator::new()
        .fast_period(fast_period)
        .slow_period(slow_period)
        .ma_type(ma_type)
        .ppo(data)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]

    use super::*;
    #[cfg(not(feature = "no-range-check"))]
    use crate::error::{Error, RetCode};
    use crate::indicators::ma::ma;
    use crate::utils::{approx_eq, count_nan_prefix};

    const EPSILON: f64 = 1e-10;

    fn sample() -> Vec<f64> {
        (0..100)
            .map(|i| 30.0 + (i as f64 * 0.23).sin() * 5.0 + i as f64 * 0.05)
            .collect()
    }

    #[test]
    fn test_apo_lookback() {
        assert_eq!(apo_lookback(12, 26, MaType::Sma), 25);
        assert_eq!(apo_lookback(26, 12, MaType::Sma), 25);
        assert_eq!(apo_lookback(12, 26, MaType::Dema), 50);
    }

    #[test]
    fn test_apo_is_fast_minus_slow() {
        let data = sample();
        for kind in [MaType::Sma, MaType::Wma, MaType::Trima] {
            let result = apo(&data, 5, 11, kind).unwrap();
            let fast = ma(&data, 5, kind).unwrap();
            let slow = ma(&data, 11, kind).unwrap();
            let lookback = apo_lookback(5, 11, kind);
            assert_eq!(count_nan_prefix(&result), lookback);
            for i in lookback..data.len() {
                assert!(approx_eq(result[i], fast[i] - slow[i], EPSILON));
            }
        }
    }

    #[test]
    fn test_ppo_is_relative_apo() {
        let data = sample();
        let apo_values = apo(&data, 4, 9, MaType::Sma).unwrap();
        let ppo_values = ppo(&data, 4, 9, MaType::Sma).unwrap();
        let slow = ma(&data, 9, MaType::Sma).unwrap();
        for i in 8..data.len() {
            assert!(approx_eq(ppo_values[i], apo_values[i] / slow[i] * 100.0, 1e-9));
        }
    }

    #[test]
    fn test_ppo_zero_slow_average() {
        let data = vec![0.0_f64; 20];
        let result = ppo(&data, 3, 6, MaType::Sma).unwrap();
        for &v in &result[5..] {
            assert_eq!(v, 0.0);
        }
    }

    #[test]
    fn test_apo_swapped_periods() {
        let data = sample();
        let a = apo(&data, 5, 11, MaType::Ema).unwrap();
        let b = apo(&data, 11, 5, MaType::Ema).unwrap();
        for i in 10..data.len() {
            assert_eq!(a[i], b[i]);
        }
    }

    #[cfg(not(feature = "no-range-check"))]
    #[test]
    fn test_apo_period_too_small() {
        assert!(matches!(
            apo(&sample(), 1, 5, MaType::Sma),
            Err(Error::Compute(RetCode::BadParam { param: "fast_period", .. }))
        ));
    }
}
