//! Generic moving average dispatcher (MA) and Moving Average with Variable Period (MAVP).
//!
//! Every indicator with a configurable smoothing kind (MACDEXT, APO, PPO,
//! MAVP) goes through [`ma_raw`] so that the [`MaType`] selector means the
//! same thing everywhere.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::ma::{MaType, MovingAverage};
//!
//! let data: Vec<f64> = (1..=10).map(f64::from).collect();
//! let result = MovingAverage::new()
//!     .period(3)
//!     .ma_type(MaType::Wma)
//!     .compute(&data)
//!     .unwrap();
//!
//! assert!(result[1].is_nan());
//! assert!((result[2] - 14.0 / 6.0).abs() < 1e-12);
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{RawResult, Result, RetCode};
use crate::indicators::dema::{dema_lookback_with, dema_raw};
use crate::indicators::ema::{ema_lookback_with, ema_raw};
use crate::indicators::kama::{kama_lookback_with, kama_raw};
use crate::indicators::mama::{mama_lookback_with, mama_raw, DEFAULT_FAST_LIMIT, DEFAULT_SLOW_LIMIT};
use crate::indicators::sma::{sma_lookback, sma_raw};
use crate::indicators::t3::{t3_lookback_with, t3_raw, DEFAULT_VFACTOR};
use crate::indicators::tema::{tema_lookback_with, tema_raw};
use crate::indicators::trima::{trima_lookback, trima_raw};
use crate::indicators::wma::{wma_lookback, wma_raw};
use crate::settings::Settings;
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window, MAX_PERIOD};

/// Default period of the generic moving average.
pub const DEFAULT_PERIOD: usize = 30;

/// Moving average kind, numbered like TA-Lib's `TA_MAType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum MaType {
    /// Simple moving average.
    #[default]
    Sma = 0,
    /// Exponential moving average.
    Ema = 1,
    /// Weighted moving average.
    Wma = 2,
    /// Double exponential moving average.
    Dema = 3,
    /// Triple exponential moving average.
    Tema = 4,
    /// Triangular moving average.
    Trima = 5,
    /// Kaufman adaptive moving average.
    Kama = 6,
    /// MESA adaptive moving average (limits 0.5 and 0.05).
    Mama = 7,
    /// Tillson T3 (volume factor 0.7).
    T3 = 8,
}

impl MaType {
    /// Every kind in selector order.
    pub const ALL: [Self; 9] = [
        Self::Sma,
        Self::Ema,
        Self::Wma,
        Self::Dema,
        Self::Tema,
        Self::Trima,
        Self::Kama,
        Self::Mama,
        Self::T3,
    ];

    /// Returns the TA-Lib name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sma => "SMA",
            Self::Ema => "EMA",
            Self::Wma => "WMA",
            Self::Dema => "DEMA",
            Self::Tema => "TEMA",
            Self::Trima => "TRIMA",
            Self::Kama => "KAMA",
            Self::Mama => "MAMA",
            Self::T3 => "T3",
        }
    }
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for MaType {
    type Error = RetCode;

    fn try_from(value: u8) -> RawResult<Self> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(RetCode::BadParam {
                param: "ma_type",
                reason: "must be in 0..=8",
            })
    }
}

/// Computes the lookback of the `ma_type` moving average under default settings.
#[inline]
#[must_use]
pub const fn ma_lookback(period: usize, ma_type: MaType) -> usize {
    ma_lookback_with(&Settings::DEFAULT, period, ma_type)
}

/// Computes the lookback of the `ma_type` moving average under `settings`.
///
/// A period of 1 is a plain copy with lookback 0 whatever the kind.
#[must_use]
pub const fn ma_lookback_with(settings: &Settings, period: usize, ma_type: MaType) -> usize {
    if period <= 1 {
        return 0;
    }
    match ma_type {
        MaType::Sma => sma_lookback(period),
        MaType::Ema => ema_lookback_with(settings, period),
        MaType::Wma => wma_lookback(period),
        MaType::Dema => dema_lookback_with(settings, period),
        MaType::Tema => tema_lookback_with(settings, period),
        MaType::Trima => trima_lookback(period),
        MaType::Kama => kama_lookback_with(settings, period),
        MaType::Mama => mama_lookback_with(settings),
        MaType::T3 => t3_lookback_with(settings, period),
    }
}

/// Computes the `ma_type` moving average over `input[start_idx..=end_idx]`.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn ma_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 1)?;

    if period == 1 {
        let count = end_idx - start_idx + 1;
        check_output(output.len(), count)?;
        output[..count].copy_from_slice(&input[start_idx..=end_idx]);
        return Ok(OutputRange::new(start_idx, count));
    }

    match ma_type {
        MaType::Sma => sma_raw(start_idx, end_idx, input, period, output),
        MaType::Ema => ema_raw(settings, start_idx, end_idx, input, period, output),
        MaType::Wma => wma_raw(start_idx, end_idx, input, period, output),
        MaType::Dema => dema_raw(settings, start_idx, end_idx, input, period, output),
        MaType::Tema => tema_raw(settings, start_idx, end_idx, input, period, output),
        MaType::Trima => trima_raw(start_idx, end_idx, input, period, output),
        MaType::Kama => kama_raw(settings, start_idx, end_idx, input, period, output),
        MaType::Mama => {
            let mut fama = vec![T::zero(); end_idx - start_idx + 1];
            mama_raw(
                settings,
                start_idx,
                end_idx,
                input,
                DEFAULT_FAST_LIMIT,
                DEFAULT_SLOW_LIMIT,
                output,
                &mut fama,
            )
        }
        MaType::T3 => t3_raw(settings, start_idx, end_idx, input, period, DEFAULT_VFACTOR, output),
    }
}

/// Configuration for the generic moving average.
///
/// ```
/// use ta_smooth::indicators::ma::{MaType, MovingAverage};
///
/// let config = MovingAverage::default();
/// assert_eq!(config.get_period(), 30);
/// assert_eq!(config.get_ma_type(), MaType::Sma);
/// assert_eq!(config.lookback(), 29);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverage {
    period: usize,
    ma_type: MaType,
    settings: Settings,
}

impl Default for MovingAverage {
    /// Period 30, simple moving average.
    fn default() -> Self {
        Self::new()
    }
}

impl MovingAverage {
    /// Creates a 30-period SMA configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            ma_type: MaType::Sma,
            settings: Settings::DEFAULT,
        }
    }

    /// Sets the period.
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the moving average kind.
    #[must_use]
    pub const fn ma_type(mut self, ma_type: MaType) -> Self {
        self.ma_type = ma_type;
        self
    }

    /// Sets the settings passed down to the selected average.
    #[must_use]
    pub const fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the period.
    #[must_use]
    pub const fn get_period(&self) -> usize {
        self.period
    }

    /// Returns the moving average kind.
    #[must_use]
    pub const fn get_ma_type(&self) -> MaType {
        self.ma_type
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        ma_lookback_with(&self.settings, self.period, self.ma_type)
    }

    /// Computes the moving average of `data`.
    ///
    /// # Errors
    ///
    /// - `Error::AllNaN` if the input has no valid sample
    /// - `Error::Compute(RetCode::BadParam)` if the period is out of range
    ///   for the selected kind
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<T>> {
        let mut output = vec![T::nan(); data.len()];
        let Some(window) = Window::prepare("ma", &[data], self.lookback())? else {
            return Ok(output);
        };

        let range = ma_raw(
            &self.settings,
            0,
            window.end_idx,
            &data[window.begin..],
            self.period,
            self.ma_type,
            &mut output[window.offset..],
        )?;
        window.finish(range)?;
        Ok(output)
    }
}

/// Computes the `ma_type` moving average under default settings.
///
/// Every indicator with a selectable average kind routes through here, so a
/// given `(period, ma_type)` means the same thing everywhere. MAMA uses its
/// default limits and T3 its default volume factor.
///
/// # Errors
///
/// See [`MovingAverage::compute`].
///
/// # Example
///
/// ```
/// use ta_smooth::indicators::ma::{ma, ma_lookback, MaType};
///
/// let data: Vec<f64> = (1..=40).map(f64::from).collect();
///
/// for kind in MaType::ALL {
///     let result = ma(&data, 5, kind).unwrap();
///     assert_eq!(result.len(), data.len());
///     assert!(!result[ma_lookback(5, kind)].is_nan());
/// }
///
/// // A period of 1 is a copy whatever the kind
/// assert_eq!(ma(&data, 1, MaType::Kama).unwrap(), data);
/// ```
pub fn ma<T: SeriesElement>(data: &[T], period: usize, ma_type: MaType) -> Result<Vec<T>> {
    MovingAverage::new().period(period).ma_type(ma_type).compute(data)
}

// =============================================================================
// MAVP
// =============================================================================

/// Computes the lookback of MAVP under default settings.
#[inline]
#[must_use]
pub const fn mavp_lookback(max_period: usize, ma_type: MaType) -> usize {
    ma_lookback(max_period, ma_type)
}

/// Computes the lookback of MAVP under `settings`.
#[inline]
#[must_use]
pub const fn mavp_lookback_with(settings: &Settings, max_period: usize, ma_type: MaType) -> usize {
    ma_lookback_with(settings, max_period, ma_type)
}

/// Clamps a per-bar period to `[min_period, max_period]`, truncating fractions.
fn clamp_period<T: SeriesElement>(value: T, min_period: usize, max_period: usize) -> RawResult<usize> {
    if value.is_nan() {
        return Err(RetCode::BadParam {
            param: "periods",
            reason: "must not contain NaN inside the computed range",
        });
    }
    let period = value.to_usize().unwrap_or(if value < T::zero() { 0 } else { usize::MAX });
    Ok(period.clamp(min_period, max_period))
}

/// Computes MAVP over `input[start_idx..=end_idx]`.
///
/// Output `i` is the `ma_type` average with period `periods[start + i]`,
/// clamped to `[min_period, max_period]`. Each distinct period is computed
/// once over the whole range.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if either bound is outside `2..=100000` or a
///   period in range is NaN
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
#[allow(clippy::too_many_arguments)]
pub fn mavp_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    periods: &[T],
    min_period: usize,
    max_period: usize,
    ma_type: MaType,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len(), periods.len()])?;
    check_period("min_period", min_period, 2)?;
    check_period("max_period", max_period, 2)?;

    let lookback = mavp_lookback_with(settings, max_period, ma_type);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    let mut pending = periods[start_idx..=end_idx]
        .iter()
        .map(|&p| clamp_period(p, min_period, max_period.max(min_period)).map(Some))
        .collect::<RawResult<Vec<_>>>()?;

    let mut scratch = vec![T::zero(); count];
    for i in 0..count {
        let Some(period) = pending[i] else {
            continue;
        };
        let range = ma_raw(settings, start_idx, end_idx, input, period, ma_type, &mut scratch)?;
        if range.begin != start_idx || range.len != count {
            return Err(RetCode::Internal {
                context: "mavp: moving average range disagrees with max period lookback",
            });
        }
        log::trace!("mavp: period {period} filled from output {i}");
        for (slot, (out, &value)) in pending[i..]
            .iter_mut()
            .zip(output[i..count].iter_mut().zip(&scratch[i..]))
        {
            if *slot == Some(period) {
                *slot = None;
                *out = value;
            }
        }
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes MAVP under `settings`.
///
/// # Errors
///
/// - `Error::LengthMismatch` if `data` and `periods` differ in length
/// - `Error::AllNaN` if either input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` for an out-of-range bound
pub fn mavp_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    periods: &[T],
    min_period: usize,
    max_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); data.len()];
    let lookback = mavp_lookback_with(settings, max_period.min(MAX_PERIOD), ma_type);
    let Some(window) = Window::prepare("mavp", &[data, periods], lookback)? else {
        return Ok(output);
    };

    let range = mavp_raw(
        settings,
        0,
        window.end_idx,
        &data[window.begin..],
        &periods[window.begin..],
        min_period,
        max_period,
        ma_type,
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}

/// Computes MAVP under default settings.
///
/// # Errors
///
/// See [`mavp_with`].
pub fn mavp<T: SeriesElement>(
    data: &[T],
    periods: &[T],
    min_period: usize,
    max_period: usize,
    ma_type: MaType,
) -> Result<Vec<T>> {
    mavp_with(&Settings::DEFAULT, data, periods, min_period, max_period, ma_type)
}
