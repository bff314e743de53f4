//! T3 (Tillson T3 Moving Average) indicator.
//!
//! T3 runs six EMAs in cascade and blends the last four with coefficients
//! derived from a volume factor `v`. The result is smoother than an EMA of
//! the same period with far less lag than the six-fold cascade alone.
//!
//! # Formula
//!
//! ```text
//! e1 = EMA(Price), e2 = EMA(e1), ..., e6 = EMA(e5)
//! c1 = -v^3
//! c2 = 3v^2 + 3v^3
//! c3 = -6v^2 - 3v - 3v^3
//! c4 = 1 + 3v + v^3 + 3v^2
//! T3 = c1*e6 + c2*e5 + c3*e4 + c4*e3
//! ```
//!
//! Every stage is seeded with the mean of its first `period` inputs, so the
//! cascade is primed after `6 * (period - 1)` bars.
//!
//! # Lookback
//!
//! `6 * (period - 1) + unstable(T3)`.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::t3::T3;
//!
//! let data: Vec<f64> = (0..60).map(f64::from).collect();
//! let result = T3::new().period(5).vfactor(0.7).compute(&data).unwrap();
//!
//! assert!(result[23].is_nan());
//! assert!(result[24].is_finite());
//! ```

use crate::error::{RawResult, Result};
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, check_real, OutputRange, Window};

/// Default T3 period.
pub const DEFAULT_PERIOD: usize = 5;

/// Default volume factor.
pub const DEFAULT_VFACTOR: f64 = 0.7;

/// Computes the lookback period for T3 under default settings.
#[inline]
#[must_use]
pub const fn t3_lookback(period: usize) -> usize {
    t3_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the lookback period for T3 under `settings`.
#[inline]
#[must_use]
pub const fn t3_lookback_with(settings: &Settings, period: usize) -> usize {
    period
        .saturating_sub(1)
        .saturating_mul(6)
        .saturating_add(settings.unstable_period(UnstableFunc::T3))
}

/// The four blend coefficients for volume factor `v`.
fn t3_coefficients<T: SeriesElement>(vfactor: T) -> RawResult<[T; 4]> {
    let three = T::from_f64(3.0)?;
    let six = T::from_f64(6.0)?;
    let v2 = vfactor * vfactor;
    let c1 = -(v2 * vfactor);
    let c2 = three * (v2 - c1);
    let c3 = -six * v2 - three * (vfactor - c1);
    let c4 = T::one() + three * vfactor - c1 + three * v2;
    Ok([c1, c2, c3, c4])
}

/// Computes T3 over `input[start_idx..=end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000` or `vfactor` outside `0..=1`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn t3_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    period: usize,
    vfactor: f64,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("period", period, 2)?;
    check_real("vfactor", vfactor, 0.0, 1.0, "must be in 0..=1")?;

    let lookback = t3_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    check_output(output.len(), end_idx - start_idx + 1)?;

    let period_t = T::from_usize(period)?;
    let k = T::two() / (period_t + T::one());
    let one_minus_k = T::one() - k;
    let mut today = start_idx - lookback;

    // e[0] is the first EMA; stage `s` is seeded with the mean of its first
    // `period` values while stages before it keep running.
    let mut e = [T::zero(); 6];
    let mut total = T::zero();
    for &value in &input[today..today + period] {
        total = total + value;
    }
    today += period;
    e[0] = total / period_t;

    for stage in 1..6 {
        let mut total = e[stage - 1];
        for _ in 1..period {
            let mut feed = input[today];
            today += 1;
            for level in e.iter_mut().take(stage) {
                *level = k * feed + one_minus_k * *level;
                feed = *level;
            }
            total = total + feed;
        }
        e[stage] = total / period_t;
    }

    let advance = |e: &mut [T; 6], value: T| {
        let mut feed = value;
        for level in e.iter_mut() {
            *level = k * feed + one_minus_k * *level;
            feed = *level;
        }
    };

    while today <= start_idx {
        advance(&mut e, input[today]);
        today += 1;
    }

    let [c1, c2, c3, c4] = t3_coefficients(T::from_f64(vfactor)?)?;
    let blend = |e: &[T; 6]| c1 * e[5] + c2 * e[4] + c3 * e[3] + c4 * e[2];

    output[0] = blend(&e);
    let mut out_idx = 1;
    while today <= end_idx {
        advance(&mut e, input[today]);
        today += 1;
        output[out_idx] = blend(&e);
        out_idx += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Configuration for T3.
///
/// ```
/// use ta_smooth::indicators::t3::T3;
///
/// let config = T3::default();
/// assert_eq!(config.get_period(), 5);
/// assert_eq!(config.get_vfactor(), 0.7);
/// assert_eq!(config.lookback(), 24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct T3 {
    period: usize,
    vfactor: f64,
    settings: Settings,
}

impl Default for T3 {
    /// Period 5, volume factor 0.7.
    fn default() -> Self {
        Self::new()
    }
}

impl T3 {
    /// Creates a T3 configuration with period 5 and volume factor 0.7.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            vfactor: DEFAULT_VFACTOR,
            settings: Settings::DEFAULT,
        }
    }

    /// Sets the EMA period of every stage.
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Sets the volume factor.
    #[must_use]
    pub const fn vfactor(mut self, vfactor: f64) -> Self {
        self.vfactor = vfactor;
        self
    }

    /// Sets the settings used for the unstable period.
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

    /// Returns the volume factor.
    #[must_use]
    pub const fn get_vfactor(&self) -> f64 {
        self.vfactor
    }

    /// Returns the lookback for this configuration.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        t3_lookback_with(&self.settings, self.period)
    }

    /// Computes T3 for `data`.
    ///
    /// # Errors
    ///
    /// - `Error::AllNaN` if the input has no valid sample
    /// - `Error::Compute(RetCode::BadParam)` for an out-of-range parameter
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<Vec<T>> {
        let mut output = vec![T::nan(); data.len()];
        let Some(window) = Window::prepare("t3", &[data], self.lookback())? else {
            return Ok(output);
        };

        let range = t3_raw(
            &self.settings,
            0,
            window.end_idx,
            &data[window.begin..],
            self.period,
            self.vfactor,
            &mut output[window.offset..],
        )?;
        window.finish(range)?;
        Ok(output)
    }
}

/// Computes T3 with explicit parameters under default settings.
///
/// # Errors
///
/// See [`T3::compute`].
pub fn t3<T: SeriesElement>(data: &[T], period: usize, vfactor: f64) -> Result<Vec<T>> {
    T3::new().period(period).vfactor(vfactor).compute(data)
}
