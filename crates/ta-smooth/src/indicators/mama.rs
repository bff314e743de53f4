//! MESA Adaptive Moving Average (MAMA) and Following Adaptive MA (FAMA).
//!
//! John Ehlers' MAMA measures the rate of change of the dominant cycle phase
//! with a Hilbert transform and uses it to pick the EMA smoothing constant
//! for every bar: fast while the phase is stalling (a trend), slow while it
//! rotates quickly (a cycle). FAMA is the same average applied once more at
//! half the rate.
//!
//! # Algorithm
//!
//! 1. Smooth price with a 4-bar WMA.
//! 2. Run the smoothed price through a chain of Hilbert transforms
//!    (detrender, quadrature, in-phase and quadrature advances). Each
//!    transform keeps separate state for odd and even bars.
//! 3. Phase = atan(Q1 / I1); delta phase drives
//!    `alpha = clamp(fast_limit / delta_phase, slow_limit, fast_limit)`.
//! 4. `MAMA = alpha * price + (1 - alpha) * MAMA`,
//!    `FAMA = alpha/2 * MAMA + (1 - alpha/2) * FAMA`.
//! 5. Track the dominant cycle period for the next bar's transform gain.
//!
//! # Lookback
//!
//! `32 + unstable(MAMA)`.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::mama::Mama;
//!
//! let data: Vec<f64> = (0..100).map(|i| 100.0 + (i as f64 * 0.2).sin() * 5.0).collect();
//! let out = Mama::new().fast_limit(0.5).slow_limit(0.05).compute(&data).unwrap();
//!
//! assert_eq!(out.len(), 100);
//! assert!(out.mama[31].is_nan());
//! assert!(out.mama[32].is_finite());
//! assert!(out.fama[32].is_finite());
//! ```

use crate::error::{RawResult, Result};
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_range, check_real, OutputRange, Window};

/// Bars consumed by the price smoother and the Hilbert chain.
const MAMA_WARMUP: usize = 32;

/// Default fast limit.
pub const DEFAULT_FAST_LIMIT: f64 = 0.5;

/// Default slow limit.
pub const DEFAULT_SLOW_LIMIT: f64 = 0.05;

/// Returns the lookback period for MAMA under default settings.
#[inline]
#[must_use]
pub const fn mama_lookback() -> usize {
    mama_lookback_with(&Settings::DEFAULT)
}

/// Returns the lookback period for MAMA under `settings`.
#[inline]
#[must_use]
pub const fn mama_lookback_with(settings: &Settings) -> usize {
    MAMA_WARMUP.saturating_add(settings.unstable_period(UnstableFunc::Mama))
}

/// Output of MAMA: the adaptive average and its follower.
#[derive(Debug, Clone, PartialEq)]
pub struct MamaOutput<T> {
    /// MESA Adaptive Moving Average.
    pub mama: Vec<T>,
    /// Following Adaptive Moving Average.
    pub fama: Vec<T>,
}

impl<T> MamaOutput<T> {
    /// Returns the length of the output series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mama.len()
    }

    /// Returns true if the output is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mama.is_empty()
    }
}

/// Odd- or even-bar state of one Hilbert transform stage.
#[derive(Debug, Clone, Copy, Default)]
struct HilbertPhase<T> {
    ring: [T; 3],
    prev: T,
    prev_input: T,
}

impl<T: SeriesElement> HilbertPhase<T> {
    fn transform(&mut self, input: T, idx: usize, coeff: &HilbertCoefficients<T>, gain: T) -> T {
        let scaled = coeff.a * input;
        let mut value = scaled - self.ring[idx];
        self.ring[idx] = scaled;
        value = value - self.prev;
        self.prev = coeff.b * self.prev_input;
        value = value + self.prev;
        self.prev_input = input;
        value * gain
    }
}

/// One Hilbert transform stage with separate odd and even bar state.
#[derive(Debug, Clone, Copy, Default)]
struct HilbertStage<T> {
    odd: HilbertPhase<T>,
    even: HilbertPhase<T>,
}

impl<T: SeriesElement> HilbertStage<T> {
    fn apply(
        &mut self,
        even_bar: bool,
        input: T,
        idx: usize,
        coeff: &HilbertCoefficients<T>,
        gain: T,
    ) -> T {
        if even_bar {
            self.even.transform(input, idx, coeff, gain)
        } else {
            self.odd.transform(input, idx, coeff, gain)
        }
    }
}

struct HilbertCoefficients<T> {
    a: T,
    b: T,
}

/// 4-bar WMA (weights 1..4, divisor 10) of the raw price.
struct PriceSmoother<T> {
    sub: T,
    sum: T,
    trailing_value: T,
    trailing_idx: usize,
    four: T,
    tenth: T,
}

impl<T: SeriesElement> PriceSmoother<T> {
    fn smooth(&mut self, input: &[T], price: T) -> T {
        self.sub = self.sub + price - self.trailing_value;
        self.sum = self.sum + price * self.four;
        self.trailing_value = input[self.trailing_idx];
        self.trailing_idx += 1;
        let smoothed = self.sum * self.tenth;
        self.sum = self.sum - self.sub;
        smoothed
    }
}

/// Computes MAMA and FAMA over `input[start_idx..=end_idx]`.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if either limit is outside `0.01..=0.99`
/// - `RetCode::BufferTooSmall` if an output cannot hold the result
#[allow(clippy::too_many_arguments, clippy::too_many_lines)]
pub fn mama_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast_limit: f64,
    slow_limit: f64,
    out_mama: &mut [T],
    out_fama: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_real("fast_limit", fast_limit, 0.01, 0.99, "must be in 0.01..=0.99")?;
    check_real("slow_limit", slow_limit, 0.01, 0.99, "must be in 0.01..=0.99")?;

    let lookback = mama_lookback_with(settings);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(out_mama.len(), count)?;
    check_output(out_fama.len(), count)?;

    let fast_limit = T::from_f64(fast_limit)?;
    let slow_limit = T::from_f64(slow_limit)?;
    let coeff = HilbertCoefficients {
        a: T::from_f64(0.0962)?,
        b: T::from_f64(0.5769)?,
    };
    let rad_to_deg = T::from_f64(180.0 / std::f64::consts::PI)?;
    let c = |v: f64| T::from_f64(v);
    let (c0_075, c0_54, c0_2, c0_8) = (c(0.075)?, c(0.54)?, c(0.2)?, c(0.8)?);
    let (c1_5, c0_67, c6, c50, c360) = (c(1.5)?, c(0.67)?, c(6.0)?, c(50.0)?, c(360.0)?);
    let half = c(0.5)?;

    let mut today = start_idx - lookback;
    let mut smoother = PriceSmoother {
        sub: T::zero(),
        sum: T::zero(),
        trailing_value: T::zero(),
        trailing_idx: today,
        four: c(4.0)?,
        tenth: c(0.1)?,
    };
    for weight in 1..=3 {
        let price = input[today];
        today += 1;
        smoother.sub = smoother.sub + price;
        smoother.sum = smoother.sum + price * T::from_usize(weight)?;
    }
    for _ in 0..9 {
        let price = input[today];
        today += 1;
        smoother.smooth(input, price);
    }

    let mut detrender_stage = HilbertStage::default();
    let mut q1_stage = HilbertStage::default();
    let mut ji_stage = HilbertStage::default();
    let mut jq_stage = HilbertStage::default();
    let mut hilbert_idx = 0;

    let mut period = T::zero();
    let (mut prev_i2, mut prev_q2) = (T::zero(), T::zero());
    let (mut re, mut im) = (T::zero(), T::zero());
    let (mut mama, mut fama) = (T::zero(), T::zero());
    let (mut i1_odd_prev3, mut i1_even_prev3) = (T::zero(), T::zero());
    let (mut i1_odd_prev2, mut i1_even_prev2) = (T::zero(), T::zero());
    let mut prev_phase = T::zero();
    let mut out_idx = 0;

    while today <= end_idx {
        let gain = c0_075 * period + c0_54;
        let price = input[today];
        let smoothed = smoother.smooth(input, price);

        let even_bar = today % 2 == 0;
        let detrender = detrender_stage.apply(even_bar, smoothed, hilbert_idx, &coeff, gain);
        let q1 = q1_stage.apply(even_bar, detrender, hilbert_idx, &coeff, gain);
        let i1_prev3 = if even_bar { i1_even_prev3 } else { i1_odd_prev3 };
        let ji = ji_stage.apply(even_bar, i1_prev3, hilbert_idx, &coeff, gain);
        let jq = jq_stage.apply(even_bar, q1, hilbert_idx, &coeff, gain);

        if even_bar {
            hilbert_idx = (hilbert_idx + 1) % 3;
            i1_odd_prev3 = i1_odd_prev2;
            i1_odd_prev2 = detrender;
        } else {
            i1_even_prev3 = i1_even_prev2;
            i1_even_prev2 = detrender;
        }
        let q2 = c0_2 * (q1 + ji) + c0_8 * prev_q2;
        let i2 = c0_2 * (i1_prev3 - jq) + c0_8 * prev_i2;

        let phase = if i1_prev3 == T::zero() {
            T::zero()
        } else {
            (q1 / i1_prev3).atan() * rad_to_deg
        };
        let delta_phase = (prev_phase - phase).max(T::one());
        prev_phase = phase;
        let alpha = if delta_phase > T::one() {
            (fast_limit / delta_phase).max(slow_limit)
        } else {
            fast_limit
        };

        mama = alpha * price + (T::one() - alpha) * mama;
        let follow = alpha * half;
        fama = follow * mama + (T::one() - follow) * fama;
        if today >= start_idx {
            out_mama[out_idx] = mama;
            out_fama[out_idx] = fama;
            out_idx += 1;
        }

        re = c0_2 * (i2 * prev_i2 + q2 * prev_q2) + c0_8 * re;
        im = c0_2 * (i2 * prev_q2 - q2 * prev_i2) + c0_8 * im;
        prev_q2 = q2;
        prev_i2 = i2;

        let last_period = period;
        if im != T::zero() && re != T::zero() {
            period = c360 / ((im / re).atan() * rad_to_deg);
        }
        period = period.min(c1_5 * last_period).max(c0_67 * last_period);
        period = period.max(c6).min(c50);
        period = c0_2 * period + c0_8 * last_period;

        today += 1;
    }

    Ok(OutputRange::new(start_idx, out_idx))
}

/// Configuration for MAMA.
///
/// ```
/// use ta_smooth::indicators::mama::Mama;
///
/// let config = Mama::new();
/// assert_eq!(config.get_fast_limit(), 0.5);
/// assert_eq!(config.get_slow_limit(), 0.05);
/// assert_eq!(config.lookback(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mama {
    fast_limit: f64,
    slow_limit: f64,
    settings: Settings,
}

impl Default for Mama {
    fn default() -> Self {
        Self::new()
    }
}

impl Mama {
    /// Creates a configuration with the default limits 0.5 and 0.05.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fast_limit: DEFAULT_FAST_LIMIT,
            slow_limit: DEFAULT_SLOW_LIMIT,
            settings: Settings::DEFAULT,
        }
    }

    /// Sets the upper bound of the smoothing constant.
    #[must_use]
    pub const fn fast_limit(mut self, fast_limit: f64) -> Self {
        self.fast_limit = fast_limit;
        self
    }

    /// Sets the lower bound of the smoothing constant.
    #[must_use]
    pub const fn slow_limit(mut self, slow_limit: f64) -> Self {
        self.slow_limit = slow_limit;
        self
    }

    /// Sets the settings used for the lookback.
    #[must_use]
    pub const fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the fast limit.
    #[must_use]
    pub const fn get_fast_limit(&self) -> f64 {
        self.fast_limit
    }

    /// Returns the slow limit.
    #[must_use]
    pub const fn get_slow_limit(&self) -> f64 {
        self.slow_limit
    }

    /// Returns the lookback period.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        mama_lookback_with(&self.settings)
    }

    /// Computes MAMA and FAMA for `data`.
    ///
    /// # Errors
    ///
    /// - `Error::AllNaN` if the input has no valid sample
    /// - `Error::Compute(RetCode::BadParam)` for a limit outside `0.01..=0.99`
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MamaOutput<T>> {
        let mut mama = vec![T::nan(); data.len()];
        let mut fama = vec![T::nan(); data.len()];
        let Some(window) = Window::prepare("mama", &[data], self.lookback())? else {
            return Ok(MamaOutput { mama, fama });
        };

        let range = mama_raw(
            &self.settings,
            0,
            window.end_idx,
            &data[window.begin..],
            self.fast_limit,
            self.slow_limit,
            &mut mama[window.offset..],
            &mut fama[window.offset..],
        )?;
        window.finish(range)?;
        Ok(MamaOutput { mama, fama })
    }
}

/// Computes MAMA and FAMA with explicit limits under default settings.
///
/// # Errors
///
/// See [`Mama::compute`].
pub fn mama<T: SeriesElement>(
    data: &[T],
    fast_limit: f64,
    slow_limit: f64,
) -> Result<MamaOutput<T>> {
    Mama::new()
        .fast_limit(fast_limit)
        .slow_limit(slow_limit)
        .compute(data)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::all, clippy::pedantic, clippy::nursery)]

    use super::*;
    #[cfg(not(feature = "no-range-check"))]
    use crate::error::Error;
    use crate::error::RetCode;
    use crate::utils::count_nan_prefix;

    fn cycle(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * std::f64::consts::PI / 10.0).sin() * 5.0)
            .collect()
    }

    #[test]
    fn test_mama_lookback() {
        assert_eq!(mama_lookback(), 32);
        let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Mama, 8);
        assert_eq!(mama_lookback_with(&settings), 40);
        assert_eq!(Mama::new().settings(settings).lookback(), 40);
    }

    #[test]
    fn test_mama_nan_prefix() {
        let data = cycle(120);
        let out = mama(&data, 0.5, 0.05).unwrap();
        assert_eq!(out.len(), 120);
        assert_eq!(count_nan_prefix(&out.mama), 32);
        assert_eq!(count_nan_prefix(&out.fama), 32);
        assert!(out.mama[32..].iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_mama_constant_series_converges() {
        let data = vec![2.0_f64; 120];
        let out = mama(&data, 0.5, 0.05).unwrap();
        assert!(out.mama[32] > 0.0 && out.mama[32] <= 2.0);
        assert!((out.mama[119] - 2.0).abs() < 1e-10);
        assert!((out.fama[119] - 2.0).abs() < 1e-6);
        // FAMA trails MAMA from below while both rise from zero
        assert!(out.fama[32] < out.mama[32]);
    }

    #[test]
    fn test_mama_stays_within_price_range_after_warmup() {
        let data = cycle(300);
        let out = mama(&data, 0.5, 0.05).unwrap();
        for i in 250..300 {
            assert!(out.mama[i] > 94.0 && out.mama[i] < 106.0, "index {i}");
            assert!(out.fama[i] > 94.0 && out.fama[i] < 106.0, "index {i}");
        }
    }

    #[test]
    fn test_mama_unstable_period_matches_tail() {
        let data = cycle(150);
        let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Mama, 10);
        let plain = Mama::new().compute(&data).unwrap();
        let delayed = Mama::new().settings(settings).compute(&data).unwrap();
        assert_eq!(count_nan_prefix(&delayed.mama), 42);
        // Both runs start the state machine at index 0 of the valid data
        for i in 42..150 {
            assert_eq!(delayed.mama[i], plain.mama[i]);
            assert_eq!(delayed.fama[i], plain.fama[i]);
        }
    }

    #[test]
    fn test_mama_insufficient_data() {
        let data = cycle(32);
        let out = mama(&data, 0.5, 0.05).unwrap();
        assert!(out.mama.iter().all(|x| x.is_nan()));
        assert!(out.fama.iter().all(|x| x.is_nan()));
    }

    #[cfg(not(feature = "no-range-check"))]
    #[test]
    fn test_mama_bad_limits() {
        let data = cycle(64);
        assert!(matches!(
            mama(&data, 1.5, 0.05),
            Err(Error::Compute(RetCode::BadParam {
                param: "fast_limit",
                ..
            }))
        ));
        assert!(matches!(
            mama(&data, 0.5, 0.0),
            Err(Error::Compute(RetCode::BadParam {
                param: "slow_limit",
                ..
            }))
        ));
    }

    #[test]
    fn test_mama_raw_buffer_check() {
        let data = cycle(64);
        let mut mama_out = vec![0.0; 32];
        let mut fama_out = vec![0.0; 10];
        assert!(matches!(
            mama_raw(
                &Settings::DEFAULT,
                0,
                63,
                &data,
                0.5,
                0.05,
                &mut mama_out,
                &mut fama_out
            ),
            Err(RetCode::BufferTooSmall { .. })
        ));
    }
}
