//! Moving Average Convergence Divergence (MACD) indicator family.
//!
//! The MACD is a trend-following momentum indicator that shows the relationship
//! between two moving averages of a security's price. It consists of three
//! components:
//!
//! - **MACD Line**: The difference between the fast and slow averages
//! - **Signal Line**: An average of the MACD line (typically 9-period)
//! - **Histogram**: The difference between the MACD line and signal line
//!
//! Three variants share one engine:
//!
//! - [`macd`]: EMA for every line with `k = 2 / (period + 1)`
//! - [`macdfix`]: fast and slow pinned to 12/26 with the fixed smoothing
//!   constants 0.15 and 0.075; only the signal period is configurable
//! - [`MacdExt`]: any [`MaType`] per line through the generic dispatcher
//!
//! If the slow period is shorter than the fast one the two are swapped.
//!
//! # Formula
//!
//! ```text
//! MACD Line[i] = MA(fast_period)[i] - MA(slow_period)[i]
//! Signal Line[i] = MA(MACD Line, signal_period)[i]
//! Histogram[i] = MACD Line[i] - Signal Line[i]
//! ```
//!
//! # NaN Handling
//!
//! All three outputs share one lookback: `lookback(slow) + lookback(signal)`.
//! The MACD line is only emitted where the signal line is defined, the way
//! TA-Lib does it.
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::macd::macd;
//!
//! let data: Vec<f64> = (0..50).map(|i| 100.0 + (i as f64) * 0.5).collect();
//! let result = macd(&data, 12, 26, 9).unwrap();
//!
//! assert!(result.macd_line[32].is_nan());
//! assert!(!result.macd_line[33].is_nan());
//! assert_eq!(result.histogram[33], result.macd_line[33] - result.signal_line[33]);
//! ```

use crate::error::{RawResult, Result, RetCode};
use crate::indicators::ema::{ema_core, ema_k, ema_lookback_with};
use crate::indicators::ma::{ma_lookback_with, ma_raw, MaType};
use crate::settings::Settings;
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Default fast period.
pub const DEFAULT_FAST_PERIOD: usize = 12;

/// Default slow period.
pub const DEFAULT_SLOW_PERIOD: usize = 26;

/// Default signal period.
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Smoothing constant of the fixed 12-period EMA used by MACDFIX.
const FIXED_FAST_K: f64 = 0.15;

/// Smoothing constant of the fixed 26-period EMA used by MACDFIX.
const FIXED_SLOW_K: f64 = 0.075;

/// The output of a MACD calculation containing all three components.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdOutput<T> {
    /// The MACD line (fast MA - slow MA).
    pub macd_line: Vec<T>,

    /// The signal line (MA of the MACD line).
    pub signal_line: Vec<T>,

    /// The histogram (MACD line - signal line).
    pub histogram: Vec<T>,
}

impl<T> MacdOutput<T> {
    /// Returns the length of the output vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.macd_line.len()
    }

    /// Returns true if the output vectors are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macd_line.is_empty()
    }
}

impl<T: SeriesElement> MacdOutput<T> {
    fn nan(len: usize) -> Self {
        Self {
            macd_line: vec![T::nan(); len],
            signal_line: vec![T::nan(); len],
            histogram: vec![T::nan(); len],
        }
    }

    /// Runs a three-output low-level call over the valid window of `data`.
    fn fill<F>(data: &[T], indicator: &'static str, lookback: usize, raw: F) -> Result<Self>
    where
        F: FnOnce(usize, &[T], &mut [T], &mut [T], &mut [T]) -> RawResult<OutputRange>,
    {
        let mut output = Self::nan(data.len());
        let Some(window) = Window::prepare(indicator, &[data], lookback)? else {
            return Ok(output);
        };

        let range = raw(
            window.end_idx,
            &data[window.begin..],
            &mut output.macd_line[window.offset..],
            &mut output.signal_line[window.offset..],
            &mut output.histogram[window.offset..],
        )?;
        window.finish(range)?;
        Ok(output)
    }
}

/// The three output buffers of a low-level MACD call.
struct MacdBuffers<'a, T> {
    macd: &'a mut [T],
    signal: &'a mut [T],
    hist: &'a mut [T],
}

/// Returns `(fast, slow)` ordered so that slow is the longer period.
const fn ordered(fast: usize, slow: usize) -> (usize, usize) {
    if slow < fast {
        (slow, fast)
    } else {
        (fast, slow)
    }
}

/// Computes the MACD lookback under default settings.
#[inline]
#[must_use]
pub const fn macd_lookback(fast_period: usize, slow_period: usize, signal_period: usize) -> usize {
    macd_lookback_with(&Settings::DEFAULT, fast_period, slow_period, signal_period)
}

/// Computes the MACD lookback under `settings`.
#[must_use]
pub const fn macd_lookback_with(
    settings: &Settings,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> usize {
    let (_, slow) = ordered(fast_period, slow_period);
    ema_lookback_with(settings, slow) + ema_lookback_with(settings, signal_period)
}

/// Computes the MACDFIX lookback under default settings.
#[inline]
#[must_use]
pub const fn macdfix_lookback(signal_period: usize) -> usize {
    macdfix_lookback_with(&Settings::DEFAULT, signal_period)
}

/// Computes the MACDFIX lookback under `settings`.
#[inline]
#[must_use]
pub const fn macdfix_lookback_with(settings: &Settings, signal_period: usize) -> usize {
    macd_lookback_with(settings, DEFAULT_FAST_PERIOD, DEFAULT_SLOW_PERIOD, signal_period)
}

/// Shared EMA engine. A fast or slow period of 0 selects the fixed
/// 12/26 smoothing constants.
#[allow(clippy::too_many_arguments)]
fn macd_core<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    out: MacdBuffers<'_, T>,
) -> RawResult<OutputRange> {
    let (fast_period, slow_period) = ordered(fast_period, slow_period);
    let (slow_period, k_slow) = if slow_period == 0 {
        (DEFAULT_SLOW_PERIOD, T::from_f64(FIXED_SLOW_K)?)
    } else {
        (slow_period, ema_k(slow_period)?)
    };
    let (fast_period, k_fast) = if fast_period == 0 {
        (DEFAULT_FAST_PERIOD, T::from_f64(FIXED_FAST_K)?)
    } else {
        (fast_period, ema_k(fast_period)?)
    };

    let lookback_signal = ema_lookback_with(settings, signal_period);
    let lookback = lookback_signal + ema_lookback_with(settings, slow_period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(out.macd.len(), count)?;
    check_output(out.signal.len(), count)?;
    check_output(out.hist.len(), count)?;

    let line_start = start_idx - lookback_signal;
    let line_len = count + lookback_signal;
    let mut slow = vec![T::zero(); line_len];
    let mut fast = vec![T::zero(); line_len];
    let slow_range = ema_core(settings, line_start, end_idx, input, slow_period, k_slow, &mut slow)?;
    let fast_range = ema_core(settings, line_start, end_idx, input, fast_period, k_fast, &mut fast)?;
    let expected = OutputRange::new(line_start, line_len);
    if slow_range != expected || fast_range != expected {
        return Err(RetCode::Internal {
            context: "macd: fast and slow EMA ranges disagree",
        });
    }

    for (f, &s) in fast.iter_mut().zip(&slow) {
        *f = *f - s;
    }
    out.macd[..count].copy_from_slice(&fast[lookback_signal..]);

    let signal_range = ema_core(
        settings,
        0,
        line_len - 1,
        &fast,
        signal_period,
        ema_k(signal_period)?,
        &mut *out.signal,
    )?;
    if signal_range != OutputRange::new(lookback_signal, count) {
        return Err(RetCode::Internal {
            context: "macd: signal EMA range disagrees with its lookback",
        });
    }
    log::trace!("macd: lines {expected:?}, signal {signal_range:?}");

    for ((h, &m), &s) in out.hist[..count].iter_mut().zip(&out.macd[..count]).zip(&out.signal[..count]) {
        *h = m - s;
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes MACD over `input[start_idx..=end_idx]` into compacted outputs.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if the fast or slow period is outside `2..=100000`
///   or the signal period outside `1..=100000`
/// - `RetCode::BufferTooSmall` if an output cannot hold the result
/// - `RetCode::Internal` if the EMA stages disagree on their ranges
#[allow(clippy::too_many_arguments)]
pub fn macd_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    out_macd: &mut [T],
    out_signal: &mut [T],
    out_hist: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("fast_period", fast_period, 2)?;
    check_period("slow_period", slow_period, 2)?;
    check_period("signal_period", signal_period, 1)?;
    macd_core(
        settings,
        start_idx,
        end_idx,
        input,
        fast_period,
        slow_period,
        signal_period,
        MacdBuffers {
            macd: out_macd,
            signal: out_signal,
            hist: out_hist,
        },
    )
}

/// Computes MACDFIX (12/26 with fixed smoothing constants) over
/// `input[start_idx..=end_idx]`.
///
/// # Errors
///
/// Same as [`macd_raw`], with only the signal period checked.
#[allow(clippy::too_many_arguments)]
pub fn macdfix_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    signal_period: usize,
    out_macd: &mut [T],
    out_signal: &mut [T],
    out_hist: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("signal_period", signal_period, 1)?;
    macd_core(
        settings,
        start_idx,
        end_idx,
        input,
        0,
        0,
        signal_period,
        MacdBuffers {
            macd: out_macd,
            signal: out_signal,
            hist: out_hist,
        },
    )
}

/// Configuration for the EMA-based MACD.
///
/// ```
/// use ta_smooth::indicators::macd::Macd;
///
/// let config = Macd::default();
/// assert_eq!(config.get_fast_period(), 12);
/// assert_eq!(config.get_slow_period(), 26);
/// assert_eq!(config.get_signal_period(), 9);
/// assert_eq!(config.lookback(), 33);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    settings: Settings,
}

impl Default for Macd {
    /// 12/26/9.
    fn default() -> Self {
        Self::new()
    }
}

impl Macd {
    /// Creates the standard 12/26/9 configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            signal_period: DEFAULT_SIGNAL_PERIOD,
            settings: Settings::DEFAULT,
        }
    }

    /// Sets the fast EMA period.
    #[must_use]
    pub const fn fast_period(mut self, period: usize) -> Self {
        self.fast_period = period;
        self
    }

    /// Sets the slow EMA period.
    #[must_use]
    pub const fn slow_period(mut self, period: usize) -> Self {
        self.slow_period = period;
        self
    }

    /// Sets the signal EMA period.
    #[must_use]
    pub const fn signal_period(mut self, period: usize) -> Self {
        self.signal_period = period;
        self
    }

    /// Sets the settings passed to the EMA stages.
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

    /// Returns the signal period.
    #[must_use]
    pub const fn get_signal_period(&self) -> usize {
        self.signal_period
    }

    /// Returns the lookback shared by the three outputs.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        macd_lookback_with(
            &self.settings,
            self.fast_period,
            self.slow_period,
            self.signal_period,
        )
    }

    /// Computes MACD for `data`.
    ///
    /// # Errors
    ///
    /// - `Error::AllNaN` if the input has no valid sample
    /// - `Error::Compute(RetCode::BadParam)` for an out-of-range period
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        MacdOutput::fill(data, "macd", self.lookback(), |end_idx, input, m, s, h| {
            macd_raw(
                &self.settings,
                0,
                end_idx,
                input,
                self.fast_period,
                self.slow_period,
                self.signal_period,
                m,
                s,
                h,
            )
        })
    }
}

/// Computes MACD with explicit periods under default settings.
///
/// # Errors
///
/// See [`Macd::compute`].
pub fn macd<T: SeriesElement>(
    data: &[T],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdOutput<T>> {
    Macd::new()
        .fast_period(fast_period)
        .slow_period(slow_period)
        .signal_period(signal_period)
        .compute(data)
}

/// Computes MACDFIX under `settings`.
///
/// # Errors
///
/// - `Error::AllNaN` if the input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `signal_period` is outside `1..=100000`
pub fn macdfix_with<T: SeriesElement>(
    settings: &Settings,
    data: &[T],
    signal_period: usize,
) -> Result<MacdOutput<T>> {
    let lookback = macdfix_lookback_with(settings, signal_period);
    MacdOutput::fill(data, "macdfix", lookback, |end_idx, input, m, s, h| {
        macdfix_raw(settings, 0, end_idx, input, signal_period, m, s, h)
    })
}

/// Computes MACDFIX under default settings.
///
/// # Errors
///
/// See [`macdfix_with`].
pub fn macdfix<T: SeriesElement>(data: &[T], signal_period: usize) -> Result<MacdOutput<T>> {
    macdfix_with(&Settings::DEFAULT, data, signal_period)
}

// =============================================================================
// MACDEXT
// =============================================================================

/// Computes the MACDEXT lookback under `settings`.
#[must_use]
pub const fn macdext_lookback_with(
    settings: &Settings,
    fast: (usize, MaType),
    slow: (usize, MaType),
    signal: (usize, MaType),
) -> usize {
    let fast_lb = ma_lookback_with(settings, fast.0, fast.1);
    let slow_lb = ma_lookback_with(settings, slow.0, slow.1);
    let largest = if fast_lb > slow_lb { fast_lb } else { slow_lb };
    largest + ma_lookback_with(settings, signal.0, signal.1)
}

/// Computes MACDEXT over `input[start_idx..=end_idx]`, each line given as
/// `(period, kind)`.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if the fast or slow period is outside `2..=100000`
///   or the signal period outside `1..=100000`
/// - `RetCode::BufferTooSmall` if an output cannot hold the result
/// - `RetCode::Internal` if the moving average stages disagree on their ranges
#[allow(clippy::too_many_arguments)]
pub fn macdext_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    input: &[T],
    fast: (usize, MaType),
    slow: (usize, MaType),
    signal: (usize, MaType),
    out_macd: &mut [T],
    out_signal: &mut [T],
    out_hist: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[input.len()])?;
    check_period("fast_period", fast.0, 2)?;
    check_period("slow_period", slow.0, 2)?;
    check_period("signal_period", signal.0, 1)?;

    let (fast, slow) = if slow.0 < fast.0 { (slow, fast) } else { (fast, slow) };
    let lookback_signal = ma_lookback_with(settings, signal.0, signal.1);
    let lookback = macdext_lookback_with(settings, fast, slow, signal);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(out_macd.len(), count)?;
    check_output(out_signal.len(), count)?;
    check_output(out_hist.len(), count)?;

    let line_start = start_idx - lookback_signal;
    let line_len = count + lookback_signal;
    let mut slow_line = vec![T::zero(); line_len];
    let mut fast_line = vec![T::zero(); line_len];
    let slow_range = ma_raw(settings, line_start, end_idx, input, slow.0, slow.1, &mut slow_line)?;
    let fast_range = ma_raw(settings, line_start, end_idx, input, fast.0, fast.1, &mut fast_line)?;
    let expected = OutputRange::new(line_start, line_len);
    if slow_range != expected || fast_range != expected {
        return Err(RetCode::Internal {
            context: "macdext: fast and slow MA ranges disagree",
        });
    }

    for (f, &s) in fast_line.iter_mut().zip(&slow_line) {
        *f = *f - s;
    }
    out_macd[..count].copy_from_slice(&fast_line[lookback_signal..]);

    let signal_range = ma_raw(settings, 0, line_len - 1, &fast_line, signal.0, signal.1, out_signal)?;
    if signal_range != OutputRange::new(lookback_signal, count) {
        return Err(RetCode::Internal {
            context: "macdext: signal MA range disagrees with its lookback",
        });
    }
    log::trace!(
        "macdext: {}/{}/{} lines {expected:?}, signal {signal_range:?}",
        fast.1,
        slow.1,
        signal.1
    );

    for ((h, &m), &s) in out_hist[..count].iter_mut().zip(&out_macd[..count]).zip(&out_signal[..count]) {
        *h = m - s;
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Configuration for MACD with a selectable moving average per line.
///
/// ```
/// use ta_smooth::indicators::ma::MaType;
/// use ta_smooth::indicators::macd::MacdExt;
///
/// let config = MacdExt::new().fast(12, MaType::Ema).slow(26, MaType::Ema);
/// assert_eq!(config.get_signal(), (9, MaType::Sma));
/// assert_eq!(config.lookback(), 25 + 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacdExt {
    fast: (usize, MaType),
    slow: (usize, MaType),
    signal: (usize, MaType),
    settings: Settings,
}

impl Default for MacdExt {
    /// 12/26/9, all simple moving averages.
    fn default() -> Self {
        Self::new()
    }
}

impl MacdExt {
    /// Creates a 12/26/9 configuration with SMA on every line.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fast: (DEFAULT_FAST_PERIOD, MaType::Sma),
            slow: (DEFAULT_SLOW_PERIOD, MaType::Sma),
            signal: (DEFAULT_SIGNAL_PERIOD, MaType::Sma),
            settings: Settings::DEFAULT,
        }
    }

    /// Sets the fast line period and kind.
    #[must_use]
    pub const fn fast(mut self, period: usize, ma_type: MaType) -> Self {
        self.fast = (period, ma_type);
        self
    }

    /// Sets the slow line period and kind.
    #[must_use]
    pub const fn slow(mut self, period: usize, ma_type: MaType) -> Self {
        self.slow = (period, ma_type);
        self
    }

    /// Sets the signal line period and kind.
    #[must_use]
    pub const fn signal(mut self, period: usize, ma_type: MaType) -> Self {
        self.signal = (period, ma_type);
        self
    }

    /// Sets the settings passed to every moving average.
    #[must_use]
    pub const fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the fast line period and kind.
    #[must_use]
    pub const fn get_fast(&self) -> (usize, MaType) {
        self.fast
    }

    /// Returns the slow line period and kind.
    #[must_use]
    pub const fn get_slow(&self) -> (usize, MaType) {
        self.slow
    }

    /// Returns the signal line period and kind.
    #[must_use]
    pub const fn get_signal(&self) -> (usize, MaType) {
        self.signal
    }

    /// Returns the lookback shared by the three outputs.
    #[must_use]
    pub const fn lookback(&self) -> usize {
        macdext_lookback_with(&self.settings, self.fast, self.slow, self.signal)
    }

    /// Computes MACDEXT for `data`.
    ///
    /// # Errors
    ///
    /// - `Error::AllNaN` if the input has no valid sample
    /// - `Error::Compute(RetCode::BadParam)` for an out-of-range period
    pub fn compute<T: SeriesElement>(&self, data: &[T]) -> Result<MacdOutput<T>> {
        MacdOutput::fill(data, "macdext", self.lookback(), |end_idx, input, m, s, h| {
            macdext_raw(
                &self.settings,
                0,
                end_idx,
                input,
                self.fast,
                self.slow,
                self.signal,
                m,
                s,
                h,
            )
        })
    }
}
