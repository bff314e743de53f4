//! Wilder's directional movement system: +DM, -DM, +DI, -DI, DX, ADX and ADXR.
//!
//! All seven indicators walk the bars the same way. Each bar yields a
//! directional movement and a true range:
//!
//! ```text
//! up   = High[i] - High[i-1]
//! down = Low[i-1] - Low[i]
//! +DM1 = up   if up > 0 and up > down, else 0
//! -DM1 = down if down > 0 and down > up, else 0      (ties give 0 to both)
//! TR   = max(High - Low, |High - Close[i-1]|, |Low - Close[i-1]|)
//! ```
//!
//! and the per-bar values are Wilder-smoothed as running sums
//! (`x = x - x / period + new`):
//!
//! ```text
//! +DI = 100 * sum(+DM) / sum(TR)
//! -DI = 100 * sum(-DM) / sum(TR)
//! DX  = 100 * |+DI - -DI| / (+DI + -DI)
//! ADX = mean of the first `period` DX, then (ADX * (period - 1) + DX) / period
//! ADXR = (ADX[i] + ADX[i - (period - 1)]) / 2
//! ```
//!
//! # Zero denominators
//!
//! A near-zero true range sum or DI sum gives 0 for +DI, -DI and the first
//! DX value. Later DX values repeat the previous DX instead, and ADX skips
//! the bar.
//!
//! # Lookbacks
//!
//! | Indicator | Lookback                                 |
//! |-----------|------------------------------------------|
//! | ±DM       | `period - 1 + unstable`, 1 for period 1  |
//! | ±DI       | `period + unstable`, 1 for period 1      |
//! | DX        | `period + unstable`                      |
//! | ADX       | `2 * period - 1 + unstable`              |
//! | ADXR      | `period - 1 + ADX lookback`              |
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::directional::{adx, adx_lookback};
//!
//! let high = vec![48.70_f64, 48.72, 48.90, 48.87, 48.82, 49.05, 49.20, 49.35, 49.92, 50.19, 50.12, 50.50, 50.80];
//! let low = vec![47.79_f64, 48.14, 48.39, 48.37, 48.24, 48.64, 48.94, 48.86, 49.50, 49.87, 49.20, 49.80, 50.10];
//! let close = vec![48.16_f64, 48.61, 48.75, 48.63, 48.74, 49.03, 49.07, 49.32, 49.91, 50.13, 49.53, 50.20, 50.60];
//!
//! let result = adx(&high, &low, &close, 5).unwrap();
//!
//! assert_eq!(adx_lookback(5), 9);
//! assert!(result[8].is_nan());
//! assert!((0.0..=100.0).contains(&result[9]));
//! ```

use crate::error::{RawResult, Result, RetCode};
use crate::settings::{Settings, UnstableFunc};
use crate::traits::SeriesElement;
use crate::utils::{check_output, check_period, check_range, OutputRange, Window};

/// Default period of the directional indicators.
pub const DEFAULT_PERIOD: usize = 14;

/// Computes True Range for a single bar.
#[inline]
pub(crate) fn true_range<T: SeriesElement>(high: T, low: T, prev_close: T) -> T {
    let hl = high - low;
    let hc = (prev_close - high).abs();
    let lc = (prev_close - low).abs();

    hl.max(hc).max(lc)
}

/// Computes directional movement (+DM, -DM) for a single bar.
#[inline]
fn directional_movement<T: SeriesElement>(high: T, prev_high: T, low: T, prev_low: T) -> (T, T) {
    let up_move = high - prev_high;
    let down_move = prev_low - low;

    let plus_dm = if up_move > T::zero() && up_move > down_move {
        up_move
    } else {
        T::zero()
    };

    let minus_dm = if down_move > T::zero() && up_move < down_move {
        down_move
    } else {
        T::zero()
    };

    (plus_dm, minus_dm)
}

/// Which side of the directional movement a ±DM or ±DI call reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Plus,
    Minus,
}

impl Direction {
    const fn dm_func(self) -> UnstableFunc {
        match self {
            Self::Plus => UnstableFunc::PlusDm,
            Self::Minus => UnstableFunc::MinusDm,
        }
    }

    const fn di_func(self) -> UnstableFunc {
        match self {
            Self::Plus => UnstableFunc::PlusDi,
            Self::Minus => UnstableFunc::MinusDi,
        }
    }

    fn pick<T: Copy>(self, plus: T, minus: T) -> T {
        match self {
            Self::Plus => plus,
            Self::Minus => minus,
        }
    }
}

/// Per-bar directional movement and true range.
#[derive(Debug, Clone, Copy)]
struct Movement<T> {
    plus: T,
    minus: T,
    range: T,
}

/// Cursor over high/low(/close) bars carrying the previous bar's prices.
struct BarWalk<'a, T> {
    high: &'a [T],
    low: &'a [T],
    close: Option<&'a [T]>,
    today: usize,
    prev_high: T,
    prev_low: T,
    prev_close: T,
}

impl<'a, T: SeriesElement> BarWalk<'a, T> {
    fn new(high: &'a [T], low: &'a [T], close: Option<&'a [T]>, today: usize) -> Self {
        Self {
            high,
            low,
            close,
            today,
            prev_high: high[today],
            prev_low: low[today],
            prev_close: close.map_or_else(T::zero, |c| c[today]),
        }
    }

    /// Moves to the next bar. The true range is 0 without closes.
    fn step(&mut self) -> Movement<T> {
        self.today += 1;
        let high = self.high[self.today];
        let low = self.low[self.today];
        let (plus, minus) = directional_movement(high, self.prev_high, low, self.prev_low);
        let range = match self.close {
            Some(close) => {
                let tr = true_range(high, low, self.prev_close);
                self.prev_close = close[self.today];
                tr
            }
            None => T::zero(),
        };
        self.prev_high = high;
        self.prev_low = low;
        Movement { plus, minus, range }
    }
}

/// Wilder running sums of +DM, -DM and TR.
struct WilderSums<T> {
    plus: T,
    minus: T,
    range: T,
    period: T,
    hundred: T,
}

impl<T: SeriesElement> WilderSums<T> {
    fn new(period: usize) -> RawResult<Self> {
        Ok(Self {
            plus: T::zero(),
            minus: T::zero(),
            range: T::zero(),
            period: T::from_usize(period)?,
            hundred: T::hundred(),
        })
    }

    fn accumulate(&mut self, m: Movement<T>) {
        self.plus = self.plus + m.plus;
        self.minus = self.minus + m.minus;
        self.range = self.range + m.range;
    }

    fn smooth(&mut self, m: Movement<T>) {
        self.plus = self.plus - self.plus / self.period + m.plus;
        self.minus = self.minus - self.minus / self.period + m.minus;
        self.range = self.range - self.range / self.period + m.range;
    }

    fn di(&self, direction: Direction) -> T {
        if self.range.is_near_zero() {
            T::zero()
        } else {
            self.hundred * (direction.pick(self.plus, self.minus) / self.range)
        }
    }

    /// DX of the current sums, `None` when a denominator is near zero.
    fn dx(&self) -> Option<T> {
        if self.range.is_near_zero() {
            return None;
        }
        let minus_di = self.hundred * (self.minus / self.range);
        let plus_di = self.hundred * (self.plus / self.range);
        let total = minus_di + plus_di;
        if total.is_near_zero() {
            None
        } else {
            Some(self.hundred * ((minus_di - plus_di).abs() / total))
        }
    }
}

// =============================================================================
// Lookbacks
// =============================================================================

const fn dm_lookback(settings: &Settings, period: usize, direction: Direction) -> usize {
    if period > 1 {
        (period - 1).saturating_add(settings.unstable_period(direction.dm_func()))
    } else {
        1
    }
}

const fn di_lookback(settings: &Settings, period: usize, direction: Direction) -> usize {
    if period > 1 {
        period.saturating_add(settings.unstable_period(direction.di_func()))
    } else {
        1
    }
}

/// Computes the +DM lookback under default settings.
#[must_use]
pub const fn plus_dm_lookback(period: usize) -> usize {
    dm_lookback(&Settings::DEFAULT, period, Direction::Plus)
}

/// Computes the +DM lookback under `settings`.
#[must_use]
pub const fn plus_dm_lookback_with(settings: &Settings, period: usize) -> usize {
    dm_lookback(settings, period, Direction::Plus)
}

/// Computes the -DM lookback under default settings.
#[must_use]
pub const fn minus_dm_lookback(period: usize) -> usize {
    dm_lookback(&Settings::DEFAULT, period, Direction::Minus)
}

/// Computes the -DM lookback under `settings`.
#[must_use]
pub const fn minus_dm_lookback_with(settings: &Settings, period: usize) -> usize {
    dm_lookback(settings, period, Direction::Minus)
}

/// Computes the +DI lookback under default settings.
#[must_use]
pub const fn plus_di_lookback(period: usize) -> usize {
    di_lookback(&Settings::DEFAULT, period, Direction::Plus)
}

/// Computes the +DI lookback under `settings`.
#[must_use]
pub const fn plus_di_lookback_with(settings: &Settings, period: usize) -> usize {
    di_lookback(settings, period, Direction::Plus)
}

/// Computes the -DI lookback under default settings.
#[must_use]
pub const fn minus_di_lookback(period: usize) -> usize {
    di_lookback(&Settings::DEFAULT, period, Direction::Minus)
}

/// Computes the -DI lookback under `settings`.
#[must_use]
pub const fn minus_di_lookback_with(settings: &Settings, period: usize) -> usize {
    di_lookback(settings, period, Direction::Minus)
}

/// Computes the DX lookback under default settings.
#[must_use]
pub const fn dx_lookback(period: usize) -> usize {
    dx_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the DX lookback under `settings`.
#[must_use]
pub const fn dx_lookback_with(settings: &Settings, period: usize) -> usize {
    if period > 1 {
        period.saturating_add(settings.unstable_period(UnstableFunc::Dx))
    } else {
        2
    }
}

/// Computes the ADX lookback under default settings.
#[must_use]
pub const fn adx_lookback(period: usize) -> usize {
    adx_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the ADX lookback under `settings`.
#[must_use]
pub const fn adx_lookback_with(settings: &Settings, period: usize) -> usize {
    period
        .saturating_mul(2)
        .saturating_add(settings.unstable_period(UnstableFunc::Adx))
        .saturating_sub(1)
}

/// Computes the ADXR lookback under default settings.
#[must_use]
pub const fn adxr_lookback(period: usize) -> usize {
    adxr_lookback_with(&Settings::DEFAULT, period)
}

/// Computes the ADXR lookback under `settings`.
#[must_use]
pub const fn adxr_lookback_with(settings: &Settings, period: usize) -> usize {
    if period > 1 {
        (period - 1).saturating_add(adx_lookback_with(settings, period))
    } else {
        3
    }
}

// =============================================================================
// Directional movement
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn dm_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    period: usize,
    direction: Direction,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[high.len(), low.len()])?;
    check_period("period", period, 1)?;

    let lookback = dm_lookback(settings, period, direction);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    let dm = |m: Movement<T>| direction.pick(m.plus, m.minus);

    if period == 1 {
        let mut walk = BarWalk::new(high, low, None, start_idx - 1);
        for out in &mut output[..count] {
            *out = dm(walk.step());
        }
        return Ok(OutputRange::new(start_idx, count));
    }

    let period_t = T::from_usize(period)?;
    let mut walk = BarWalk::new(high, low, None, start_idx - lookback);
    let mut sum = T::zero();
    for _ in 1..period {
        sum = sum + dm(walk.step());
    }
    for _ in 0..settings.unstable_period(direction.dm_func()) {
        sum = sum - sum / period_t + dm(walk.step());
    }

    output[0] = sum;
    for out in &mut output[1..count] {
        sum = sum - sum / period_t + dm(walk.step());
        *out = sum;
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes smoothed +DM over `[start_idx, end_idx]` into a compacted output.
///
/// Period 1 gives the raw one-bar +DM.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
pub fn plus_dm_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    dm_raw(settings, start_idx, end_idx, high, low, period, Direction::Plus, output)
}

/// Computes smoothed -DM over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// Same as [`plus_dm_raw`].
pub fn minus_dm_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    dm_raw(settings, start_idx, end_idx, high, low, period, Direction::Minus, output)
}

// =============================================================================
// Directional indicators
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn di_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    direction: Direction,
    output: &mut [T],
) -> RawResult<OutputRange> {
    check_range(start_idx, end_idx, &[high.len(), low.len(), close.len()])?;
    check_period("period", period, 1)?;

    let lookback = di_lookback(settings, period, direction);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    if period == 1 {
        // Unsmoothed ratio, not scaled to percent
        let mut walk = BarWalk::new(high, low, Some(close), start_idx - 1);
        for out in &mut output[..count] {
            let m = walk.step();
            *out = if m.range.is_near_zero() {
                T::zero()
            } else {
                direction.pick(m.plus, m.minus) / m.range
            };
        }
        return Ok(OutputRange::new(start_idx, count));
    }

    let mut walk = BarWalk::new(high, low, Some(close), start_idx - lookback);
    let mut sums = WilderSums::new(period)?;
    for _ in 1..period {
        sums.accumulate(walk.step());
    }
    for _ in 0..=settings.unstable_period(direction.di_func()) {
        sums.smooth(walk.step());
    }

    output[0] = sums.di(direction);
    for out in &mut output[1..count] {
        sums.smooth(walk.step());
        *out = sums.di(direction);
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes +DI over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `1..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
#[allow(clippy::too_many_arguments)]
pub fn plus_di_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    di_raw(settings, start_idx, end_idx, high, low, close, period, Direction::Plus, output)
}

/// Computes -DI over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// Same as [`plus_di_raw`].
#[allow(clippy::too_many_arguments)]
pub fn minus_di_raw<T: SeriesElement>(
    settings: &Settings,
    start_idx: usize,
    end_idx: usize,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
    output: &mut [T],
) -> RawResult<OutputRange> {
    di_raw(settings, start_idx, end_idx, high, low, close, period, Direction::Minus, output)
}

// =============================================================================
// DX, ADX, ADXR
// =============================================================================

/// Computes DX over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
#[allow(clippy::too_many_arguments)]
pub fn dx_raw<T: SeriesElement>(
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
    check_period("period", period, 2)?;

    let lookback = dx_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    let mut walk = BarWalk::new(high, low, Some(close), start_idx - lookback);
    let mut sums = WilderSums::new(period)?;
    for _ in 1..period {
        sums.accumulate(walk.step());
    }
    for _ in 0..=settings.unstable_period(UnstableFunc::Dx) {
        sums.smooth(walk.step());
    }

    output[0] = sums.dx().unwrap_or_else(T::zero);
    for i in 1..count {
        sums.smooth(walk.step());
        output[i] = sums.dx().unwrap_or(output[i - 1]);
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes ADX over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
#[allow(clippy::too_many_arguments)]
pub fn adx_raw<T: SeriesElement>(
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
    check_period("period", period, 2)?;

    let lookback = adx_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    let mut walk = BarWalk::new(high, low, Some(close), start_idx - lookback);
    let mut sums = WilderSums::new(period)?;
    for _ in 1..period {
        sums.accumulate(walk.step());
    }

    let mut sum_dx = T::zero();
    for _ in 0..period {
        sums.smooth(walk.step());
        if let Some(dx) = sums.dx() {
            sum_dx = sum_dx + dx;
        }
    }

    let period_t = sums.period;
    let carried = T::from_usize(period - 1)?;
    let mut adx = sum_dx / period_t;
    let mut advance = |adx: T| {
        sums.smooth(walk.step());
        sums.dx().map_or(adx, |dx| (adx * carried + dx) / period_t)
    };
    for _ in 0..settings.unstable_period(UnstableFunc::Adx) {
        adx = advance(adx);
    }

    output[0] = adx;
    for out in &mut output[1..count] {
        adx = advance(adx);
        *out = adx;
    }

    Ok(OutputRange::new(start_idx, count))
}

/// Computes ADXR over `[start_idx, end_idx]` into a compacted output.
///
/// # Errors
///
/// - `RetCode::OutOfRangeStartIndex` / `RetCode::OutOfRangeEndIndex` for a bad window
/// - `RetCode::BadParam` if `period` is outside `2..=100000`
/// - `RetCode::BufferTooSmall` if `output` cannot hold the result
/// - `RetCode::Internal` if the ADX stage disagrees with its lookback
#[allow(clippy::too_many_arguments)]
pub fn adxr_raw<T: SeriesElement>(
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
    check_period("period", period, 2)?;

    let lookback = adxr_lookback_with(settings, period);
    let start_idx = start_idx.max(lookback);
    if start_idx > end_idx {
        return Ok(OutputRange::EMPTY);
    }
    let count = end_idx - start_idx + 1;
    check_output(output.len(), count)?;

    let adx_start = start_idx - (period - 1);
    let mut adx_values = vec![T::zero(); count + period - 1];
    let range = adx_raw(settings, adx_start, end_idx, high, low, close, period, &mut adx_values)?;
    if range != OutputRange::new(adx_start, adx_values.len()) {
        return Err(RetCode::Internal {
            context: "adxr: ADX range disagrees with its lookback",
        });
    }
    log::trace!("adxr: adx stage {range:?}");

    let two = T::two();
    for (i, out) in output[..count].iter_mut().enumerate() {
        *out = (adx_values[i + period - 1] + adx_values[i]) / two;
    }

    Ok(OutputRange::new(start_idx, count))
}

// =============================================================================
// High-level API
// =============================================================================

fn run_hl<T, F>(name: &'static str, high: &[T], low: &[T], lookback: usize, raw: F) -> Result<Vec<T>>
where
    T: SeriesElement,
    F: FnOnce(usize, &[T], &[T], &mut [T]) -> RawResult<OutputRange>,
{
    let mut output = vec![T::nan(); high.len()];
    let Some(window) = Window::prepare(name, &[high, low], lookback)? else {
        return Ok(output);
    };

    let range = raw(
        window.end_idx,
        &high[window.begin..],
        &low[window.begin..],
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}

fn run_hlc<T, F>(
    name: &'static str,
    high: &[T],
    low: &[T],
    close: &[T],
    lookback: usize,
    raw: F,
) -> Result<Vec<T>>
where
    T: SeriesElement,
    F: FnOnce(usize, &[T], &[T], &[T], &mut [T]) -> RawResult<OutputRange>,
{
    let mut output = vec![T::nan(); high.len()];
    let Some(window) = Window::prepare(name, &[high, low, close], lookback)? else {
        return Ok(output);
    };

    let range = raw(
        window.end_idx,
        &high[window.begin..],
        &low[window.begin..],
        &close[window.begin..],
        &mut output[window.offset..],
    )?;
    window.finish(range)?;
    Ok(output)
}

/// Computes smoothed +DM under `settings`.
///
/// # Errors
///
/// - `Error::LengthMismatch` if `high` and `low` differ in length
/// - `Error::AllNaN` if an input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
pub fn plus_dm_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = plus_dm_lookback_with(settings, period);
    run_hl("plus_dm", high, low, lookback, |end_idx, h, l, out| {
        plus_dm_raw(settings, 0, end_idx, h, l, period, out)
    })
}

/// Computes smoothed +DM under default settings.
///
/// # Errors
///
/// See [`plus_dm_with`].
pub fn plus_dm<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    plus_dm_with(&Settings::DEFAULT, high, low, period)
}

/// Computes smoothed -DM under `settings`.
///
/// # Errors
///
/// See [`plus_dm_with`].
pub fn minus_dm_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = minus_dm_lookback_with(settings, period);
    run_hl("minus_dm", high, low, lookback, |end_idx, h, l, out| {
        minus_dm_raw(settings, 0, end_idx, h, l, period, out)
    })
}

/// Computes smoothed -DM under default settings.
///
/// # Errors
///
/// See [`plus_dm_with`].
pub fn minus_dm<T: SeriesElement>(high: &[T], low: &[T], period: usize) -> Result<Vec<T>> {
    minus_dm_with(&Settings::DEFAULT, high, low, period)
}

/// Computes +DI under `settings`.
///
/// # Errors
///
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::AllNaN` if an input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `1..=100000`
pub fn plus_di_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = plus_di_lookback_with(settings, period);
    run_hlc("plus_di", high, low, close, lookback, |end_idx, h, l, c, out| {
        plus_di_raw(settings, 0, end_idx, h, l, c, period, out)
    })
}

/// Computes +DI under default settings.
///
/// # Errors
///
/// See [`plus_di_with`].
pub fn plus_di<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    plus_di_with(&Settings::DEFAULT, high, low, close, period)
}

/// Computes -DI under `settings`.
///
/// # Errors
///
/// See [`plus_di_with`].
pub fn minus_di_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = minus_di_lookback_with(settings, period);
    run_hlc("minus_di", high, low, close, lookback, |end_idx, h, l, c, out| {
        minus_di_raw(settings, 0, end_idx, h, l, c, period, out)
    })
}

/// Computes -DI under default settings.
///
/// # Errors
///
/// See [`plus_di_with`].
pub fn minus_di<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    minus_di_with(&Settings::DEFAULT, high, low, close, period)
}

/// Computes DX under `settings`.
///
/// # Errors
///
/// - `Error::LengthMismatch` if the inputs differ in length
/// - `Error::AllNaN` if an input has no valid sample
/// - `Error::Compute(RetCode::BadParam)` if `period` is outside `2..=100000`
pub fn dx_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = dx_lookback_with(settings, period);
    run_hlc("dx", high, low, close, lookback, |end_idx, h, l, c, out| {
        dx_raw(settings, 0, end_idx, h, l, c, period, out)
    })
}

/// Computes DX under default settings.
///
/// # Errors
///
/// See [`dx_with`].
pub fn dx<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    dx_with(&Settings::DEFAULT, high, low, close, period)
}

/// Computes ADX under `settings`.
///
/// # Errors
///
/// See [`dx_with`].
pub fn adx_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = adx_lookback_with(settings, period);
    run_hlc("adx", high, low, close, lookback, |end_idx, h, l, c, out| {
        adx_raw(settings, 0, end_idx, h, l, c, period, out)
    })
}

/// Computes ADX under default settings.
///
/// # Errors
///
/// See [`dx_with`].
pub fn adx<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    adx_with(&Settings::DEFAULT, high, low, close, period)
}

/// Computes ADXR under `settings`.
///
/// # Errors
///
/// See [`dx_with`].
pub fn adxr_with<T: SeriesElement>(
    settings: &Settings,
    high: &[T],
    low: &[T],
    close: &[T],
    period: usize,
) -> Result<Vec<T>> {
    let lookback = adxr_lookback_with(settings, period);
    run_hlc("adxr", high, low, close, lookback, |end_idx, h, l, c, out| {
        adxr_raw(settings, 0, end_idx, h, l, c, period, out)
    })
}

/// Computes ADXR under default settings.
///
/// # Errors
///
/// See [`dx_with`].
pub fn adxr<T: SeriesElement>(high: &[T], low: &[T], close: &[T], period: usize) -> Result<Vec<T>> {
    adxr_with(&Settings::DEFAULT, high, low, close, period)
}
