//! Computation settings: unstable periods and compatibility mode.
//!
//! TA-Lib keeps these in process-wide globals. Here they are a plain `Copy`
//! value passed by reference into every lookback and computation that reads
//! them, so two threads can run with different settings and a computation
//! can never observe a change half way through.
//!
//! # Unstable periods
//!
//! Recurrences such as EMA or Wilder smoothing depend on every past sample.
//! An unstable period of `n` for a function makes it consume `n` extra bars
//! before emitting, which lets the recurrence settle. The extra bars are
//! folded into the function's lookback. Stored values are clamped to
//! [`MAX_PERIOD`], so a lookback never overflows however the settings were
//! built or loaded.
//!
//! # Example
//!
//! ```
//! use ta_smooth::settings::{Settings, UnstableFunc};
//! use ta_smooth::indicators::ema::{ema_lookback, ema_lookback_with};
//!
//! let mut settings = Settings::default();
//! settings.unstable.set(UnstableFunc::Ema, 10);
//!
//! assert_eq!(ema_lookback(14), 13);
//! assert_eq!(ema_lookback_with(&settings, 14), 23);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::MAX_PERIOD;

/// Functions that carry a configurable unstable period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnstableFunc {
    /// Average Directional Movement Index.
    Adx,
    /// Average True Range.
    Atr,
    /// Chande Momentum Oscillator.
    Cmo,
    /// Directional Movement Index.
    Dx,
    /// Exponential Moving Average and everything built on it.
    Ema,
    /// Kaufman Adaptive Moving Average.
    Kama,
    /// MESA Adaptive Moving Average.
    Mama,
    /// Minus Directional Indicator.
    MinusDi,
    /// Minus Directional Movement.
    MinusDm,
    /// Plus Directional Indicator.
    PlusDi,
    /// Plus Directional Movement.
    PlusDm,
    /// Relative Strength Index.
    Rsi,
    /// Tillson T3.
    T3,
}

impl UnstableFunc {
    /// Every function, in table order.
    pub const ALL: [Self; 13] = [
        Self::Adx,
        Self::Atr,
        Self::Cmo,
        Self::Dx,
        Self::Ema,
        Self::Kama,
        Self::Mama,
        Self::MinusDi,
        Self::MinusDm,
        Self::PlusDi,
        Self::PlusDm,
        Self::Rsi,
        Self::T3,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Unstable period per [`UnstableFunc`], all zero by default.
///
/// Every entry is at most [`MAX_PERIOD`]; larger values are clamped on the
/// way in, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[usize; 13]", into = "[usize; 13]"))]
pub struct UnstablePeriods {
    periods: [usize; 13],
}

impl UnstablePeriods {
    /// All unstable periods zero.
    pub const ZERO: Self = Self { periods: [0; 13] };

    /// Returns the unstable period of `func`.
    #[inline]
    #[must_use]
    pub const fn get(&self, func: UnstableFunc) -> usize {
        self.periods[func.index()]
    }

    /// Sets the unstable period of `func`, clamped to [`MAX_PERIOD`].
    #[inline]
    pub fn set(&mut self, func: UnstableFunc, period: usize) -> &mut Self {
        self.periods[func.index()] = clamp(period);
        self
    }

    /// Sets the unstable period of every function, clamped to [`MAX_PERIOD`].
    #[inline]
    pub fn set_all(&mut self, period: usize) -> &mut Self {
        self.periods = [clamp(period); 13];
        self
    }

    /// Builder-style variant of [`UnstablePeriods::set`].
    #[inline]
    #[must_use]
    pub const fn with(mut self, func: UnstableFunc, period: usize) -> Self {
        self.periods[func.index()] = clamp(period);
        self
    }
}

const fn clamp(period: usize) -> usize {
    if period > MAX_PERIOD {
        MAX_PERIOD
    } else {
        period
    }
}

impl From<[usize; 13]> for UnstablePeriods {
    fn from(periods: [usize; 13]) -> Self {
        Self {
            periods: periods.map(clamp),
        }
    }
}

impl From<UnstablePeriods> for [usize; 13] {
    fn from(periods: UnstablePeriods) -> Self {
        periods.periods
    }
}

/// Output compatibility mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Compatibility {
    /// TA-Lib behavior: EMA seeded with the mean of the first `period` samples.
    #[default]
    Default,
    /// Metastock behavior: EMA seeded with the first sample.
    Metastock,
}

/// Settings read by lookback calculators and computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Extra warm-up bars per function.
    pub unstable: UnstablePeriods,
    /// Seeding convention.
    pub compatibility: Compatibility,
}

impl Settings {
    /// The out-of-the-box settings used by the convenience functions.
    pub const DEFAULT: Self = Self {
        unstable: UnstablePeriods::ZERO,
        compatibility: Compatibility::Default,
    };

    /// Creates default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns these settings with the unstable period of `func` replaced.
    #[must_use]
    pub const fn with_unstable(mut self, func: UnstableFunc, period: usize) -> Self {
        self.unstable = self.unstable.with(func, period);
        self
    }

    /// Returns these settings with the compatibility mode replaced.
    #[must_use]
    pub const fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }

    /// Shorthand for `self.unstable.get(func)`.
    #[inline]
    #[must_use]
    pub const fn unstable_period(&self, func: UnstableFunc) -> usize {
        self.unstable.get(func)
    }

    /// True when running in Metastock compatibility mode.
    #[inline]
    #[must_use]
    pub const fn is_metastock(&self) -> bool {
        matches!(self.compatibility, Compatibility::Metastock)
    }
}
