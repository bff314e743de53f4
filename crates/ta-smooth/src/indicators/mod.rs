//! Moving averages and the indicators built on them.
//!
//! Every indicator is available in two tiers:
//!
//! - a **raw** function (`*_raw`) that works on an explicit inclusive index
//!   window `[start_idx, end_idx]`, writes a compacted output and reports
//!   where that output begins through an [`OutputRange`](crate::utils::OutputRange)
//! - a **series** function that takes whole arrays, skips the leading NaN
//!   run, and returns a vector of the input's length with NaN in every slot
//!   that has no defined value
//!
//! Each indicator also exposes a `*_lookback` function giving the number of
//! input bars consumed before the first output. Recursive indicators add the
//! unstable period configured in [`Settings`](crate::settings::Settings).
//!
//! # Indicator Families
//!
//! ## Moving Averages
//!
//! - [`sma`], [`ema`], [`wma`], [`trima`] - basic averages
//! - [`dema`], [`tema`], [`t3`], [`trix`] - cascaded EMAs
//! - [`kama`], [`mama`] - adaptive averages
//! - [`ma`], [`mavp`] - dispatch by [`MaType`], optionally per-bar period
//!
//! ## Oscillators
//!
//! - [`macd`], [`macdfix`], [`MacdExt`] - moving average convergence/divergence
//! - [`apo`], [`ppo`] - absolute and percentage price oscillators
//! - [`rsi`], [`cmo`] - Wilder-smoothed gain/loss oscillators
//!
//! ## Wilder Directional System
//!
//! - [`plus_dm`], [`minus_dm`], [`plus_di`], [`minus_di`]
//! - [`dx`], [`adx`], [`adxr`]
//! - [`trange`], [`atr`]
//!
//! # Example
//!
//! ```
//! use ta_smooth::indicators::{ema, sma, MaType, ma};
//!
//! let prices = vec![44.0_f64, 44.5, 43.5, 44.5, 44.0, 43.0, 42.5, 43.5, 44.5, 45.0];
//!
//! let simple = sma(&prices, 5).unwrap();
//! let routed = ma(&prices, 5, MaType::Sma).unwrap();
//! assert_eq!(simple[4..], routed[4..]);
//!
//! let smoothed = ema(&prices, 5).unwrap();
//! assert!(smoothed[3].is_nan());
//! ```

pub mod apo;
pub mod atr;
pub mod dema;
pub mod directional;
pub mod ema;
pub mod kama;
pub mod ma;
pub mod macd;
pub mod mama;
pub mod rsi;
pub mod sma;
pub mod t3;
pub mod tema;
pub mod trima;
pub mod trix;
pub mod wma;

pub use apo::{apo, apo_lookback, ppo, PriceOscillator};
pub use atr::{atr, atr_lookback, trange, trange_lookback};
pub use dema::{dema, dema_lookback};
pub use directional::{
    adx, adx_lookback, adxr, adxr_lookback, dx, dx_lookback, minus_di, minus_di_lookback,
    minus_dm, minus_dm_lookback, plus_di, plus_di_lookback, plus_dm, plus_dm_lookback,
};
pub use ema::{ema, ema_lookback};
pub use kama::{kama, kama_lookback};
pub use ma::{ma, ma_lookback, mavp, mavp_lookback, MaType, MovingAverage};
pub use macd::{macd, macd_lookback, macdfix, macdfix_lookback, Macd, MacdExt, MacdOutput};
pub use mama::{mama, mama_lookback, Mama, MamaOutput};
pub use rsi::{cmo, cmo_lookback, rsi, rsi_lookback};
pub use sma::{sma, sma_lookback};
pub use t3::{t3, t3_lookback, T3};
pub use tema::{tema, tema_lookback};
pub use trima::{trima, trima_lookback};
pub use trix::{trix, trix_lookback};
pub use wma::{wma, wma_lookback};
