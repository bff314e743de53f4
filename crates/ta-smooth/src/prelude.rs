//! Commonly used types and functions for glob importing.
//!
//! ```
//! use ta_smooth::prelude::*;
//!
//! let prices: Vec<f64> = (1..=40).map(f64::from).collect();
//!
//! let fast = ema(&prices, 5).unwrap();
//! let routed = ma(&prices, 5, MaType::Ema).unwrap();
//! assert_eq!(fast[4..], routed[4..]);
//!
//! let lines = Macd::new().fast_period(3).slow_period(6).compute(&prices).unwrap();
//! assert_eq!(lines.len(), prices.len());
//! ```
//!
//! # Contents
//!
//! - error types: [`Error`], [`Result`], [`RetCode`], [`RawResult`]
//! - configuration: [`Settings`], [`UnstableFunc`], [`Compatibility`]
//! - the [`SeriesElement`] numeric trait
//! - every high-level indicator function with its `*_lookback`
//! - builder configs and multi-output types

// Error types
pub use crate::error::{Error, RawResult, Result, RetCode};

// Configuration
pub use crate::settings::{Compatibility, Settings, UnstableFunc};

// Traits and helpers
pub use crate::traits::SeriesElement;
pub use crate::utils::OutputRange;

// Indicator functions
pub use crate::indicators::{
    adx, adxr, apo, atr, cmo, dema, dx, ema, kama, ma, macd, macdfix, mama, mavp, minus_di,
    minus_dm, plus_di, plus_dm, ppo, rsi, sma, t3, tema, trange, trima, trix, wma,
};

// Lookback functions
pub use crate::indicators::{
    adx_lookback, adxr_lookback, apo_lookback, atr_lookback, cmo_lookback, dema_lookback,
    dx_lookback, ema_lookback, kama_lookback, ma_lookback, macd_lookback, macdfix_lookback,
    mama_lookback, mavp_lookback, minus_di_lookback, minus_dm_lookback, plus_di_lookback,
    plus_dm_lookback, rsi_lookback, sma_lookback, t3_lookback, tema_lookback, trange_lookback,
    trima_lookback, trix_lookback, wma_lookback,
};

// Configs and multi-output types
pub use crate::indicators::{
    MaType, Macd, MacdExt, MacdOutput, Mama, MamaOutput, MovingAverage, PriceOscillator, T3,
};

// Batch driver
pub use crate::batch::BatchProcessor;
