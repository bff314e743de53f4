//! ta-smooth: TA-Lib compatible moving averages and the indicators built on them
//!
//! This crate implements the TA-Lib moving-average family (SMA, EMA, WMA,
//! TRIMA, DEMA, TEMA, TRIX, T3, KAMA, MAMA, MAVP), the MACD family and the
//! price oscillators on top of it, and the Wilder-smoothed directional
//! system (DM, DI, DX, ADX, ADXR, ATR, RSI, CMO). Numeric results follow
//! TA-Lib, including its warm-up (lookback) and unstable-period conventions.
//!
//! # Quick Start
//!
//! ```
//! use ta_smooth::prelude::*;
//!
//! let data = vec![1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let result = sma(&data, 3).unwrap();
//!
//! // First 2 values are NaN (lookback period)
//! assert!(result[0].is_nan());
//! assert!(result[1].is_nan());
//! assert!((result[2] - 2.0).abs() < 1e-10);
//! assert_eq!(sma_lookback(3), 2);
//! ```
//!
//! # Two tiers
//!
//! Every indicator has a low-level `*_raw` function mirroring TA-Lib's
//! `TA_XXX(startIdx, endIdx, ...)` contract, returning a [`RawResult`] with
//! the [`OutputRange`] that was written, and a high-level function over
//! whole series returning a NaN-padded vector of the input's length.
//!
//! ```
//! use ta_smooth::indicators::sma::sma_raw;
//! use ta_smooth::OutputRange;
//!
//! let input = [1.0_f64, 2.0, 3.0, 4.0, 5.0];
//! let mut out = [0.0; 5];
//! let range = sma_raw(0, 4, &input, 3, &mut out).unwrap();
//! assert_eq!(range, OutputRange::new(2, 3));
//! assert_eq!(out[..3], [2.0, 3.0, 4.0]);
//! ```
//!
//! # Settings
//!
//! Unstable periods and the Metastock compatibility switch live in a
//! [`Settings`] value passed to the `*_with` functions instead of global
//! state. The plain functions use [`Settings::DEFAULT`].
//!
//! # Error Handling
//!
//! ```
//! use ta_smooth::prelude::*;
//!
//! // Too little data is not an error: the output is all NaN
//! let short_data = vec![1.0_f64, 2.0];
//! assert!(sma(&short_data, 10).unwrap().iter().all(|v| v.is_nan()));
//!
//! // A bad parameter is
//! assert!(matches!(
//!     sma(&[1.0_f64, 2.0, 3.0], 0),
//!     Err(Error::Compute(RetCode::BadParam { .. }))
//! ));
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod indicators;
pub mod prelude;
pub mod settings;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, RawResult, Result, RetCode};
pub use indicators::MaType;
pub use settings::{Compatibility, Settings, UnstableFunc, UnstablePeriods};
pub use traits::SeriesElement;
pub use utils::{approx_eq, approx_eq_relative, count_nan_prefix, OutputRange, EPSILON, LOOSE_EPSILON};
