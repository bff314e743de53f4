//! Batch driver for running one indicator over many independent series.
//!
//! Indicators themselves are single-threaded folds. When many instruments
//! need the same indicator, [`BatchProcessor`] spreads the series over a
//! Rayon thread pool if the `parallel` feature is enabled, and walks them in
//! order otherwise. Results keep the order of the input series either way.
//!
//! ```toml
//! [dependencies]
//! ta-smooth = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use ta_smooth::batch::BatchProcessor;
//! use ta_smooth::indicators::ema::ema_with;
//! use ta_smooth::settings::{Settings, UnstableFunc};
//!
//! let series = vec![
//!     vec![1.0_f64, 2.0, 3.0, 4.0, 5.0],
//!     vec![5.0, 4.0, 3.0, 2.0, 1.0],
//! ];
//!
//! let results = BatchProcessor::new()
//!     .settings(Settings::DEFAULT.with_unstable(UnstableFunc::Ema, 1))
//!     .process(&series, |settings, s| ema_with(settings, s, 3))
//!     .unwrap();
//! assert_eq!(results.len(), 2);
//! assert!(results[0][2].is_nan());
//! assert!((results[0][3] - 3.0).abs() < 1e-12);
//! ```

use crate::error::Result;
use crate::settings::Settings;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of series below which batches run sequentially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Runs an indicator over many series with shared [`Settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProcessor {
    settings: Settings,
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a processor with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settings: Settings::DEFAULT,
            min_parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Sets the settings handed to every indicator call.
    #[must_use]
    pub const fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the minimum number of series for which Rayon is used.
    ///
    /// Has no effect without the `parallel` feature.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Returns the settings handed to every indicator call.
    #[must_use]
    pub const fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the minimum number of series for which Rayon is used.
    #[must_use]
    pub const fn get_min_parallel_threshold(&self) -> usize {
        self.min_parallel_threshold
    }

    /// Applies `indicator_fn` to every series.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    pub fn process<T, S, F, R>(&self, series: &[S], indicator_fn: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        S: AsRef<[T]> + Sync,
        F: Fn(&Settings, &[T]) -> Result<R> + Sync,
        R: Send,
    {
        self.dispatch(series, |s| indicator_fn(&self.settings, s.as_ref()))
    }

    /// Applies `indicator_fn` to every `(high, low, close)` triple.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `indicator_fn`.
    pub fn process_hlc<T, F, R>(
        &self,
        datasets: &[(Vec<T>, Vec<T>, Vec<T>)],
        indicator_fn: F,
    ) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&Settings, &[T], &[T], &[T]) -> Result<R> + Sync,
        R: Send,
    {
        self.dispatch(datasets, |(high, low, close)| {
            indicator_fn(&self.settings, high, low, close)
        })
    }

    fn dispatch<I, F, R>(&self, items: &[I], f: F) -> Result<Vec<R>>
    where
        I: Sync,
        F: Fn(&I) -> Result<R> + Sync,
        R: Send,
    {
        #[cfg(feature = "parallel")]
        if items.len() >= self.min_parallel_threshold {
            log::trace!("batch: {} series on rayon", items.len());
            return items.par_iter().map(&f).collect();
        }

        log::trace!("batch: {} series sequential", items.len());
        items.iter().map(f).collect()
    }
}

/// Applies `indicator_fn` to every series under default settings.
///
/// # Errors
///
/// Returns the first error produced by `indicator_fn`.
pub fn process_batch<T, S, F, R>(series: &[S], indicator_fn: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    S: AsRef<[T]> + Sync,
    F: Fn(&[T]) -> Result<R> + Sync,
    R: Send,
{
    BatchProcessor::new().process(series, |_, s| indicator_fn(s))
}
