//! Shared test utilities for ta-smooth integration tests.

/// Approximate equality that treats two NaN values as equal.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Looser epsilon for comparisons involving accumulated floating-point operations.
#[allow(dead_code)]
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Count the number of NaN values in a slice.
#[allow(dead_code)]
pub fn count_nans(data: &[f64]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Verify that the first `n` values are NaN and the rest are not.
#[allow(dead_code)]
pub fn verify_nan_prefix(data: &[f64], expected_nan_count: usize) -> bool {
    data.iter()
        .enumerate()
        .all(|(i, v)| v.is_nan() == (i < expected_nan_count))
}

/// A deterministic, trending and oscillating close series.
#[allow(dead_code)]
pub fn wave_series(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let x = i as f64;
            100.0 + x * 0.15 + (x * 0.21).sin() * 4.0 + (x * 0.07).cos() * 2.5
        })
        .collect()
}

/// High/low/close bars around [`wave_series`] with `high >= close >= low`.
#[allow(dead_code)]
pub fn wave_bars(len: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let close = wave_series(len);
    let high = close
        .iter()
        .enumerate()
        .map(|(i, c)| c + 0.5 + ((i * 7) % 5) as f64 * 0.2)
        .collect();
    let low = close
        .iter()
        .enumerate()
        .map(|(i, c)| c - 0.4 - ((i * 3) % 4) as f64 * 0.25)
        .collect();
    (high, low, close)
}

/// Prepends `count` NaN values to `data`.
#[allow(dead_code)]
pub fn with_nan_prefix(data: &[f64], count: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; count];
    out.extend_from_slice(data);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_nan() {
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(f64::NAN, 1.0, EPSILON));
        assert!(approx_eq(1.0, 1.0 + 1e-11, EPSILON));
    }

    #[test]
    fn test_verify_nan_prefix() {
        let data = vec![f64::NAN, f64::NAN, 1.0, 2.0, 3.0];
        assert!(verify_nan_prefix(&data, 2));
        assert!(!verify_nan_prefix(&data, 3));
        assert!(!verify_nan_prefix(&data, 1));
    }

    #[test]
    fn test_wave_bars_ordered() {
        let (high, low, close) = wave_bars(50);
        for i in 0..50 {
            assert!(high[i] >= close[i] && close[i] >= low[i]);
        }
    }
}
