//! Integration tests for the public API.
//!
//! Covers the documented end-to-end scenarios, the lookback/NaN-prefix
//! contract of every high-level function, and the error behavior of both
//! API tiers.

#![allow(clippy::needless_range_loop)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

mod common;

use common::{approx_eq, verify_nan_prefix, wave_bars, wave_series, with_nan_prefix, EPSILON};
use ta_smooth::indicators::atr::atr_with;
use ta_smooth::indicators::dema::dema_with;
use ta_smooth::indicators::directional::{
    adx_lookback_with, adx_with, adxr_with, dx_with, minus_di_with, minus_dm_with, plus_di_with,
    plus_dm_with,
};
use ta_smooth::indicators::ema::{ema_lookback_with, ema_with};
use ta_smooth::indicators::kama::kama_with;
use ta_smooth::indicators::macd::macdext_raw;
use ta_smooth::indicators::rsi::{cmo_with, rsi_with};
use ta_smooth::indicators::sma::sma_raw;
use ta_smooth::indicators::tema::tema_with;
use ta_smooth::indicators::trix::trix_with;
use ta_smooth::indicators::wma::wma_raw;
use ta_smooth::prelude::*;
use ta_smooth::utils::MAX_PERIOD;

type SeriesFn = Box<dyn Fn(&[f64]) -> Vec<f64>>;
type BarsFn = Box<dyn Fn(&[f64], &[f64], &[f64]) -> Vec<f64>>;

fn series_fn(f: impl Fn(&[f64]) -> Vec<f64> + 'static) -> SeriesFn {
    Box::new(f)
}

fn bars_fn(f: impl Fn(&[f64], &[f64], &[f64]) -> Vec<f64> + 'static) -> BarsFn {
    Box::new(f)
}

fn single_input_cases() -> Vec<(&'static str, usize, SeriesFn)> {
    vec![
        ("sma", sma_lookback(7), series_fn(|d: &[f64]| sma(d, 7).unwrap())),
        ("ema", ema_lookback(7), series_fn(|d: &[f64]| ema(d, 7).unwrap())),
        ("wma", wma_lookback(7), series_fn(|d: &[f64]| wma(d, 7).unwrap())),
        ("trima", trima_lookback(8), series_fn(|d: &[f64]| trima(d, 8).unwrap())),
        ("dema", dema_lookback(6), series_fn(|d: &[f64]| dema(d, 6).unwrap())),
        ("tema", tema_lookback(5), series_fn(|d: &[f64]| tema(d, 5).unwrap())),
        ("trix", trix_lookback(5), series_fn(|d: &[f64]| trix(d, 5).unwrap())),
        ("t3", t3_lookback(4), series_fn(|d: &[f64]| t3(d, 4, 0.7).unwrap())),
        ("kama", kama_lookback(10), series_fn(|d: &[f64]| kama(d, 10).unwrap())),
        ("mama", mama_lookback(), series_fn(|d: &[f64]| mama(d, 0.5, 0.05).unwrap().mama)),
        ("fama", mama_lookback(), series_fn(|d: &[f64]| mama(d, 0.5, 0.05).unwrap().fama)),
        (
            "ma_kama",
            ma_lookback(9, MaType::Kama),
            series_fn(|d: &[f64]| ma(d, 9, MaType::Kama).unwrap()),
        ),
        (
            "macd",
            macd_lookback(12, 26, 9),
            series_fn(|d: &[f64]| macd(d, 12, 26, 9).unwrap().macd_line),
        ),
        (
            "macd_hist",
            macd_lookback(5, 13, 4),
            series_fn(|d: &[f64]| macd(d, 5, 13, 4).unwrap().histogram),
        ),
        (
            "macdfix",
            macdfix_lookback(9),
            series_fn(|d: &[f64]| macdfix(d, 9).unwrap().signal_line),
        ),
        (
            "macdext",
            MacdExt::new().fast(6, MaType::Wma).slow(15, MaType::Tema).lookback(),
            series_fn(|d: &[f64]| {
                MacdExt::new()
                    .fast(6, MaType::Wma)
                    .slow(15, MaType::Tema)
                    .compute(d)
                    .unwrap()
                    .signal_line
            }),
        ),
        (
            "apo",
            apo_lookback(5, 12, MaType::Ema),
            series_fn(|d: &[f64]| apo(d, 5, 12, MaType::Ema).unwrap()),
        ),
        (
            "ppo",
            apo_lookback(5, 12, MaType::Dema),
            series_fn(|d: &[f64]| ppo(d, 5, 12, MaType::Dema).unwrap()),
        ),
        ("rsi", rsi_lookback(14), series_fn(|d: &[f64]| rsi(d, 14).unwrap())),
        ("cmo", cmo_lookback(9), series_fn(|d: &[f64]| cmo(d, 9).unwrap())),
    ]
}

fn bar_cases() -> Vec<(&'static str, usize, BarsFn)> {
    vec![
        ("trange", trange_lookback(), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| trange(h, l, c).unwrap())),
        ("atr", atr_lookback(14), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| atr(h, l, c, 14).unwrap())),
        ("plus_dm", plus_dm_lookback(14), bars_fn(|h: &[f64], l: &[f64], _: &[f64]| plus_dm(h, l, 14).unwrap())),
        ("minus_dm", minus_dm_lookback(14), bars_fn(|h: &[f64], l: &[f64], _: &[f64]| minus_dm(h, l, 14).unwrap())),
        ("plus_di", plus_di_lookback(14), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| plus_di(h, l, c, 14).unwrap())),
        ("minus_di", minus_di_lookback(14), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| minus_di(h, l, c, 14).unwrap())),
        ("dx", dx_lookback(14), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| dx(h, l, c, 14).unwrap())),
        ("adx", adx_lookback(14), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| adx(h, l, c, 14).unwrap())),
        ("adxr", adxr_lookback(14), bars_fn(|h: &[f64], l: &[f64], c: &[f64]| adxr(h, l, c, 14).unwrap())),
    ]
}

// ==================== End-to-End Scenarios ====================

#[test]
fn test_scenario_sma_three() {
    let result = sma(&[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
    assert_eq!(sma_lookback(3), 2);
    assert!(verify_nan_prefix(&result, 2));
    assert_eq!(result[2..], [2.0, 3.0, 4.0]);

    let mut out = [0.0; 5];
    let range = sma_raw(0, 4, &[1.0_f64, 2.0, 3.0, 4.0, 5.0], 3, &mut out).unwrap();
    assert_eq!(range, OutputRange::new(2, 3));
    assert_eq!(out[..range.len], [2.0, 3.0, 4.0]);
}

#[test]
fn test_scenario_ema_constant() {
    let result = ema(&[1.0_f64; 10], 3).unwrap();
    assert!(verify_nan_prefix(&result, 2));
    for &v in &result[2..] {
        assert_eq!(v, 1.0);
    }
}

#[test]
fn test_scenario_wma_single_output() {
    let mut out = [0.0; 1];
    let range = wma_raw(0, 2, &[1.0_f64, 2.0, 3.0], 3, &mut out).unwrap();
    assert_eq!(range, OutputRange::new(2, 1));
    assert!(approx_eq(out[0], 14.0 / 6.0, EPSILON));
}

#[test]
fn test_scenario_trange_second_bar() {
    let result = trange(&[9.0_f64, 10.0], &[8.5, 8.0], &[9.0, 9.5]).unwrap();
    assert!(result[0].is_nan());
    assert_eq!(result[1], 2.0);
}

#[test]
fn test_scenario_macd_linear_trend() {
    let data: Vec<f64> = (0..500).map(|i| 10.0 + i as f64).collect();
    let out = macd(&data, 12, 26, 9).unwrap();
    let lookback = macd_lookback(12, 26, 9);
    assert!(verify_nan_prefix(&out.macd_line, lookback));

    // Fast EMA lags by (12-1)/2 bars and slow by (26-1)/2 on a unit slope
    for i in lookback..data.len() {
        assert!(out.macd_line[i] > 0.0);
        assert!(approx_eq(out.macd_line[i], 7.0, 1e-6));
        assert!(out.histogram[i].abs() < 1e-6);
    }
}

#[test]
fn test_scenario_insufficient_data() {
    let result = sma(&[1.0_f64, 2.0], 5).unwrap();
    assert_eq!(result.len(), 2);
    assert!(result.iter().all(|v| v.is_nan()));

    let mut out = [0.0; 2];
    let range = sma_raw(0, 1, &[1.0_f64, 2.0], 5, &mut out).unwrap();
    assert!(range.is_empty());
    assert_eq!(range, OutputRange::EMPTY);
}

// ==================== Lookback Contract Tests ====================

#[test]
fn test_nan_prefix_equals_lookback_for_every_indicator() {
    let data = wave_series(300);
    for (name, lookback, f) in single_input_cases() {
        let result = f(&data);
        assert_eq!(result.len(), data.len(), "{name}");
        assert!(verify_nan_prefix(&result, lookback), "{name}: lookback {lookback}");
    }

    let (high, low, close) = wave_bars(300);
    for (name, lookback, f) in bar_cases() {
        let result = f(&high, &low, &close);
        assert_eq!(result.len(), high.len(), "{name}");
        assert!(verify_nan_prefix(&result, lookback), "{name}: lookback {lookback}");
    }
}

#[test]
fn test_leading_nans_shift_output() {
    let data = wave_series(200);
    let shifted = with_nan_prefix(&data, 5);
    for (name, lookback, f) in single_input_cases() {
        let plain = f(&data);
        let result = f(&shifted);
        assert!(verify_nan_prefix(&result, 5 + lookback), "{name}");
        for i in lookback..data.len() {
            assert!(approx_eq(result[i + 5], plain[i], EPSILON), "{name} at {i}");
        }
    }
}

#[test]
fn test_begin_index_is_latest_of_bar_inputs() {
    let (high, low, close) = wave_bars(120);
    let low = with_nan_prefix(&low[3..], 3);
    for (name, lookback, f) in bar_cases() {
        let result = f(&high, &low, &close);
        assert!(verify_nan_prefix(&result, 3 + lookback), "{name}");
    }
}

#[test]
fn test_mavp_nan_prefix() {
    let data = wave_series(150);
    let periods: Vec<f64> = (0..150).map(|i| (2 + i % 9) as f64).collect();
    let result = mavp(&data, &periods, 2, 10, MaType::Ema).unwrap();
    assert!(verify_nan_prefix(&result, mavp_lookback(10, MaType::Ema)));
}

#[test]
fn test_short_input_is_all_nan_for_every_indicator() {
    let data = wave_series(20);
    for (name, lookback, f) in single_input_cases() {
        if lookback >= data.len() {
            assert!(f(&data).iter().all(|v| v.is_nan()), "{name}");
        }
    }
}

#[test]
fn test_empty_input_gives_empty_output() {
    let empty: Vec<f64> = Vec::new();
    for (name, _, f) in single_input_cases() {
        assert!(f(&empty).is_empty(), "{name}");
    }
    for (name, _, f) in bar_cases() {
        assert!(f(&empty, &empty, &empty).is_empty(), "{name}");
    }
}

// ==================== Settings Tests ====================

#[test]
fn test_unstable_period_delays_output() {
    let data = wave_series(120);
    let settings = Settings::DEFAULT.with_unstable(UnstableFunc::Ema, 10);
    let plain = ema(&data, 8).unwrap();
    let delayed = ema_with(&settings, &data, 8).unwrap();
    assert!(verify_nan_prefix(&delayed, 17));
    for i in 17..data.len() {
        assert!(approx_eq(delayed[i], plain[i], EPSILON));
    }
}

#[test]
fn test_oversized_unstable_periods_produce_no_output() {
    let data = wave_series(200);
    let (high, low, close) = wave_bars(200);
    let mut settings = Settings::DEFAULT;
    settings.unstable.set_all(usize::MAX);

    assert_eq!(ema_lookback_with(&settings, 10), 9 + MAX_PERIOD);
    assert_eq!(adx_lookback_with(&settings, 14), 27 + MAX_PERIOD);

    let outputs = vec![
        ("ema", ema_with(&settings, &data, 10).unwrap()),
        ("dema", dema_with(&settings, &data, 10).unwrap()),
        ("tema", tema_with(&settings, &data, 10).unwrap()),
        ("trix", trix_with(&settings, &data, 10).unwrap()),
        ("kama", kama_with(&settings, &data, 10).unwrap()),
        ("rsi", rsi_with(&settings, &data, 14).unwrap()),
        ("cmo", cmo_with(&settings, &data, 14).unwrap()),
        ("t3", T3::new().settings(settings).compute(&data).unwrap()),
        ("mama", Mama::new().settings(settings).compute(&data).unwrap().mama),
        ("macd", Macd::new().settings(settings).compute(&data).unwrap().macd_line),
        ("atr", atr_with(&settings, &high, &low, &close, 14).unwrap()),
        ("plus_dm", plus_dm_with(&settings, &high, &low, 14).unwrap()),
        ("minus_dm", minus_dm_with(&settings, &high, &low, 14).unwrap()),
        ("plus_di", plus_di_with(&settings, &high, &low, &close, 14).unwrap()),
        ("minus_di", minus_di_with(&settings, &high, &low, &close, 14).unwrap()),
        ("dx", dx_with(&settings, &high, &low, &close, 14).unwrap()),
        ("adx", adx_with(&settings, &high, &low, &close, 14).unwrap()),
        ("adxr", adxr_with(&settings, &high, &low, &close, 14).unwrap()),
    ];
    for (name, output) in outputs {
        assert_eq!(output.len(), 200, "{name}");
        assert!(output.iter().all(|v| v.is_nan()), "{name}");
    }
}

#[test]
fn test_metastock_seeds_ema_with_first_sample() {
    let data = wave_series(40);
    let settings = Settings::DEFAULT.with_compatibility(Compatibility::Metastock);
    let result = ema_with(&settings, &data, 5).unwrap();
    assert!(verify_nan_prefix(&result, 4));

    let k = 2.0 / 6.0;
    let mut expected = data[0];
    for i in 1..data.len() {
        expected = (data[i] - expected) * k + expected;
        if i >= 4 {
            assert!(approx_eq(result[i], expected, EPSILON));
        }
    }
}

// ==================== Error Handling Tests ====================

#[test]
fn test_high_level_errors() {
    let (high, low, close) = wave_bars(30);
    assert!(matches!(
        atr(&high[..20], &low, &close, 5),
        Err(Error::LengthMismatch { expected: 20, actual: 30 })
    ));
    assert!(matches!(sma(&[f64::NAN; 8], 3), Err(Error::AllNaN)));
    assert!(matches!(
        mavp(&wave_series(10), &wave_series(9), 2, 5, MaType::Sma),
        Err(Error::LengthMismatch { .. })
    ));
}

#[cfg(not(feature = "no-range-check"))]
#[test]
fn test_bad_params_rejected() {
    let data = wave_series(30);
    let (high, low, close) = wave_bars(30);
    assert!(matches!(
        ema(&data, 1),
        Err(Error::Compute(RetCode::BadParam { .. }))
    ));
    assert!(matches!(
        adx(&high, &low, &close, 1),
        Err(Error::Compute(RetCode::BadParam { .. }))
    ));
    assert!(matches!(
        t3(&data, 5, 1.5),
        Err(Error::Compute(RetCode::BadParam { .. }))
    ));
    assert!(matches!(
        sma(&data, 100_001),
        Err(Error::Compute(RetCode::BadParam { .. }))
    ));
}

#[test]
fn test_raw_index_errors() {
    let input = wave_series(10);
    let mut out = [0.0; 10];
    assert!(matches!(
        sma_raw(10, 10, &input, 3, &mut out),
        Err(RetCode::OutOfRangeStartIndex { start_idx: 10, len: 10 })
    ));
    assert!(matches!(
        sma_raw(5, 4, &input, 3, &mut out),
        Err(RetCode::OutOfRangeEndIndex { .. })
    ));
    assert!(matches!(
        sma_raw(0, 10, &input, 3, &mut out),
        Err(RetCode::OutOfRangeEndIndex { .. })
    ));
    assert!(matches!(
        sma_raw(0, 9, &input, 3, &mut out[..4]),
        Err(RetCode::BufferTooSmall { required: 8, actual: 4 })
    ));
}

#[test]
fn test_raw_macdext_window() {
    let input = wave_series(80);
    let (mut m, mut s, mut h) = (vec![0.0; 80], vec![0.0; 80], vec![0.0; 80]);
    let range = macdext_raw(
        &Settings::DEFAULT,
        0,
        79,
        &input,
        (4, MaType::Sma),
        (10, MaType::Sma),
        (3, MaType::Sma),
        &mut m,
        &mut s,
        &mut h,
    )
    .unwrap();
    assert_eq!(range.begin, 11);
    assert_eq!(range.len, 69);
    for k in 0..range.len {
        assert_eq!(h[k], m[k] - s[k]);
    }
}

// ==================== Builder Tests ====================

#[test]
fn test_builders_match_functions() {
    let data = wave_series(100);
    let routed = MovingAverage::new().period(12).ma_type(MaType::Tema).compute(&data).unwrap();
    let direct = tema(&data, 12).unwrap();
    for i in tema_lookback(12)..data.len() {
        assert!(approx_eq(routed[i], direct[i], EPSILON));
    }

    let lines = Macd::new().compute(&data).unwrap();
    let direct = macd(&data, 12, 26, 9).unwrap();
    assert_eq!(lines.len(), data.len());
    for i in macd_lookback(12, 26, 9)..data.len() {
        assert!(approx_eq(lines.macd_line[i], direct.macd_line[i], EPSILON));
    }

    let smooth = T3::new().compute(&data).unwrap();
    assert!(verify_nan_prefix(&smooth, t3_lookback(5)));
}
