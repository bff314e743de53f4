//! JSON configuration tests for `Settings` and `MaType`.

#![cfg(feature = "serde")]

use ta_smooth::indicators::ema::{ema_lookback_with, ema_with};
use ta_smooth::utils::MAX_PERIOD;
use ta_smooth::{Compatibility, MaType, Settings, UnstableFunc};

#[test]
fn test_settings_round_trip() {
    let settings = Settings::DEFAULT
        .with_unstable(UnstableFunc::Adx, 3)
        .with_unstable(UnstableFunc::T3, 7)
        .with_compatibility(Compatibility::Metastock);

    let json = serde_json::to_string(&settings).unwrap();
    let parsed: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, settings);
}

#[test]
fn test_settings_from_config_file() {
    let json = r#"{
        "unstable": [0, 0, 0, 0, 12, 0, 0, 0, 0, 0, 0, 0, 0],
        "compatibility": "default"
    }"#;
    let settings: Settings = serde_json::from_str(json).unwrap();
    assert_eq!(settings.unstable_period(UnstableFunc::Ema), 12);
    assert_eq!(settings.unstable_period(UnstableFunc::Adx), 0);
    assert_eq!(ema_lookback_with(&settings, 10), 21);
}

#[test]
fn test_oversized_unstable_period_is_clamped_on_load() {
    let json = format!(
        r#"{{"unstable": [0, 0, 0, 0, {}, 0, 0, 0, 0, 0, 0, 0, 0]}}"#,
        usize::MAX
    );
    let settings: Settings = serde_json::from_str(&json).unwrap();
    assert_eq!(settings.unstable_period(UnstableFunc::Ema), MAX_PERIOD);

    let data: Vec<f64> = (0..50).map(f64::from).collect();
    let result = ema_with(&settings, &data, 10).unwrap();
    assert!(result.iter().all(|v| v.is_nan()));
}

#[test]
fn test_settings_missing_fields_default() {
    let settings: Settings = serde_json::from_str(r#"{"compatibility": "metastock"}"#).unwrap();
    assert!(settings.is_metastock());
    assert_eq!(settings.unstable, Settings::DEFAULT.unstable);

    let empty: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Settings::DEFAULT);
}

#[test]
fn test_loaded_settings_drive_computation() {
    let settings: Settings = serde_json::from_str(r#"{"compatibility": "metastock"}"#).unwrap();
    let data = [2.0_f64, 4.0, 6.0];
    let result = ema_with(&settings, &data, 2).unwrap();
    // Seeded with the first sample, k = 2/3
    let expected = (4.0 - 2.0) * (2.0 / 3.0) + 2.0;
    assert!((result[1] - expected).abs() < 1e-12);
}

#[test]
fn test_ma_type_names() {
    assert_eq!(serde_json::to_string(&MaType::Trima).unwrap(), "\"trima\"");
    let parsed: Vec<MaType> = serde_json::from_str(r#"["sma", "kama", "t3"]"#).unwrap();
    assert_eq!(parsed, vec![MaType::Sma, MaType::Kama, MaType::T3]);
}
