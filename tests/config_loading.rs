//! Behavior tests for loading dashboard configuration documents.

use std::fs;

use marketpulse_core::{
    ConfigError, DashboardConfig, SeriesKind, Theme, ValidationError, DEFAULT_API_BASE,
};
use tempfile::tempdir;

#[test]
fn when_config_file_sets_some_fields_the_rest_use_defaults() {
    // Given: A config file that only changes the symbols and interval
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("dashboard.json");
    fs::write(
        &path,
        r#"{
            "stockSymbol": "MSFT",
            "forexPair": "GBPUSD",
            "refreshInterval": 60,
            "showCrypto": false,
            "theme": "light"
        }"#,
    )
    .expect("write config");

    // When: The file is loaded
    let config = DashboardConfig::from_path(&path).expect("config should load");

    // Then: Named fields are applied and the others keep their defaults
    assert_eq!(config.stock_symbol.as_str(), "MSFT");
    assert_eq!(config.crypto_symbol.as_str(), "BTC");
    assert_eq!(config.forex_pair.to_string(), "GBP/USD");
    assert_eq!(config.refresh_interval.as_secs(), 60);
    assert_eq!(config.theme, Theme::Light);
    assert!(!config.is_visible(SeriesKind::Crypto));
    assert!(config.is_visible(SeriesKind::MarketOverview));
    assert!(config.use_real_data);
    assert!(!config.offline);
    assert_eq!(config.api_base, DEFAULT_API_BASE);
}

#[test]
fn when_config_file_is_missing_error_names_the_path() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("missing.json");

    let error = DashboardConfig::from_path(&path).expect_err("missing file");

    match error {
        ConfigError::Io { path: reported, .. } => assert!(reported.ends_with("missing.json")),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn when_interval_is_out_of_range_loading_fails() {
    let error = DashboardConfig::from_json_str(r#"{"refreshInterval": 5}"#)
        .expect_err("interval below minimum");

    assert!(matches!(error, ConfigError::Parse(_)));
    assert!(error.to_string().contains("outside [10, 300]"));
}

#[test]
fn when_symbol_is_malformed_loading_fails() {
    let error =
        DashboardConfig::from_json_str(r#"{"cryptoSymbol": "9BTC"}"#).expect_err("bad symbol");
    assert!(matches!(error, ConfigError::Parse(_)));

    let error =
        DashboardConfig::from_json_str(r#"{"forexPair": "EURO"}"#).expect_err("bad pair");
    assert!(matches!(error, ConfigError::Parse(_)));
}

#[test]
fn when_api_base_is_not_http_loading_fails() {
    let error = DashboardConfig::from_json_str(r#"{"apiBase": "ftp://example.com"}"#)
        .expect_err("bad scheme");

    assert!(matches!(
        error,
        ConfigError::Validation(ValidationError::InvalidApiBase { .. })
    ));
}

#[test]
fn when_timeout_is_zero_loading_fails() {
    let error = DashboardConfig::from_json_str(r#"{"requestTimeoutMs": 0}"#)
        .expect_err("zero timeout");

    assert!(matches!(
        error,
        ConfigError::Validation(ValidationError::ZeroTimeout)
    ));
}

#[test]
fn refresh_key_ignores_presentation_fields() {
    let base = DashboardConfig::default();
    let mut cosmetic = base.clone();
    cosmetic.theme = Theme::Light;
    cosmetic.set_visible(SeriesKind::Forex, false);
    assert_eq!(base.refresh_key(), cosmetic.refresh_key());

    let offline = DashboardConfig {
        offline: true,
        ..base.clone()
    };
    assert_ne!(base.refresh_key(), offline.refresh_key());
}
