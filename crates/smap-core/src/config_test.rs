use std::collections::HashMap;
use std::env::VarError;

use super::build_app_config;

fn lookup_from<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key: &str| map.get(key).map(|v| (*v).to_string()).ok_or(VarError::NotPresent)
}

#[test]
fn defaults_apply_when_env_is_empty() {
    let env = HashMap::new();
    let config = build_app_config(lookup_from(&env)).expect("config should build");

    assert_eq!(config.log_level, "info");
    assert_eq!(config.platforms_path.to_str(), Some("./config/platforms.yaml"));
    assert_eq!(config.out_dir.to_str(), Some("./data"));
    assert_eq!(config.request_timeout_secs, 30);
    assert_eq!(config.ma_window, 7);
    assert_eq!(config.top_overall_n, 5);
    assert_eq!(config.top_platform_n, 3);
    assert!(config.twitter_bearer_token.is_none());
    assert!(config.youtube_api_key.is_none());
    assert!(config.facebook_access_token.is_none());
}

#[test]
fn explicit_values_override_defaults() {
    let env = HashMap::from([
        ("SMAP_LOG_LEVEL", "debug"),
        ("SMAP_OUT_DIR", "/tmp/smap-out"),
        ("SMAP_MA_WINDOW", "14"),
        ("SMAP_TOP_OVERALL_N", "10"),
        ("TWITTER_BEARER_TOKEN", "AAAA.real.token"),
    ]);
    let config = build_app_config(lookup_from(&env)).expect("config should build");

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.out_dir.to_str(), Some("/tmp/smap-out"));
    assert_eq!(config.ma_window, 14);
    assert_eq!(config.top_overall_n, 10);
    assert_eq!(config.twitter_bearer_token.as_deref(), Some("AAAA.real.token"));
}

#[test]
fn placeholder_credentials_count_as_unset() {
    let env = HashMap::from([
        ("TWITTER_BEARER_TOKEN", "your_twitter_bearer_token_here"),
        ("YOUTUBE_API_KEY", "   "),
        ("FACEBOOK_ACCESS_TOKEN", "EAAB.actual.token"),
    ]);
    let config = build_app_config(lookup_from(&env)).expect("config should build");

    assert!(config.twitter_bearer_token.is_none());
    assert!(config.youtube_api_key.is_none());
    assert_eq!(config.facebook_access_token.as_deref(), Some("EAAB.actual.token"));
}

#[test]
fn non_numeric_window_is_rejected() {
    let env = HashMap::from([("SMAP_MA_WINDOW", "seven")]);
    let err = build_app_config(lookup_from(&env)).expect_err("should reject");
    assert!(err.to_string().contains("SMAP_MA_WINDOW"), "got: {err}");
}

#[test]
fn zero_window_is_rejected() {
    let env = HashMap::from([("SMAP_MA_WINDOW", "0")]);
    let err = build_app_config(lookup_from(&env)).expect_err("should reject");
    assert!(err.to_string().contains("at least 1"), "got: {err}");
}
