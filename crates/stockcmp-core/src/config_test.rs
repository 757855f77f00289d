use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "STOCKCMP_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.regions_path, PathBuf::from("./config/regions.yaml"));
    assert_eq!(cfg.output_dir, PathBuf::from("./output"));
    assert_eq!(cfg.catalog_url_template, DEFAULT_CATALOG_URL_TEMPLATE);
    assert_eq!(cfg.stock_status_url, DEFAULT_STOCK_STATUS_URL);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.inter_request_delay_ms, 300);
    assert_eq!(cfg.max_retries, 0);
    assert_eq!(cfg.retry_backoff_base_secs, 1);
    assert_eq!(cfg.max_concurrent_lookups, 1);
}

#[test]
fn inter_request_delay_ms_override() {
    let mut map = HashMap::new();
    map.insert("STOCKCMP_INTER_REQUEST_DELAY_MS", "1000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_request_delay_ms, 1000);
}

#[test]
fn inter_request_delay_ms_invalid() {
    let mut map = HashMap::new();
    map.insert("STOCKCMP_INTER_REQUEST_DELAY_MS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKCMP_INTER_REQUEST_DELAY_MS"),
        "expected InvalidEnvVar(STOCKCMP_INTER_REQUEST_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("STOCKCMP_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKCMP_MAX_RETRIES"),
        "expected InvalidEnvVar(STOCKCMP_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn max_concurrent_lookups_rejects_zero() {
    let mut map = HashMap::new();
    map.insert("STOCKCMP_MAX_CONCURRENT_LOOKUPS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKCMP_MAX_CONCURRENT_LOOKUPS"),
        "expected InvalidEnvVar(STOCKCMP_MAX_CONCURRENT_LOOKUPS), got: {result:?}"
    );
}

#[test]
fn catalog_url_template_requires_placeholders() {
    let mut map = HashMap::new();
    map.insert("STOCKCMP_CATALOG_URL_TEMPLATE", "https://example.com/catalog");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "STOCKCMP_CATALOG_URL_TEMPLATE"),
        "expected InvalidEnvVar(STOCKCMP_CATALOG_URL_TEMPLATE), got: {result:?}"
    );
}

#[test]
fn paths_override() {
    let mut map = HashMap::new();
    map.insert("STOCKCMP_REGIONS_PATH", "/etc/stockcmp/regions.yaml");
    map.insert("STOCKCMP_OUTPUT_DIR", "/var/reports");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.regions_path, PathBuf::from("/etc/stockcmp/regions.yaml"));
    assert_eq!(cfg.output_dir, PathBuf::from("/var/reports"));
}
