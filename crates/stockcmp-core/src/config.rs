use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_CATALOG_URL_TEMPLATE: &str =
    "https://business.wilsonart.com/en/catalog/category/view/s/hpl/id/8/?zipcode={zipcode}&p={page}";

pub const DEFAULT_STOCK_STATUS_URL: &str =
    "https://business.wilsonart.com/en/webservices/index/stockstatus/";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("STOCKCMP_ENV", "development"))?;
    let log_level = or_default("STOCKCMP_LOG_LEVEL", "info");
    let regions_path = PathBuf::from(or_default("STOCKCMP_REGIONS_PATH", "./config/regions.yaml"));
    let output_dir = PathBuf::from(or_default("STOCKCMP_OUTPUT_DIR", "./output"));

    let catalog_url_template =
        or_default("STOCKCMP_CATALOG_URL_TEMPLATE", DEFAULT_CATALOG_URL_TEMPLATE);
    if !catalog_url_template.contains("{zipcode}") || !catalog_url_template.contains("{page}") {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKCMP_CATALOG_URL_TEMPLATE".to_string(),
            reason: "template must contain {zipcode} and {page} placeholders".to_string(),
        });
    }
    let stock_status_url = or_default("STOCKCMP_STOCK_STATUS_URL", DEFAULT_STOCK_STATUS_URL);

    let request_timeout_secs = parse_u64("STOCKCMP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("STOCKCMP_USER_AGENT", DEFAULT_USER_AGENT);
    let inter_request_delay_ms = parse_u64("STOCKCMP_INTER_REQUEST_DELAY_MS", "300")?;
    let max_retries = parse_u32("STOCKCMP_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("STOCKCMP_RETRY_BACKOFF_BASE_SECS", "1")?;
    let max_concurrent_lookups = parse_usize("STOCKCMP_MAX_CONCURRENT_LOOKUPS", "1")?;
    if max_concurrent_lookups == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOCKCMP_MAX_CONCURRENT_LOOKUPS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        regions_path,
        output_dir,
        catalog_url_template,
        stock_status_url,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        max_concurrent_lookups,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOCKCMP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
