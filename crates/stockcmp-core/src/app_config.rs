use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings for a comparison run.
///
/// Per-region values (zip code, page count, warehouse code, infor id) live in
/// the regions file referenced by `regions_path`, not here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub regions_path: PathBuf,
    pub output_dir: PathBuf,
    /// Catalog page URL with `{zipcode}` and `{page}` placeholders.
    pub catalog_url_template: String,
    pub stock_status_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Politeness delay between consecutive vendor calls.
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Upper bound on in-flight stock-status lookups per warehouse.
    pub max_concurrent_lookups: usize,
}
