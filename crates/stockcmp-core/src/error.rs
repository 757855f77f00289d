use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed stock status for {part_number}: expected at least 3 '~' fields, got {fields}")]
    MalformedStockStatus { part_number: String, fields: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read regions file {path}: {source}")]
    RegionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse regions file: {0}")]
    RegionsFileParse(#[from] serde_yaml::Error),

    #[error("invalid region configuration: {0}")]
    Validation(String),
}
