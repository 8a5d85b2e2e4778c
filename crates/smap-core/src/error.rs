use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read platform settings {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse platform settings: {0}")]
    SettingsFileParse(#[from] serde_yaml::Error),

    #[error("invalid platform settings: {0}")]
    Validation(String),
}
