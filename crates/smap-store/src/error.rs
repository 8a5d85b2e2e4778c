use smap_analytics::SchemaViolation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file format: {path}")]
    UnsupportedFormat { path: String },

    #[error(transparent)]
    Schema(#[from] SchemaViolation),
}
