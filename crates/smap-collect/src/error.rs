use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {platform} (retry after {retry_after_secs}s)")]
    RateLimited {
        platform: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("missing credentials for {platform}: {var} is not set")]
    MissingCredentials { platform: String, var: String },
}
