use std::path::PathBuf;

/// Application configuration for one pipeline invocation.
///
/// Built from environment variables by [`crate::config::load_app_config`].
/// Credentials are optional: a platform without credentials is skipped (or
/// degraded to mock data, for facebook) at adapter construction time rather
/// than read from process-wide statics.
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub platforms_path: PathBuf,
    pub out_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Trailing moving-average window, in periods (days).
    pub ma_window: usize,
    pub top_overall_n: usize,
    pub top_platform_n: usize,
    pub twitter_bearer_token: Option<String>,
    pub youtube_api_key: Option<String>,
    pub facebook_access_token: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("platforms_path", &self.platforms_path)
            .field("out_dir", &self.out_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("ma_window", &self.ma_window)
            .field("top_overall_n", &self.top_overall_n)
            .field("top_platform_n", &self.top_platform_n)
            .field(
                "twitter_bearer_token",
                &self.twitter_bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "facebook_access_token",
                &self.facebook_access_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
