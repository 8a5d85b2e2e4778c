//! Twitter/X recent-search adapter (API v2, app-only bearer auth).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use smap_core::platforms::TwitterSettings;
use smap_core::{RawRecord, RawTable};

use crate::adapter::{stamp, PlatformAdapter};
use crate::error::CollectError;

const TWITTER_API_BASE: &str = "https://api.twitter.com";
const PLATFORM: &str = "twitter";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Tweet>,
}

#[derive(Debug, Deserialize)]
struct Tweet {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    public_metrics: PublicMetrics,
}

#[derive(Debug, Default, Deserialize)]
struct PublicMetrics {
    #[serde(default)]
    like_count: i64,
    #[serde(default)]
    reply_count: i64,
    #[serde(default)]
    retweet_count: i64,
}

/// Adapter for `GET /2/tweets/search/recent`.
pub struct TwitterAdapter {
    client: reqwest::Client,
    bearer_token: String,
    settings: TwitterSettings,
    base_url: String,
}

impl TwitterAdapter {
    /// Creates a `TwitterAdapter` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        bearer_token: String,
        settings: TwitterSettings,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CollectError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            bearer_token,
            settings,
            base_url: TWITTER_API_BASE.to_string(),
        })
    }

    /// Point the adapter at a different API origin. Used by tests to target
    /// a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request(&self) -> Result<SearchResponse, CollectError> {
        let url = format!("{}/2/tweets/search/recent", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .query(&[
                ("query", self.settings.search_query.as_str()),
                ("max_results", &self.settings.max_results.to_string()),
                ("tweet.fields", "created_at,author_id,public_metrics"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);
            return Err(CollectError::RateLimited {
                platform: PLATFORM.to_string(),
                retry_after_secs,
            });
        }
        if !status.is_success() {
            return Err(CollectError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| CollectError::Deserialize {
            context: "twitter recent search response".to_string(),
            source,
        })
    }

    fn transform(response: SearchResponse) -> Vec<RawRecord> {
        response
            .data
            .into_iter()
            .map(|tweet| {
                let row = json!({
                    "post_id": tweet.id,
                    "content": tweet.text,
                    "likes": tweet.public_metrics.like_count,
                    "comments": tweet.public_metrics.reply_count,
                    "shares": tweet.public_metrics.retweet_count,
                    "post_date": tweet.created_at,
                    "author_id": tweet.author_id.unwrap_or_default(),
                });
                row.as_object().cloned().unwrap_or_default()
            })
            .collect()
    }
}

#[async_trait]
impl PlatformAdapter for TwitterAdapter {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn fetch(&self) -> Result<RawTable, CollectError> {
        let response = self.request().await?;
        let rows = Self::transform(response);
        tracing::debug!(count = rows.len(), "transformed tweets");
        Ok(stamp(rows, PLATFORM))
    }
}
