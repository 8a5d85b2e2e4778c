//! YouTube Data API v3 adapter.
//!
//! Two-call shape: `search.list` for recent video ids matching the query,
//! then `videos.list` for snippet + statistics on those ids. Statistics
//! counts arrive as decimal strings and are parsed leniently; a count that
//! fails to parse defaults to 0 rather than dropping the video.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use smap_core::platforms::YoutubeSettings;
use smap_core::{RawRecord, RawTable};

use crate::adapter::{stamp, PlatformAdapter};
use crate::error::CollectError;

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const PLATFORM: &str = "youtube";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: String,
    #[serde(default)]
    snippet: Snippet,
    #[serde(default)]
    statistics: Statistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    channel_id: String,
    #[serde(default)]
    channel_title: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde(default)]
    like_count: Option<String>,
    #[serde(default)]
    comment_count: Option<String>,
}

fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse().ok()).unwrap_or(0)
}

/// Adapter for the YouTube Data API v3.
pub struct YouTubeAdapter {
    client: reqwest::Client,
    api_key: String,
    settings: YoutubeSettings,
    base_url: String,
}

impl YouTubeAdapter {
    /// Creates a `YouTubeAdapter` with configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: String,
        settings: YoutubeSettings,
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
            api_key,
            settings,
            base_url: YOUTUBE_API_BASE.to_string(),
        })
    }

    /// Point the adapter at a different API origin. Used by tests to target
    /// a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<T, CollectError> {
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(CollectError::RateLimited {
                platform: PLATFORM.to_string(),
                retry_after_secs: 60,
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
            context: context.to_string(),
            source,
        })
    }

    async fn request(&self) -> Result<VideosResponse, CollectError> {
        let search: SearchResponse = self
            .get_json(
                format!("{}/search", self.base_url),
                &[
                    ("part", "id"),
                    ("q", self.settings.search_query.as_str()),
                    ("maxResults", &self.settings.max_results.to_string()),
                    ("type", "video"),
                    ("order", "date"),
                    ("key", self.api_key.as_str()),
                ],
                "youtube search response",
            )
            .await?;

        let video_ids: Vec<String> = search
            .items
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();

        if video_ids.is_empty() {
            tracing::warn!("no videos found in YouTube search response");
            return Ok(VideosResponse::default());
        }

        self.get_json(
            format!("{}/videos", self.base_url),
            &[
                ("part", "snippet,statistics"),
                ("id", &video_ids.join(",")),
                ("key", self.api_key.as_str()),
            ],
            "youtube videos response",
        )
        .await
    }

    fn transform(response: VideosResponse) -> Vec<RawRecord> {
        response
            .items
            .into_iter()
            .map(|video| {
                let row = json!({
                    "post_id": video.id,
                    "content": video.snippet.title,
                    "likes": parse_count(video.statistics.like_count.as_deref()),
                    "comments": parse_count(video.statistics.comment_count.as_deref()),
                    "shares": 0,
                    "post_date": video.snippet.published_at,
                    "author_id": video.snippet.channel_id,
                    "author_name": video.snippet.channel_title,
                });
                row.as_object().cloned().unwrap_or_default()
            })
            .collect()
    }
}

#[async_trait]
impl PlatformAdapter for YouTubeAdapter {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn fetch(&self) -> Result<RawTable, CollectError> {
        let response = self.request().await?;
        let rows = Self::transform(response);
        tracing::debug!(count = rows.len(), "transformed YouTube videos");
        Ok(stamp(rows, PLATFORM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_parses_string_statistics() {
        let response: VideosResponse = serde_json::from_value(json!({
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "title": "Intro to data pipelines",
                    "publishedAt": "2024-02-10T18:00:00Z",
                    "channelId": "UC123",
                    "channelTitle": "Data Channel"
                },
                "statistics": {"likeCount": "1532", "commentCount": "88"}
            }]
        }))
        .unwrap();

        let rows = YouTubeAdapter::transform(response);
        assert_eq!(rows[0]["likes"], json!(1532));
        assert_eq!(rows[0]["comments"], json!(88));
        assert_eq!(rows[0]["shares"], json!(0));
        assert_eq!(rows[0]["author_id"], json!("UC123"));
    }

    #[test]
    fn transform_defaults_hidden_statistics_to_zero() {
        // Channels can hide like counts; the field is then absent.
        let response: VideosResponse = serde_json::from_value(json!({
            "items": [{"id": "abc", "snippet": {"title": "t"}, "statistics": {}}]
        }))
        .unwrap();

        let rows = YouTubeAdapter::transform(response);
        assert_eq!(rows[0]["likes"], json!(0));
        assert_eq!(rows[0]["comments"], json!(0));
    }

    #[test]
    fn unparseable_count_defaults_to_zero() {
        assert_eq!(parse_count(Some("not-a-number")), 0);
        assert_eq!(parse_count(Some("123")), 123);
        assert_eq!(parse_count(None), 0);
    }
}
