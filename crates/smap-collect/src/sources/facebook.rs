//! Facebook Graph API page-posts adapter.
//!
//! Fetches posts for each configured page id. When no access token is
//! configured the adapter serves generated mock page posts in the same
//! Graph-API shape, so the rest of the pipeline exercises an identical
//! path. Per-page failures are logged and skipped.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::json;
use smap_core::platforms::FacebookSettings;
use smap_core::{RawRecord, RawTable};

use crate::adapter::{stamp, PlatformAdapter};
use crate::error::CollectError;

const GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";
const PLATFORM: &str = "facebook";

#[derive(Debug, Deserialize)]
struct PagePostsResponse {
    #[serde(default)]
    data: Vec<PagePost>,
}

#[derive(Debug, Deserialize)]
struct PagePost {
    id: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    likes: Option<Summary>,
    #[serde(default)]
    comments: Option<Summary>,
    #[serde(default)]
    shares: Option<ShareCount>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    summary: SummaryCount,
}

#[derive(Debug, Deserialize)]
struct SummaryCount {
    total_count: i64,
}

#[derive(Debug, Deserialize)]
struct ShareCount {
    count: i64,
}

/// Adapter for `GET /{page-id}/posts` with engagement summaries.
pub struct FacebookAdapter {
    client: reqwest::Client,
    /// `None` switches the adapter to mock mode.
    access_token: Option<String>,
    settings: FacebookSettings,
    base_url: String,
}

impl FacebookAdapter {
    /// Creates a `FacebookAdapter`. Pass `None` for the token to serve
    /// generated mock data instead of calling the Graph API.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: Option<String>,
        settings: FacebookSettings,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CollectError> {
        if access_token.is_none() {
            tracing::warn!("no Facebook access token configured, using mock data");
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            access_token,
            settings,
            base_url: GRAPH_API_BASE.to_string(),
        })
    }

    /// Point the adapter at a different API origin. Used by tests to target
    /// a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request_page(
        &self,
        token: &str,
        page_id: &str,
    ) -> Result<PagePostsResponse, CollectError> {
        let url = format!("{}/{page_id}/posts", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                (
                    "fields",
                    "id,message,created_time,likes.summary(true),comments.summary(true),shares",
                ),
                ("limit", &self.settings.limit.to_string()),
                ("access_token", token),
            ])
            .send()
            .await?;

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
            context: format!("facebook posts response for page {page_id}"),
            source,
        })
    }

    fn transform(response: PagePostsResponse) -> Vec<RawRecord> {
        response
            .data
            .into_iter()
            .map(|post| {
                // Page posts are "{page_id}_{post_id}"; the page is the author.
                let author_id = post
                    .id
                    .split_once('_')
                    .map_or_else(|| post.id.clone(), |(page, _)| page.to_string());
                let row = json!({
                    "post_id": post.id,
                    "content": post.message.unwrap_or_default(),
                    "likes": post.likes.map_or(0, |l| l.summary.total_count),
                    "comments": post.comments.map_or(0, |c| c.summary.total_count),
                    "shares": post.shares.map_or(0, |s| s.count),
                    "post_date": post.created_time,
                    "author_id": author_id,
                });
                row.as_object().cloned().unwrap_or_default()
            })
            .collect()
    }

    /// Generate Graph-API-shaped mock posts for one page, so mock and real
    /// data flow through the same transform.
    fn mock_page_posts(page_id: &str, limit: u32) -> PagePostsResponse {
        const CONTENT_OPTIONS: [&str; 6] = [
            "Exciting news from our team! Stay tuned for updates.",
            "Check out our latest product release!",
            "We're happy to announce our new partnership!",
            "Behind the scenes: how we create amazing content!",
            "Thank you to all our amazing followers!",
            "We've reached an amazing milestone!",
        ];

        let mut rng = StdRng::from_os_rng();
        let base_date = Utc::now() - ChronoDuration::days(30);

        let data = (0..limit)
            .map(|i| {
                let post_date = base_date + ChronoDuration::days(rng.random_range(0..=30));
                PagePost {
                    id: format!("{page_id}_{i}"),
                    message: Some(
                        CONTENT_OPTIONS[rng.random_range(0..CONTENT_OPTIONS.len())].to_string(),
                    ),
                    created_time: Some(post_date.to_rfc3339()),
                    likes: Some(Summary {
                        summary: SummaryCount {
                            total_count: rng.random_range(50..=2000),
                        },
                    }),
                    comments: Some(Summary {
                        summary: SummaryCount {
                            total_count: rng.random_range(5..=300),
                        },
                    }),
                    shares: Some(ShareCount {
                        count: rng.random_range(0..=150),
                    }),
                }
            })
            .collect();

        PagePostsResponse { data }
    }
}

#[async_trait]
impl PlatformAdapter for FacebookAdapter {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn fetch(&self) -> Result<RawTable, CollectError> {
        let mut rows: Vec<RawRecord> = Vec::new();

        for page_id in &self.settings.page_ids {
            let response = match &self.access_token {
                Some(token) => match self.request_page(token, page_id).await {
                    Ok(response) => response,
                    Err(e) => {
                        tracing::warn!(page = %page_id, error = %e, "page fetch failed, skipping");
                        continue;
                    }
                },
                None => Self::mock_page_posts(page_id, self.settings.limit),
            };

            let page_rows = Self::transform(response);
            tracing::debug!(page = %page_id, count = page_rows.len(), "transformed page posts");
            rows.extend(page_rows);
        }

        Ok(stamp(rows, PLATFORM))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_flattens_engagement_summaries() {
        let response: PagePostsResponse = serde_json::from_value(json!({
            "data": [{
                "id": "1234567890_987",
                "message": "We're happy to announce our new partnership!",
                "created_time": "2024-01-20T14:00:00+0000",
                "likes": {"summary": {"total_count": 320}},
                "comments": {"summary": {"total_count": 45}},
                "shares": {"count": 12}
            }]
        }))
        .unwrap();

        let rows = FacebookAdapter::transform(response);
        assert_eq!(rows[0]["likes"], json!(320));
        assert_eq!(rows[0]["comments"], json!(45));
        assert_eq!(rows[0]["shares"], json!(12));
        assert_eq!(rows[0]["author_id"], json!("1234567890"));
    }

    #[test]
    fn transform_defaults_absent_summaries_to_zero() {
        let response: PagePostsResponse = serde_json::from_value(json!({
            "data": [{"id": "solo-post"}]
        }))
        .unwrap();

        let rows = FacebookAdapter::transform(response);
        assert_eq!(rows[0]["likes"], json!(0));
        assert_eq!(rows[0]["comments"], json!(0));
        assert_eq!(rows[0]["shares"], json!(0));
        assert_eq!(rows[0]["content"], json!(""));
        assert_eq!(rows[0]["author_id"], json!("solo-post"));
    }

    #[test]
    fn mock_posts_have_the_graph_shape_and_requested_count() {
        let response = FacebookAdapter::mock_page_posts("company_page_1", 15);
        assert_eq!(response.data.len(), 15);

        let rows = FacebookAdapter::transform(response);
        for row in &rows {
            assert!(row["likes"].as_i64().unwrap() >= 50);
            assert!(row["post_date"].is_string());
        }
    }
}
