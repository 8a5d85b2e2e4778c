//! Aggregation Engine: daily rollups, moving averages, top-post rankings.
//!
//! Three independent read-only operations over a validated table. All are
//! pure, local, deterministic computations — empty input is an empty result,
//! never an error, and nothing here retries or blocks.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smap_core::{CanonicalRecord, CanonicalTable};

/// Default trailing moving-average window, in periods.
pub const DEFAULT_MA_WINDOW: usize = 7;
/// Default size of the global top-post selection.
pub const DEFAULT_TOP_OVERALL_N: usize = 5;
/// Default size of each per-platform top-post selection.
pub const DEFAULT_TOP_PLATFORM_N: usize = 3;

/// Column names of the persisted daily-metrics table, in output order.
pub const DAILY_METRIC_COLUMNS: [&str; 9] = [
    "platform",
    "date",
    "engagement_score_sum",
    "engagement_score_mean",
    "engagement_score_count",
    "likes_sum",
    "comments_sum",
    "shares_sum",
    "engagement_ma",
];

/// Column names of the persisted top-post tables, in output order.
pub const TOP_POST_COLUMNS: [&str; 7] = [
    "platform",
    "post_id",
    "content",
    "engagement_score",
    "likes",
    "comments",
    "shares",
];

/// Per-platform, per-calendar-day engagement rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub platform: String,
    pub date: NaiveDate,
    pub engagement_score_sum: i64,
    /// Mean engagement per post, rounded to 2 decimal places.
    pub engagement_score_mean: f64,
    pub engagement_score_count: u64,
    pub likes_sum: i64,
    pub comments_sum: i64,
    pub shares_sum: i64,
    /// Trailing moving average of `engagement_score_sum`, filled by
    /// [`compute_moving_average`]. `None` until that pass runs.
    pub engagement_ma: Option<f64>,
}

/// One row of a top-post ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPost {
    pub platform: String,
    pub post_id: String,
    pub content: String,
    pub engagement_score: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
}

impl From<&CanonicalRecord> for TopPost {
    fn from(record: &CanonicalRecord) -> Self {
        Self {
            platform: record.platform.clone(),
            post_id: record.post_id.clone(),
            content: record.content.clone(),
            engagement_score: record.engagement_score,
            likes: record.likes,
            comments: record.comments,
            shares: record.shares,
        }
    }
}

/// The two top-post selections. A record may legitimately appear in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TopPosts {
    pub top_overall: Vec<TopPost>,
    pub top_per_platform: Vec<TopPost>,
}

#[derive(Default)]
struct DayAccumulator {
    engagement_sum: i64,
    likes_sum: i64,
    comments_sum: i64,
    shares_sum: i64,
    count: u64,
}

/// Group records by `(platform, calendar date of post_date)` and compute
/// engagement sums, means, and counts.
///
/// Rows with a null `post_date` cannot be assigned a date bucket; they are
/// excluded and their count emitted as a single warn event. Output is sorted
/// by `(platform, date)`. Empty input produces empty output.
#[must_use]
pub fn compute_daily_metrics(table: &CanonicalTable) -> Vec<DailyMetric> {
    if table.is_empty() {
        return Vec::new();
    }

    let mut groups: BTreeMap<(String, NaiveDate), DayAccumulator> = BTreeMap::new();
    let mut undated = 0_usize;

    for record in table {
        let Some(post_date) = record.post_date else {
            undated += 1;
            continue;
        };
        let acc = groups
            .entry((record.platform.clone(), post_date.date()))
            .or_default();
        acc.engagement_sum += record.engagement_score;
        acc.likes_sum += record.likes;
        acc.comments_sum += record.comments;
        acc.shares_sum += record.shares;
        acc.count += 1;
    }

    if undated > 0 {
        tracing::warn!(
            count = undated,
            "excluded rows with null post_date from daily metrics"
        );
    }

    groups
        .into_iter()
        .map(|((platform, date), acc)| {
            #[allow(clippy::cast_precision_loss)]
            let mean = acc.engagement_sum as f64 / acc.count as f64;
            DailyMetric {
                platform,
                date,
                engagement_score_sum: acc.engagement_sum,
                engagement_score_mean: round2(mean),
                engagement_score_count: acc.count,
                likes_sum: acc.likes_sum,
                comments_sum: acc.comments_sum,
                shares_sum: acc.shares_sum,
                engagement_ma: None,
            }
        })
        .collect()
}

/// Fill the trailing moving average of `engagement_score_sum`, per platform,
/// in chronological order.
///
/// Standard trailing simple moving average with partial-window warm-up: the
/// first `window - 1` rows of each platform average over however many
/// observations exist so far (minimum 1) instead of producing nulls. The
/// window never looks across platform boundaries, and no rows are dropped.
#[must_use]
pub fn compute_moving_average(mut metrics: Vec<DailyMetric>, window: usize) -> Vec<DailyMetric> {
    if metrics.is_empty() {
        return metrics;
    }
    let window = window.max(1);

    metrics.sort_by(|a, b| (a.platform.as_str(), a.date).cmp(&(b.platform.as_str(), b.date)));

    let mut current_platform: Option<String> = None;
    let mut trailing: std::collections::VecDeque<i64> = std::collections::VecDeque::new();

    for metric in &mut metrics {
        if current_platform.as_deref() != Some(metric.platform.as_str()) {
            trailing.clear();
            current_platform = Some(metric.platform.clone());
        }
        trailing.push_back(metric.engagement_score_sum);
        if trailing.len() > window {
            trailing.pop_front();
        }
        #[allow(clippy::cast_precision_loss)]
        let ma = trailing.iter().sum::<i64>() as f64 / trailing.len() as f64;
        metric.engagement_ma = Some(ma);
    }

    metrics
}

/// Select the global top `overall_n` and per-platform top `platform_n`
/// records by engagement score.
///
/// Selection is stable: ties keep their original row order (the sort key is
/// engagement score alone — callers must not assume any secondary key).
/// Platforms appear in sorted order in `top_per_platform`. Empty input
/// returns an empty [`TopPosts`].
#[must_use]
pub fn identify_top_posts(
    table: &CanonicalTable,
    overall_n: usize,
    platform_n: usize,
) -> TopPosts {
    if table.is_empty() {
        return TopPosts::default();
    }

    let mut overall: Vec<&CanonicalRecord> = table.iter().collect();
    // Vec::sort_by is stable, so equal scores preserve original order.
    overall.sort_by(|a, b| b.engagement_score.cmp(&a.engagement_score));
    overall.truncate(overall_n);

    let mut by_platform: BTreeMap<&str, Vec<&CanonicalRecord>> = BTreeMap::new();
    for record in table {
        by_platform
            .entry(record.platform.as_str())
            .or_default()
            .push(record);
    }

    let mut top_per_platform = Vec::new();
    for (_, mut records) in by_platform {
        records.sort_by(|a, b| b.engagement_score.cmp(&a.engagement_score));
        records.truncate(platform_n);
        top_per_platform.extend(records.into_iter().map(TopPost::from));
    }

    TopPosts {
        top_overall: overall.into_iter().map(TopPost::from).collect(),
        top_per_platform,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
