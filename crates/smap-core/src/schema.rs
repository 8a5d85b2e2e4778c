//! The canonical per-post schema.
//!
//! Every platform adapter emits loose rows that the normalizer coerces into
//! [`CanonicalRecord`]s. This is the single source of truth for column names
//! and field semantics downstream of collection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Canonical column names, in schema order.
///
/// The schema validator checks required-column presence against this list,
/// and persisted tables carry columns in this order.
pub const CANONICAL_COLUMNS: [&str; 10] = [
    "platform",
    "post_id",
    "content",
    "likes",
    "comments",
    "shares",
    "post_date",
    "author_id",
    "engagement_score",
    "collected_at",
];

/// One post/video/tweet in the unified schema.
///
/// Timestamps are timezone-naive UTC; any zone information on the raw input
/// is converted to UTC and dropped during normalization. `engagement_score`
/// is always derived as `likes + comments + shares` and never taken from
/// input. Records are immutable once validated: analytics operations borrow
/// and produce new values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Source platform, e.g. `twitter`, `facebook`, `youtube`, `instagram`.
    pub platform: String,
    /// Platform-scoped post identifier (unique per platform, not globally).
    pub post_id: String,
    /// Post text or title. Empty string when the platform supplied none.
    pub content: String,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    /// Publication time, naive UTC. `None` when the raw value was absent or
    /// unparseable (row-level failure isolation in the normalizer).
    pub post_date: Option<NaiveDateTime>,
    /// Platform-scoped author identifier. May be empty.
    pub author_id: String,
    /// Derived: `likes + comments + shares`. Recomputed on every normalize.
    pub engagement_score: i64,
    /// When the adapter collected this row, naive UTC.
    pub collected_at: Option<NaiveDateTime>,
}
