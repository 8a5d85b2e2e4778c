//! Record Normalizer: loose per-platform rows into [`CanonicalRecord`]s.
//!
//! The cast policy is lenient, not strict-transactional: a field that cannot
//! be coerced gets its type default (or `None` for timestamps) and emits a
//! `tracing` event, but never aborts the rest of the row or the batch.
//! `engagement_score` is the one exception to defaulting — it is never read
//! from input, only derived from the coerced counts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use smap_core::{CanonicalRecord, CanonicalTable, RawRecord, RawTable};

/// Normalize a batch of raw rows into the canonical schema.
///
/// Never fails. Each row is aligned to the canonical columns (missing
/// numerics default to 0, missing strings to empty), timestamps are parsed
/// to naive UTC with per-row failure isolation, and `engagement_score` is
/// recomputed as `likes + comments + shares`, overwriting anything the
/// input supplied. An empty table passes through unchanged.
#[must_use]
pub fn normalize(table: RawTable) -> CanonicalTable {
    if table.is_empty() {
        return CanonicalTable::new();
    }
    table.into_iter().map(normalize_row).collect()
}

fn normalize_row(row: RawRecord) -> CanonicalRecord {
    let platform = string_field(&row, "platform");
    if platform.is_empty() {
        tracing::warn!("row has empty platform after normalization");
    }

    let likes = count_field(&row, "likes");
    let comments = count_field(&row, "comments");
    let shares = count_field(&row, "shares");

    CanonicalRecord {
        post_id: string_field(&row, "post_id"),
        content: string_field(&row, "content"),
        post_date: timestamp_field(&row, "post_date"),
        author_id: string_field(&row, "author_id"),
        engagement_score: likes + comments + shares,
        collected_at: timestamp_field(&row, "collected_at"),
        platform,
        likes,
        comments,
        shares,
    }
}

/// Coerce a string-typed field. Missing and null become empty string;
/// scalars are stringified; composites are a cast failure.
fn string_field(row: &RawRecord, key: &str) -> String {
    match row.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => {
            tracing::debug!(field = key, value = %other, "cannot cast to string, defaulting to empty");
            String::new()
        }
    }
}

/// Coerce a non-negative count field. Missing and null become 0 before type
/// enforcement; numeric strings and floats are accepted; negatives clamp
/// to 0.
fn count_field(row: &RawRecord, key: &str) -> i64 {
    let coerced = match row.get(key) {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => {
            #[allow(clippy::cast_possible_truncation)]
            n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            #[allow(clippy::cast_possible_truncation)]
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        Some(_) => None,
    };

    let Some(value) = coerced else {
        tracing::debug!(field = key, "cannot cast to integer, defaulting to 0");
        return 0;
    };
    if value < 0 {
        tracing::debug!(field = key, value, "negative count clamped to 0");
        return 0;
    }
    value
}

/// Parse a timestamp field to naive UTC.
///
/// Accepts RFC 3339 (any offset is converted to UTC and dropped), naive ISO
/// datetimes with `T` or space separators, bare dates, and integer Unix
/// seconds. Parse failures yield `None` for the row rather than aborting
/// the batch.
fn timestamp_field(row: &RawRecord, key: &str) -> Option<NaiveDateTime> {
    let value = row.get(key)?;
    match value {
        Value::Null => None,
        Value::String(s) => {
            let parsed = parse_datetime_str(s);
            if parsed.is_none() && !s.trim().is_empty() {
                tracing::debug!(field = key, value = %s, "unparseable timestamp, storing null");
            }
            parsed
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.naive_utc()),
        other => {
            tracing::debug!(field = key, value = %other, "unparseable timestamp, storing null");
            None
        }
    }
}

fn parse_datetime_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    // Facebook's Graph API writes offsets without a colon ("+0000"), which
    // RFC 3339 parsing rejects.
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
