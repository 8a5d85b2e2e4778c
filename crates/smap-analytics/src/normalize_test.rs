use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;
use smap_core::{RawRecord, RawTable};

use super::normalize;

fn row(value: serde_json::Value) -> RawRecord {
    value
        .as_object()
        .expect("test row must be a JSON object")
        .clone()
}

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("valid test timestamp")
}

#[test]
fn empty_table_passes_through_unchanged() {
    let result = normalize(RawTable::new());
    assert!(result.is_empty(), "expected empty output for empty input");
}

#[test]
fn engagement_score_is_derived_from_counts() {
    let table = RawTable::from_rows(vec![
        row(json!({
            "platform": "twitter", "post_id": "1",
            "likes": 10, "comments": 2, "shares": 1,
            "post_date": "2024-01-01"
        })),
        row(json!({
            "platform": "twitter", "post_id": "2",
            "likes": 5, "comments": 0, "shares": 0,
            "post_date": "2024-01-01"
        })),
    ]);

    let result = normalize(table);
    let scores: Vec<i64> = result.iter().map(|r| r.engagement_score).collect();
    assert_eq!(scores, vec![13, 5]);
}

#[test]
fn supplied_engagement_score_is_overwritten() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1",
        "likes": 1, "comments": 1, "shares": 1,
        "engagement_score": 9999
    }))]);

    let result = normalize(table);
    assert_eq!(result.records()[0].engagement_score, 3);
}

#[test]
fn missing_and_null_numerics_default_to_zero() {
    // Row missing `comments` entirely and with `likes: null` — engagement
    // must come from shares alone.
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1",
        "likes": null, "shares": 4
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.likes, 0);
    assert_eq!(record.comments, 0);
    assert_eq!(record.shares, 4);
    assert_eq!(record.engagement_score, 4);
}

#[test]
fn null_content_becomes_empty_string() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "facebook", "post_id": "1", "content": null
    }))]);

    let result = normalize(table);
    assert_eq!(result.records()[0].content, "");
}

#[test]
fn missing_string_fields_default_to_empty() {
    let table = RawTable::from_rows(vec![row(json!({"platform": "youtube"}))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.post_id, "");
    assert_eq!(record.content, "");
    assert_eq!(record.author_id, "");
}

#[test]
fn numeric_strings_and_floats_coerce_leniently() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "instagram", "post_id": "1",
        "likes": "12", "comments": 3.9, "shares": " 2 "
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.likes, 12);
    assert_eq!(record.comments, 3, "float counts truncate");
    assert_eq!(record.shares, 2);
    assert_eq!(record.engagement_score, 17);
}

#[test]
fn uncastable_count_defaults_without_aborting_the_row() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1",
        "likes": ["not", "a", "number"], "comments": 2, "shares": 1
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.likes, 0);
    assert_eq!(record.comments, 2);
    assert_eq!(record.engagement_score, 3);
}

#[test]
fn negative_counts_clamp_to_zero() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1", "likes": -5, "shares": 2
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.likes, 0);
    assert_eq!(record.engagement_score, 2);
}

#[test]
fn timezone_aware_dates_convert_to_naive_utc() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "youtube", "post_id": "1",
        "post_date": "2024-01-01T12:00:00+05:00"
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.post_date, Some(ts("2024-01-01T07:00:00")));
}

#[test]
fn colonless_utc_offsets_parse() {
    // Facebook Graph API timestamp shape.
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "facebook", "post_id": "1",
        "post_date": "2024-01-20T14:00:00+0000"
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.post_date, Some(ts("2024-01-20T14:00:00")));
}

#[test]
fn bare_dates_parse_to_midnight() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1", "post_date": "2024-01-01"
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(
        record.post_date,
        NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    );
}

#[test]
fn unix_seconds_parse_as_utc() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1", "post_date": 1_704_067_200
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.post_date, Some(ts("2024-01-01T00:00:00")));
}

#[test]
fn unparseable_date_yields_null_not_error() {
    let table = RawTable::from_rows(vec![
        row(json!({
            "platform": "twitter", "post_id": "1",
            "post_date": "not a date", "likes": 1
        })),
        row(json!({
            "platform": "twitter", "post_id": "2",
            "post_date": "2024-01-02", "likes": 2
        })),
    ]);

    let result = normalize(table);
    assert_eq!(result.len(), 2, "bad date must not abort the batch");
    assert!(result.records()[0].post_date.is_none());
    assert!(result.records()[1].post_date.is_some());
}

#[test]
fn superset_fields_are_ignored() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1",
        "author_id": "u1", "author_name": "someone", "language": "en"
    }))]);

    let result = normalize(table);
    let record = &result.records()[0];
    assert_eq!(record.author_id, "u1");
}

#[test]
fn normalize_is_idempotent_for_engagement_score() {
    let table = RawTable::from_rows(vec![row(json!({
        "platform": "twitter", "post_id": "1",
        "likes": 7, "comments": 2, "shares": 1,
        "post_date": "2024-03-05T10:30:00"
    }))]);

    let first = normalize(table);

    // Serialize the canonical output back to loose rows and re-normalize.
    let reround: RawTable = first
        .records()
        .iter()
        .map(|r| {
            serde_json::to_value(r)
                .expect("canonical record serializes")
                .as_object()
                .expect("serializes to an object")
                .clone()
        })
        .collect();
    let second = normalize(reround);

    assert_eq!(first, second);
}
