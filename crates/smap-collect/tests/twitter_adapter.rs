//! Integration tests for `TwitterAdapter::fetch`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use smap_collect::{CollectError, PlatformAdapter, TwitterAdapter};
use smap_core::platforms::TwitterSettings;

fn test_settings() -> TwitterSettings {
    TwitterSettings {
        search_query: "#datascience".to_string(),
        max_results: 10,
    }
}

fn test_adapter(server: &MockServer) -> TwitterAdapter {
    TwitterAdapter::new(
        "test-bearer-token".to_string(),
        test_settings(),
        5,
        "smap-test/0.1",
    )
    .expect("failed to build test TwitterAdapter")
    .with_base_url(server.uri())
}

fn search_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "1750000000000000001",
                "text": "pipeline update #datascience",
                "created_at": "2024-01-15T09:30:00.000Z",
                "author_id": "42",
                "public_metrics": {"like_count": 12, "reply_count": 3, "retweet_count": 5}
            },
            {
                "id": "1750000000000000002",
                "text": "second tweet",
                "created_at": "2024-01-16T10:00:00.000Z",
                "author_id": "43",
                "public_metrics": {"like_count": 1, "reply_count": 0, "retweet_count": 0}
            }
        ],
        "meta": {"result_count": 2}
    })
}

#[tokio::test]
async fn fetch_stamps_platform_and_collected_at() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(query_param("query", "#datascience"))
        .and(query_param("max_results", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
        .mount(&server)
        .await;

    let table = test_adapter(&server).fetch().await.expect("fetch should succeed");

    assert_eq!(table.len(), 2);
    for row in table.rows() {
        assert_eq!(row["platform"], json!("twitter"));
        assert!(row["collected_at"].is_string());
    }
    assert_eq!(table.rows()[0]["likes"], json!(12));
    assert_eq!(table.rows()[0]["shares"], json!(5));
}

#[tokio::test]
async fn empty_result_set_yields_empty_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"meta": {"result_count": 0}})))
        .mount(&server)
        .await;

    let table = test_adapter(&server).fetch().await.expect("fetch should succeed");
    assert!(table.is_empty());
}

#[tokio::test]
async fn rate_limit_maps_to_typed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "120"))
        .mount(&server)
        .await;

    let err = test_adapter(&server).fetch().await.expect_err("should fail");
    match err {
        CollectError::RateLimited {
            platform,
            retry_after_secs,
        } => {
            assert_eq!(platform, "twitter");
            assert_eq!(retry_after_secs, 120);
        }
        other => panic!("expected RateLimited, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_adapter(&server).fetch().await.expect_err("should fail");
    assert!(
        matches!(err, CollectError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus, got: {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = test_adapter(&server).fetch().await.expect_err("should fail");
    assert!(
        matches!(err, CollectError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}
