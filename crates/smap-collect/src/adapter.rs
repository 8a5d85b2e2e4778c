//! The adapter capability contract and multi-platform collection driver.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use smap_core::{RawRecord, RawTable};

use crate::error::CollectError;

/// One platform's collection capability.
///
/// `fetch` owns the full request-then-transform cycle and returns raw rows
/// already stamped with `platform` and `collected_at`. Adapters hold their
/// own HTTP client and credentials; the trait is object-safe so the
/// orchestrator can hold a heterogeneous set.
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Canonical platform name stamped onto every row, e.g. `twitter`.
    fn platform(&self) -> &str;

    /// Fetch one batch of raw records from the platform.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] on request or decode failure. Callers treat
    /// this as a per-platform failure, not a pipeline failure.
    async fn fetch(&self) -> Result<RawTable, CollectError>;
}

/// Collect from every adapter, isolating per-platform failures.
///
/// A failing or empty platform logs a warning and is skipped; the merged
/// table of whatever succeeded is returned, possibly empty.
pub async fn collect_all(adapters: &[Box<dyn PlatformAdapter>]) -> RawTable {
    let mut merged = RawTable::new();

    for adapter in adapters {
        let platform = adapter.platform();
        tracing::info!(platform, "collecting data");
        match adapter.fetch().await {
            Ok(table) if table.is_empty() => {
                tracing::warn!(platform, "no data collected");
            }
            Ok(table) => {
                tracing::info!(platform, count = table.len(), "collected records");
                merged.extend(table);
            }
            Err(e) => {
                tracing::warn!(platform, error = %e, "collection failed, skipping platform");
            }
        }
    }

    if merged.is_empty() {
        tracing::warn!("no data collected from any platform");
    }
    merged
}

/// Stamp `platform` and `collected_at` (naive UTC, ISO format) onto
/// transformed rows. Overwrites anything the transform put there — the
/// adapter owns both fields.
pub(crate) fn stamp(rows: Vec<RawRecord>, platform: &str) -> RawTable {
    let collected_at = Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string();

    rows.into_iter()
        .map(|mut row| {
            row.insert("platform".to_string(), Value::String(platform.to_string()));
            row.insert(
                "collected_at".to_string(),
                Value::String(collected_at.clone()),
            );
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stamp_sets_platform_and_collected_at_on_every_row() {
        let rows = vec![
            json!({"post_id": "1"}).as_object().unwrap().clone(),
            json!({"post_id": "2", "platform": "bogus"})
                .as_object()
                .unwrap()
                .clone(),
        ];

        let table = stamp(rows, "twitter");
        for row in table.rows() {
            assert_eq!(row.get("platform"), Some(&json!("twitter")));
            assert!(row.contains_key("collected_at"));
        }
    }

    struct FailingAdapter;

    #[async_trait]
    impl PlatformAdapter for FailingAdapter {
        fn platform(&self) -> &str {
            "broken"
        }

        async fn fetch(&self) -> Result<RawTable, CollectError> {
            Err(CollectError::UnexpectedStatus {
                status: 500,
                url: "https://example.invalid".to_string(),
            })
        }
    }

    struct FixedAdapter;

    #[async_trait]
    impl PlatformAdapter for FixedAdapter {
        fn platform(&self) -> &str {
            "fixed"
        }

        async fn fetch(&self) -> Result<RawTable, CollectError> {
            let rows = vec![json!({"post_id": "1"}).as_object().unwrap().clone()];
            Ok(stamp(rows, self.platform()))
        }
    }

    #[tokio::test]
    async fn collect_all_skips_failing_platforms() {
        let adapters: Vec<Box<dyn PlatformAdapter>> =
            vec![Box::new(FailingAdapter), Box::new(FixedAdapter)];

        let merged = collect_all(&adapters).await;
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.rows()[0].get("platform"), Some(&json!("fixed")));
    }

    #[tokio::test]
    async fn collect_all_of_nothing_is_empty() {
        let adapters: Vec<Box<dyn PlatformAdapter>> = vec![Box::new(FailingAdapter)];
        let merged = collect_all(&adapters).await;
        assert!(merged.is_empty());
    }
}
