//! Flat-file persistence for pipeline tables.
//!
//! The format is implied by the destination's file extension: `.csv` for
//! delimited text, `.json` for a structured record array. The core produces
//! tables; this crate only dumps and re-ingests them.

pub mod error;

pub use error::StoreError;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use smap_analytics::{
    missing_columns, DailyMetric, SchemaViolation, TopPost, DAILY_METRIC_COLUMNS,
    TOP_POST_COLUMNS,
};

/// Write rows to `path`, choosing the format from the extension.
///
/// Creates missing parent directories.
///
/// # Errors
///
/// Returns [`StoreError::UnsupportedFormat`] for extensions other than
/// `csv`/`json`, or an I/O / serialization error.
pub fn save_table<T: Serialize>(rows: &[T], path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }

    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            let mut writer = csv::Writer::from_path(path)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush().map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        Some("json") => {
            let file = fs::File::create(path).map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::to_writer_pretty(file, rows)?;
        }
        _ => {
            return Err(StoreError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    }

    tracing::info!(path = %path.display(), rows = rows.len(), "saved table");
    Ok(())
}

/// Newest file in `dir` matching `prefix` and `extension`, by file name.
///
/// Artifact names embed a `%Y%m%d_%H%M%S` timestamp, so lexicographic order
/// on the name is chronological order. Returns `Ok(None)` when the
/// directory does not exist or nothing matches.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory exists but cannot be read.
pub fn latest_file(
    dir: &Path,
    prefix: &str,
    extension: &str,
) -> Result<Option<PathBuf>, StoreError> {
    if !dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(dir).map_err(|source| StoreError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut newest: Option<PathBuf> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with(prefix) {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if newest
            .as_ref()
            .and_then(|p| p.file_name())
            .is_none_or(|current| path.file_name() > Some(current))
        {
            newest = Some(path);
        }
    }

    Ok(newest)
}

/// Load a persisted daily-metrics table, checking the header against the
/// expected column contract before deserializing rows.
///
/// # Errors
///
/// Returns [`StoreError::Schema`] naming the missing columns if the header
/// is incomplete, or a read/parse error.
pub fn load_daily_metrics_csv(path: &Path) -> Result<Vec<DailyMetric>, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let missing = missing_columns(&DAILY_METRIC_COLUMNS, &headers);
    if !missing.is_empty() {
        return Err(StoreError::Schema(SchemaViolation { missing }));
    }

    let mut metrics = Vec::new();
    for row in reader.deserialize() {
        metrics.push(row?);
    }
    Ok(metrics)
}

/// Load a persisted top-post table, checking the header first.
///
/// # Errors
///
/// Returns [`StoreError::Schema`] naming the missing columns if the header
/// is incomplete, or a read/parse error.
pub fn load_top_posts_csv(path: &Path) -> Result<Vec<TopPost>, StoreError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let missing = missing_columns(&TOP_POST_COLUMNS, &headers);
    if !missing.is_empty() {
        return Err(StoreError::Schema(SchemaViolation { missing }));
    }

    let mut posts = Vec::new();
    for row in reader.deserialize() {
        posts.push(row?);
    }
    Ok(posts)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
