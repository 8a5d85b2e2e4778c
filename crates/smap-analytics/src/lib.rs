//! Normalization and aggregation core for the SMAP pipeline.
//!
//! Coerces heterogeneous per-platform raw rows into the canonical schema,
//! gates progression with a required-column check, and computes the fixed
//! set of engagement aggregations: daily rollups, trailing moving averages,
//! and top-post rankings.
//!
//! Everything here is synchronous, single-threaded, and pure with respect
//! to its inputs. Row-level data defects degrade locally (default/`None`
//! substitution plus a `tracing` event); only a structural schema violation
//! propagates as an error.

pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod validate;

pub use aggregate::{
    compute_daily_metrics, compute_moving_average, identify_top_posts, DailyMetric, TopPost,
    TopPosts, DAILY_METRIC_COLUMNS, DEFAULT_MA_WINDOW, DEFAULT_TOP_OVERALL_N,
    DEFAULT_TOP_PLATFORM_N, TOP_POST_COLUMNS,
};
pub use error::SchemaViolation;
pub use normalize::normalize;
pub use validate::{check_required_columns, missing_columns, validate};
