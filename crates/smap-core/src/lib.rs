//! Shared types and configuration for the SMAP pipeline.
//!
//! Holds the canonical per-post schema every platform is normalized into,
//! the loose raw-record table produced by platform adapters, and the
//! env/YAML-driven application configuration.

pub mod app_config;
pub mod config;
pub mod error;
pub mod platforms;
pub mod schema;
pub mod table;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use platforms::{load_platform_settings, PlatformSettings};
pub use schema::{CanonicalRecord, CANONICAL_COLUMNS};
pub use table::{CanonicalTable, RawRecord, RawTable};
