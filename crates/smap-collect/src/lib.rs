//! Platform collection adapters for the SMAP pipeline.
//!
//! Each adapter is a free-standing implementation of the same two-method
//! contract — `request` against the vendor API, `transform` from the vendor
//! JSON into superset-of-canonical raw rows — exposed through the
//! [`PlatformAdapter`] capability trait. Credentials are explicit
//! constructor arguments, never process-wide state. Facebook degrades to
//! generated mock data when no access token is configured.

pub mod adapter;
pub mod error;
pub mod mock;
mod sources;

pub use adapter::{collect_all, PlatformAdapter};
pub use error::CollectError;
pub use mock::MockDataGenerator;
pub use sources::{FacebookAdapter, TwitterAdapter, YouTubeAdapter};
